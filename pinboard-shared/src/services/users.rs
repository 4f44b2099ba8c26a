/// User service
///
/// Profile reads and updates for the authenticated user. Password changes
/// verify the current password before hashing and storing the new one.

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::models::user::{Profile, UpdateUser, User};

use super::{ServiceError, ServiceResult};

/// Fetches the authenticated user's profile
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> ServiceResult<Profile> {
    let user = User::find_by_id(pool, user_id)
        .await?
        .ok_or(ServiceError::NotFound("User"))?;

    Ok(Profile::from(user))
}

/// Updates the authenticated user's profile fields
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    name: Option<String>,
    avatar: Option<String>,
    bio: Option<String>,
) -> ServiceResult<Profile> {
    let user = User::update(
        pool,
        user_id,
        UpdateUser {
            name,
            avatar,
            bio,
            password_hash: None,
        },
    )
    .await?
    .ok_or(ServiceError::NotFound("User"))?;

    Ok(Profile::from(user))
}

/// Changes the authenticated user's password
///
/// The current password must verify against the stored hash before the new
/// one is accepted.
pub async fn change_password(
    pool: &PgPool,
    user_id: Uuid,
    current_password: &str,
    new_password: &str,
) -> ServiceResult<()> {
    let user = User::find_by_id(pool, user_id)
        .await?
        .ok_or(ServiceError::NotFound("User"))?;

    if !verify_password(current_password, &user.password_hash)? {
        return Err(ServiceError::Unauthorized("Current password is incorrect"));
    }

    let password_hash = hash_password(new_password)?;

    User::update(
        pool,
        user_id,
        UpdateUser {
            password_hash: Some(password_hash),
            ..UpdateUser::default()
        },
    )
    .await?
    .ok_or(ServiceError::NotFound("User"))?;

    Ok(())
}
