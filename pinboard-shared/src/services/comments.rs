/// Comment service
///
/// Anyone who can view a card may read and write comments on it. Editing is
/// author-only; deletion is allowed to the author, the board creator, or an
/// admin-level member.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::board::{Board, BoardRole};
use crate::models::comment::{Comment, CommentWithAuthor};

use super::{board_of_card, load_card, require_view, ServiceError, ServiceResult};

/// Lists a card's comments with author profiles, newest first
pub async fn list_for_card(
    pool: &PgPool,
    card_id: Uuid,
    acting_user: Uuid,
) -> ServiceResult<Vec<CommentWithAuthor>> {
    let card = load_card(pool, card_id).await?;
    let board = board_of_card(pool, &card).await?;
    require_view(pool, &board, acting_user).await?;

    Ok(Comment::list_by_card(pool, card_id).await?)
}

/// Creates a comment on a card
pub async fn create(
    pool: &PgPool,
    card_id: Uuid,
    acting_user: Uuid,
    content: &str,
) -> ServiceResult<Comment> {
    let card = load_card(pool, card_id).await?;
    let board = board_of_card(pool, &card).await?;
    require_view(pool, &board, acting_user).await?;

    Ok(Comment::create(pool, card_id, acting_user, content).await?)
}

/// Rewrites a comment's content (author only)
pub async fn update(
    pool: &PgPool,
    comment_id: Uuid,
    acting_user: Uuid,
    content: &str,
) -> ServiceResult<Comment> {
    let comment = Comment::find_by_id(pool, comment_id)
        .await?
        .ok_or(ServiceError::NotFound("Comment"))?;

    if comment.user_id != acting_user {
        return Err(ServiceError::Forbidden(
            "Only the comment author can edit a comment",
        ));
    }

    Comment::update(pool, comment_id, content)
        .await?
        .ok_or(ServiceError::NotFound("Comment"))
}

/// Deletes a comment (author, board creator, or admin-level member)
pub async fn delete(pool: &PgPool, comment_id: Uuid, acting_user: Uuid) -> ServiceResult<()> {
    let comment = Comment::find_by_id(pool, comment_id)
        .await?
        .ok_or(ServiceError::NotFound("Comment"))?;

    if comment.user_id != acting_user {
        let card = load_card(pool, comment.card_id).await?;
        let board = board_of_card(pool, &card).await?;

        let role = Board::member_role(pool, board.id, acting_user).await?;
        let is_manager = board.creator_id == acting_user
            || matches!(role, Some(BoardRole::Owner) | Some(BoardRole::Admin));

        if !is_manager {
            return Err(ServiceError::Forbidden(
                "You do not have permission to delete this comment",
            ));
        }
    }

    Comment::delete(pool, comment_id).await?;

    Ok(())
}
