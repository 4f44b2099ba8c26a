/// Board authorization policy
///
/// Pure permission decisions for board-scoped mutations. The services layer
/// loads the board and the actor's membership role, then asks these
/// functions whether the operation may proceed.
///
/// # Permission Model
///
/// - The board **creator** can do everything, always.
/// - Otherwise the actor's membership role must be in the operation's
///   required role set.
/// - `is_public` independently grants read access to non-members.
///
/// # Example
///
/// ```
/// use pinboard_shared::auth::policy::{can_perform, EDITOR_ROLES};
/// use pinboard_shared::models::board::{Board, BoardRole};
/// # use chrono::Utc;
/// # use uuid::Uuid;
///
/// # let creator = Uuid::new_v4();
/// # let board = Board {
/// #     id: Uuid::new_v4(), title: "t".into(), description: None, color: None,
/// #     category: None, creator_id: creator, is_public: false,
/// #     created_at: Utc::now(), updated_at: Utc::now(),
/// # };
/// // The creator needs no membership role
/// assert!(can_perform(&board, creator, None, EDITOR_ROLES));
/// ```

use uuid::Uuid;

use crate::models::board::{Board, BoardRole};

/// Roles allowed to create/update columns and cards, move cards, manage
/// labels, and reorder columns
pub const EDITOR_ROLES: &[BoardRole] = &[BoardRole::Owner, BoardRole::Admin, BoardRole::Member];

/// Roles allowed to manage membership, delete columns/cards, and remove
/// others' comments
pub const MANAGER_ROLES: &[BoardRole] = &[BoardRole::Owner, BoardRole::Admin];

/// Decides whether `acting_user` may perform an operation on `board`
///
/// Allowed iff the actor is the board's creator, or their membership role is
/// in `required_roles`.
pub fn can_perform(
    board: &Board,
    acting_user: Uuid,
    role: Option<BoardRole>,
    required_roles: &[BoardRole],
) -> bool {
    if board.creator_id == acting_user {
        return true;
    }

    match role {
        Some(role) => required_roles.contains(&role),
        None => false,
    }
}

/// Decides whether `acting_user` may view `board`
///
/// The creator and members always can; public boards grant read access to
/// everyone else.
pub fn can_view(board: &Board, acting_user: Uuid, is_member: bool) -> bool {
    board.creator_id == acting_user || is_member || board.is_public
}

/// Decides whether `member_user` may be removed from `board`'s membership
///
/// The creator can never be removed, regardless of who asks.
pub fn can_remove_member(board: &Board, member_user: Uuid) -> bool {
    board.creator_id != member_user
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn board(creator_id: Uuid, is_public: bool) -> Board {
        Board {
            id: Uuid::new_v4(),
            title: "Test Board".to_string(),
            description: None,
            color: None,
            category: None,
            creator_id,
            is_public,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_creator_can_do_anything() {
        let creator = Uuid::new_v4();
        let b = board(creator, false);

        assert!(can_perform(&b, creator, None, MANAGER_ROLES));
        assert!(can_perform(&b, creator, None, EDITOR_ROLES));
        assert!(can_perform(&b, creator, None, &[]));
    }

    #[test]
    fn test_role_must_be_in_required_set() {
        let b = board(Uuid::new_v4(), false);
        let user = Uuid::new_v4();

        assert!(can_perform(&b, user, Some(BoardRole::Member), EDITOR_ROLES));
        assert!(!can_perform(&b, user, Some(BoardRole::Member), MANAGER_ROLES));
        assert!(can_perform(&b, user, Some(BoardRole::Admin), MANAGER_ROLES));
        assert!(!can_perform(&b, user, None, EDITOR_ROLES));
    }

    #[test]
    fn test_visibility() {
        let creator = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let private = board(creator, false);
        assert!(can_view(&private, creator, false));
        assert!(can_view(&private, stranger, true));
        assert!(!can_view(&private, stranger, false));

        let public = board(creator, true);
        assert!(can_view(&public, stranger, false));
    }

    #[test]
    fn test_creator_cannot_be_removed() {
        let creator = Uuid::new_v4();
        let b = board(creator, false);

        assert!(!can_remove_member(&b, creator));
        assert!(can_remove_member(&b, Uuid::new_v4()));
    }
}
