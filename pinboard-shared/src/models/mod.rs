/// Database models for Pinboard
///
/// Each model owns its CRUD operations over a `sqlx::PgPool`.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `board`: Boards and board memberships with roles
/// - `column`: Ordered lanes within a board
/// - `card`: Units of work within a column (labels, likes)
/// - `label`: Name/color pairs shared across cards
/// - `comment`: Card comments with authors

pub mod board;
pub mod card;
pub mod column;
pub mod comment;
pub mod label;
pub mod user;
