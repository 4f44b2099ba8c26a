/// Board engine: optimistic moves with server reconciliation
///
/// [`BoardEngine`] owns the store, the drag controller, and the API client.
/// When a drag ends it resolves the drop into a move intent, applies it to
/// the local store immediately, then persists it to the server. If the
/// server rejects the move, the engine re-fetches the board's columns and
/// installs them (version-stamped) to discard the optimistic guess.
///
/// User-facing notices (move failures, refreshes) flow through a tokio mpsc
/// channel so a UI layer can subscribe without the engine knowing about it.

use tokio::sync::mpsc;
use uuid::Uuid;

use pinboard_shared::models::{board::Board, card::Card, column::Column};

use crate::api::{ApiClient, ApiClientError};
use crate::drag::{DragController, DropTarget};
use crate::store::BoardStore;

const NOTICE_BUFFER: usize = 32;

/// User-facing event emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A move was rejected by the server; local state has been re-fetched
    MoveFailed { card_id: Uuid, message: String },

    /// A board's columns were replaced with fresh server state
    BoardRefreshed { board_id: Uuid },
}

/// Client-side board engine
pub struct BoardEngine {
    store: BoardStore,
    drag: DragController,
    api: ApiClient,
    notices: mpsc::Sender<Notice>,
}

impl BoardEngine {
    /// Creates an engine and the receiving end of its notice channel
    pub fn new(api: ApiClient) -> (Self, mpsc::Receiver<Notice>) {
        let (tx, rx) = mpsc::channel(NOTICE_BUFFER);

        (
            Self {
                store: BoardStore::new(),
                drag: DragController::new(),
                api,
                notices: tx,
            },
            rx,
        )
    }

    /// Read access to the local store
    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Registers a board and loads its columns from the server
    pub async fn open_board(&mut self, board: Board) -> Result<(), ApiClientError> {
        let board_id = board.id;
        self.store.add_board(board);

        self.refresh_board(board_id).await
    }

    /// Creates a column on the server and appends it locally
    pub async fn create_column(
        &mut self,
        board_id: Uuid,
        title: &str,
    ) -> Result<Column, ApiClientError> {
        let column = self.api.create_column(board_id, title).await?;
        self.store.add_column(board_id, column.clone());

        Ok(column)
    }

    /// Creates a card on the server and appends it locally
    pub async fn create_card(
        &mut self,
        board_id: Uuid,
        column_id: Uuid,
        title: &str,
    ) -> Result<Card, ApiClientError> {
        let card = self.api.create_card(column_id, title).await?;
        self.store.add_card(board_id, card.clone());

        Ok(card)
    }

    /// Begins dragging a card; returns false if a drag is already active
    pub fn begin_drag(&mut self, card_id: Uuid) -> bool {
        self.drag.begin(card_id)
    }

    /// Abandons the active drag without moving anything
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Ends the active drag over `target`
    ///
    /// Resolves the drop to a move intent, applies it optimistically, and
    /// persists it. A drop that resolves to no intent (no active drag, or
    /// the card would stay put) does nothing and issues no request.
    pub async fn drop_on(
        &mut self,
        board_id: Uuid,
        target: DropTarget,
    ) -> Result<(), ApiClientError> {
        let Some(intent) = self.drag.resolve_drop(&self.store, board_id, target) else {
            return Ok(());
        };

        // Optimistic local apply; the server is the authority on the final
        // positions, reconciled below on failure
        self.store
            .apply_move(board_id, intent.card_id, intent.to_column, intent.to_index);

        match self
            .api
            .move_card(intent.card_id, intent.to_column, intent.to_index as i32)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(
                    card_id = %intent.card_id,
                    error = %err,
                    "Card move rejected, re-fetching board"
                );

                self.notify(Notice::MoveFailed {
                    card_id: intent.card_id,
                    message: err.to_string(),
                });

                self.refresh_board(board_id).await
            }
        }
    }

    /// Re-fetches a board's columns and installs them if still current
    pub async fn refresh_board(&mut self, board_id: Uuid) -> Result<(), ApiClientError> {
        let stamp = self.store.stamp(board_id);
        let columns = self.api.fetch_columns(board_id).await?;

        if self.store.apply_refresh(board_id, columns, stamp) {
            self.notify(Notice::BoardRefreshed { board_id });
        }

        Ok(())
    }

    fn notify(&self, notice: Notice) {
        // A full buffer means no one is listening; drop rather than block
        if self.notices.try_send(notice).is_err() {
            tracing::debug!("Notice channel full or closed, dropping notice");
        }
    }
}
