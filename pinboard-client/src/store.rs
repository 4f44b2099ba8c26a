/// Local board state
///
/// [`BoardStore`] holds the client's view of each board: its columns and
/// their cards, ordered by index. Every local mutation bumps the board's
/// `version` stamp. Server fetches are installed through
/// [`BoardStore::apply_refresh`] with the stamp captured when the fetch
/// started, so a response that raced with newer local edits is discarded
/// instead of overwriting them.
///
/// All mutations are pure in-memory reducers; persistence is the engine's
/// job.

use std::collections::HashMap;

use uuid::Uuid;

use pinboard_shared::models::{board::Board, card::Card, column::Column};
use pinboard_shared::services::columns::ColumnWithCards;

/// Per-board client state
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    /// Columns with their cards, both in display order
    pub columns: Vec<ColumnWithCards>,

    /// Monotonically increasing stamp; bumped on every local mutation
    pub version: u64,
}

/// Client-side store for board state, keyed by board id
#[derive(Debug, Default)]
pub struct BoardStore {
    boards: HashMap<Uuid, BoardState>,
    meta: HashMap<Uuid, Board>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a board, starting with empty column state
    pub fn add_board(&mut self, board: Board) {
        self.boards.entry(board.id).or_default();
        self.meta.insert(board.id, board);
    }

    /// Returns a board's columns, if the board is known
    pub fn columns(&self, board_id: Uuid) -> Option<&[ColumnWithCards]> {
        self.boards.get(&board_id).map(|s| s.columns.as_slice())
    }

    /// Returns a board's metadata, if known
    pub fn board(&self, board_id: Uuid) -> Option<&Board> {
        self.meta.get(&board_id)
    }

    /// Returns the current version stamp for a board (0 if unknown)
    ///
    /// Capture this before starting a fetch and pass it back to
    /// [`BoardStore::apply_refresh`].
    pub fn stamp(&self, board_id: Uuid) -> u64 {
        self.boards.get(&board_id).map(|s| s.version).unwrap_or(0)
    }

    /// Appends a column to a board
    pub fn add_column(&mut self, board_id: Uuid, column: Column) {
        let state = self.boards.entry(board_id).or_default();
        state.columns.push(ColumnWithCards {
            column,
            cards: Vec::new(),
        });
        state.version += 1;
    }

    /// Appends a card to its column (`card.column_id`)
    ///
    /// Ignored if the column is not present locally.
    pub fn add_card(&mut self, board_id: Uuid, card: Card) {
        let Some(state) = self.boards.get_mut(&board_id) else {
            return;
        };

        if let Some(entry) = state
            .columns
            .iter_mut()
            .find(|c| c.column.id == card.column_id)
        {
            entry.cards.push(card);
            state.version += 1;
        }
    }

    /// Applies a card move locally
    ///
    /// Removes the card from its current column and inserts it into
    /// `to_column` at `to_index` (clamped to the column's length). Card
    /// positions in both affected columns are rewritten to match their
    /// indices, mirroring what the server does.
    ///
    /// Returns false (and changes nothing) if the card or target column is
    /// unknown.
    pub fn apply_move(
        &mut self,
        board_id: Uuid,
        card_id: Uuid,
        to_column: Uuid,
        to_index: usize,
    ) -> bool {
        let Some(state) = self.boards.get_mut(&board_id) else {
            return false;
        };

        if !state.columns.iter().any(|c| c.column.id == to_column) {
            return false;
        }

        let mut moved: Option<Card> = None;
        for entry in state.columns.iter_mut() {
            if let Some(index) = entry.cards.iter().position(|c| c.id == card_id) {
                moved = Some(entry.cards.remove(index));
                break;
            }
        }

        let Some(mut card) = moved else {
            return false;
        };
        card.column_id = to_column;

        for entry in state.columns.iter_mut() {
            if entry.column.id == to_column {
                let index = to_index.min(entry.cards.len());
                entry.cards.insert(index, card);
                break;
            }
        }

        renumber(state);
        state.version += 1;

        true
    }

    /// Installs a server fetch of a board's columns
    ///
    /// `stamp` must be the value of [`BoardStore::stamp`] captured when the
    /// fetch started. The fetch is installed only if no local mutation
    /// happened in between (stamp is current); otherwise it is stale and
    /// dropped. Returns whether the fetch was installed.
    pub fn apply_refresh(
        &mut self,
        board_id: Uuid,
        columns: Vec<ColumnWithCards>,
        stamp: u64,
    ) -> bool {
        let state = self.boards.entry(board_id).or_default();

        if stamp < state.version {
            tracing::debug!(
                %board_id,
                stamp,
                version = state.version,
                "Dropping stale board refresh"
            );
            return false;
        }

        state.columns = columns;
        state.version += 1;

        true
    }
}

/// Rewrites positions in every column to match card indices
fn renumber(state: &mut BoardState) {
    for entry in state.columns.iter_mut() {
        for (index, card) in entry.cards.iter_mut().enumerate() {
            card.position = index as i32;
        }
    }
}
