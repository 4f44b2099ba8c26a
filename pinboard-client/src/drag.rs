/// Drag gesture state machine
///
/// Tracks at most one active drag and resolves a drop target into a concrete
/// move intent against the current store state:
///
/// - dropping on a column appends the card at the end of that column
/// - dropping on a card inserts at that card's index
/// - a drop that leaves the card where it already is resolves to no intent

use uuid::Uuid;

use crate::store::BoardStore;

/// Drag gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,

    /// A card is being dragged
    Dragging { card_id: Uuid },
}

/// What the pointer was over when the card was released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// The column itself (header or empty area): append at the end
    Column(Uuid),

    /// Another card: insert at that card's index
    Card(Uuid),
}

/// A resolved move: put `card_id` at `to_index` in `to_column`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub card_id: Uuid,
    pub to_column: Uuid,
    pub to_index: usize,
}

/// Single-drag controller
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Begins dragging a card
    ///
    /// Returns false if a drag is already active; the existing drag keeps
    /// going.
    pub fn begin(&mut self, card_id: Uuid) -> bool {
        if matches!(self.state, DragState::Dragging { .. }) {
            return false;
        }

        self.state = DragState::Dragging { card_id };
        true
    }

    /// Abandons the active drag, if any
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Ends the active drag over `target` and resolves the move intent
    ///
    /// Returns None when there is no active drag, the target is unknown to
    /// the store, or the drop would leave the card at its current column and
    /// index. The controller returns to idle either way.
    pub fn resolve_drop(
        &mut self,
        store: &BoardStore,
        board_id: Uuid,
        target: DropTarget,
    ) -> Option<MoveIntent> {
        let DragState::Dragging { card_id } = self.state else {
            return None;
        };
        self.state = DragState::Idle;

        let columns = store.columns(board_id)?;

        // Current location of the dragged card
        let (from_column, from_index) = columns.iter().find_map(|entry| {
            entry
                .cards
                .iter()
                .position(|c| c.id == card_id)
                .map(|i| (entry.column.id, i))
        })?;

        let (to_column, to_index) = match target {
            DropTarget::Column(column_id) => {
                let entry = columns.iter().find(|c| c.column.id == column_id)?;
                if column_id == from_column {
                    // Appending within the same column means the last slot
                    // after the card itself vacates its current one
                    (column_id, entry.cards.len().saturating_sub(1))
                } else {
                    (column_id, entry.cards.len())
                }
            }
            DropTarget::Card(target_card) => {
                if target_card == card_id {
                    return None;
                }

                columns.iter().find_map(|entry| {
                    entry
                        .cards
                        .iter()
                        .position(|c| c.id == target_card)
                        .map(|i| (entry.column.id, i))
                })?
            }
        };

        if to_column == from_column && to_index == from_index {
            return None;
        }

        Some(MoveIntent {
            card_id,
            to_column,
            to_index,
        })
    }
}
