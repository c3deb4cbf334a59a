//! Selection Controller: the selection-mode state machine of the orders
//! screen.
//!
//! ```text
//! Idle --enter/select--> Selecting --conflict--> PendingConfirmation
//!  ^                        |                         |
//!  +------cancel/commit-----+------confirm/cancel-----+
//! ```
//!
//! The selected set is kept a subset of the ids visible under the active
//! filter; callers prune it with [`SelectionController::retain_visible`]
//! whenever the visible set changes.

use thiserror::Error;

use crate::domain::types::{ClientId, ItemId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting {
        selected: Vec<ItemId>,
    },
    PendingConfirmation {
        client_id: ClientId,
        item_ids: Vec<ItemId>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("a reassignment is awaiting confirmation")]
    AwaitingConfirmation,
    #[error("no reassignment is pending")]
    NothingPending,
    #[error("nothing to confirm")]
    EmptyBatch,
}

/// Batch reassignment waiting for the user's decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingReassignment {
    pub client_id: ClientId,
    pub item_ids: Vec<ItemId>,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectionState::Selecting { .. })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SelectionState::PendingConfirmation { .. })
    }

    /// Currently selected ids; empty outside of `Selecting`.
    pub fn selected(&self) -> &[ItemId] {
        match &self.state {
            SelectionState::Selecting { selected } => selected,
            _ => &[],
        }
    }

    /// Enters selection mode with nothing selected. Already selecting is a
    /// no-op.
    pub fn enter(&mut self) -> Result<(), SelectionError> {
        match self.state {
            SelectionState::Idle => {
                self.state = SelectionState::Selecting {
                    selected: Vec::new(),
                };
                Ok(())
            }
            SelectionState::Selecting { .. } => Ok(()),
            SelectionState::PendingConfirmation { .. } => Err(SelectionError::AwaitingConfirmation),
        }
    }

    /// "Select" from an item's context menu: enters selection mode seeded
    /// with that item.
    pub fn select_single(&mut self, item_id: ItemId) -> Result<(), SelectionError> {
        self.enter()?;
        if let SelectionState::Selecting { selected } = &mut self.state {
            if !selected.contains(&item_id) {
                selected.push(item_id);
            }
        }
        Ok(())
    }

    /// Flips one item. Ids outside `visible` are ignored. Returns whether
    /// the selection changed.
    pub fn toggle(&mut self, item_id: &ItemId, visible: &[ItemId]) -> bool {
        let SelectionState::Selecting { selected } = &mut self.state else {
            return false;
        };
        if !visible.contains(item_id) {
            log::debug!("Ignoring toggle of hidden item {item_id}");
            return false;
        }

        match selected.iter().position(|id| id == item_id) {
            Some(index) => {
                selected.remove(index);
            }
            None => selected.push(item_id.clone()),
        }
        true
    }

    /// Selects exactly the visible set, or clears the selection when the
    /// visible set is already fully selected.
    pub fn toggle_all(&mut self, visible: &[ItemId]) {
        let SelectionState::Selecting { selected } = &mut self.state else {
            return;
        };

        let all_selected = !visible.is_empty()
            && selected.len() == visible.len()
            && visible.iter().all(|id| selected.contains(id));

        if all_selected {
            selected.clear();
        } else {
            *selected = visible.to_vec();
        }
    }

    /// Drops selected ids that are no longer visible.
    pub fn retain_visible(&mut self, visible: &[ItemId]) {
        if let SelectionState::Selecting { selected } = &mut self.state {
            let before = selected.len();
            selected.retain(|id| visible.contains(id));
            if selected.len() != before {
                log::debug!("Pruned {} hidden items from selection", before - selected.len());
            }
        }
    }

    /// Freezes `item_ids` for confirmation. Allowed from `Idle` (order-level
    /// actions) and from `Selecting`.
    pub fn begin_confirmation(
        &mut self,
        client_id: ClientId,
        item_ids: Vec<ItemId>,
    ) -> Result<(), SelectionError> {
        if self.is_pending() {
            return Err(SelectionError::AwaitingConfirmation);
        }
        if item_ids.is_empty() {
            return Err(SelectionError::EmptyBatch);
        }
        self.state = SelectionState::PendingConfirmation {
            client_id,
            item_ids,
        };
        Ok(())
    }

    /// Confirms the pending reassignment, handing it to the caller to commit.
    /// The controller returns to `Idle`.
    pub fn take_pending(&mut self) -> Result<PendingReassignment, SelectionError> {
        match std::mem::take(&mut self.state) {
            SelectionState::PendingConfirmation {
                client_id,
                item_ids,
            } => Ok(PendingReassignment {
                client_id,
                item_ids,
            }),
            other => {
                self.state = other;
                Err(SelectionError::NothingPending)
            }
        }
    }

    /// Leaves selection mode or drops a pending reassignment. Never touches
    /// the store.
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// Called after a batch action commits.
    pub fn finish(&mut self) {
        self.state = SelectionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<ItemId> {
        raw.iter().map(|id| ItemId::new(*id).unwrap()).collect()
    }

    #[test]
    fn select_single_seeds_selection() {
        let mut controller = SelectionController::new();
        controller.select_single(ItemId::new("item-2").unwrap()).unwrap();

        assert!(controller.is_selecting());
        assert_eq!(controller.selected(), ids(&["item-2"]).as_slice());
    }

    #[test]
    fn toggle_ignores_hidden_items() {
        let visible = ids(&["a", "b"]);
        let mut controller = SelectionController::new();
        controller.enter().unwrap();

        assert!(controller.toggle(&ItemId::new("a").unwrap(), &visible));
        assert!(!controller.toggle(&ItemId::new("z").unwrap(), &visible));
        assert_eq!(controller.selected(), ids(&["a"]).as_slice());

        assert!(controller.toggle(&ItemId::new("a").unwrap(), &visible));
        assert!(controller.selected().is_empty());
    }

    #[test]
    fn toggle_all_selects_then_clears_visible_set() {
        let visible = ids(&["a", "b", "c"]);
        let mut controller = SelectionController::new();
        controller.select_single(ItemId::new("b").unwrap()).unwrap();

        controller.toggle_all(&visible);
        assert_eq!(controller.selected(), visible.as_slice());

        controller.toggle_all(&visible);
        assert!(controller.selected().is_empty());
    }

    #[test]
    fn toggle_all_is_ignored_when_idle() {
        let mut controller = SelectionController::new();
        controller.toggle_all(&ids(&["a"]));
        assert_eq!(controller.state(), &SelectionState::Idle);
    }

    #[test]
    fn retain_visible_prunes_hidden_ids() {
        let mut controller = SelectionController::new();
        controller.enter().unwrap();
        controller.toggle_all(&ids(&["a", "b", "c"]));

        controller.retain_visible(&ids(&["c", "a"]));

        assert_eq!(controller.selected(), ids(&["a", "c"]).as_slice());
    }

    #[test]
    fn confirmation_round_trip_returns_to_idle() {
        let client = ClientId::new(3).unwrap();
        let mut controller = SelectionController::new();
        controller.select_single(ItemId::new("a").unwrap()).unwrap();
        controller
            .begin_confirmation(client, controller.selected().to_vec())
            .unwrap();

        assert_eq!(controller.enter(), Err(SelectionError::AwaitingConfirmation));

        let pending = controller.take_pending().unwrap();
        assert_eq!(pending.client_id, client);
        assert_eq!(pending.item_ids, ids(&["a"]));
        assert_eq!(controller.state(), &SelectionState::Idle);
    }

    #[test]
    fn take_pending_without_confirmation_keeps_state() {
        let mut controller = SelectionController::new();
        controller.select_single(ItemId::new("a").unwrap()).unwrap();

        assert_eq!(controller.take_pending(), Err(SelectionError::NothingPending));
        assert!(controller.is_selecting());
    }

    #[test]
    fn empty_batch_cannot_wait_for_confirmation() {
        let mut controller = SelectionController::new();
        assert_eq!(
            controller.begin_confirmation(ClientId::new(1).unwrap(), Vec::new()),
            Err(SelectionError::EmptyBatch)
        );
    }
}
