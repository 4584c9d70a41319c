//! Checkout selection: the subset of cart lines chosen for the next order.
//!
//! The set itself is a plain id set; [`CartStore`] keeps it a subset of its
//! lines by pruning it in the same step as every removal or merge. Selection
//! changes are persisted like cart changes.

use std::collections::BTreeSet;

use burvon_core::LineId;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::line::CartLine;
use crate::persistence::Rehydrate;
use crate::storage::KeyValueStore;
use crate::store::CartStore;

/// Set of selected line ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<LineId>,
}

impl Selection {
    #[must_use]
    pub fn contains(&self, id: &LineId) -> bool {
        self.ids.contains(id)
    }

    pub fn insert(&mut self, id: LineId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: &LineId) -> bool {
        self.ids.remove(id)
    }

    /// Flip membership; returns the new state.
    pub fn toggle(&mut self, id: &LineId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Move a selection mark from `from` to `to`, if `from` was selected.
    pub fn rename(&mut self, from: &LineId, to: &LineId) {
        if self.ids.remove(from) {
            self.ids.insert(to.clone());
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn retain(&mut self, keep: impl FnMut(&LineId) -> bool) {
        self.ids.retain(keep);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineId> {
        self.ids.iter()
    }
}

impl FromIterator<LineId> for Selection {
    fn from_iter<I: IntoIterator<Item = LineId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Rehydrate for LineId {
    type Key = Self;

    fn identity(&self) -> Self {
        self.clone()
    }

    fn heal(&mut self) -> bool {
        !self.as_str().is_empty()
    }
}

/// Snapshot of the selected lines handed to the checkout service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutHandoff {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub item_count: u64,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Flip selection of a line. Ids not in the cart are ignored.
    ///
    /// Returns whether the line is selected afterwards.
    #[instrument(skip(self), fields(line_id = %id))]
    pub fn toggle_selected(&mut self, id: &LineId) -> bool {
        if self.get(id).is_none() {
            debug!("Toggle ignored for unknown line");
            return false;
        }
        let selected = self.selection.toggle(id);
        self.commit_selection();
        selected
    }

    /// Select every line in the cart.
    pub fn select_all(&mut self) {
        for line in &self.lines {
            self.selection.insert(line.id.clone());
        }
        self.commit_selection();
    }

    /// Empty the selection without touching the cart.
    pub fn deselect_all(&mut self) {
        self.selection.clear();
        self.commit_selection();
    }

    #[must_use]
    pub fn is_selected(&self, id: &LineId) -> bool {
        self.selection.contains(id)
    }

    /// The selection set.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected lines, in cart order.
    pub fn selected_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines
            .iter()
            .filter(|line| self.selection.contains(&line.id))
    }

    /// Sum of `price * quantity` over selected lines.
    #[must_use]
    pub fn selected_total(&self) -> Decimal {
        self.selected_lines().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over selected lines.
    #[must_use]
    pub fn selected_count(&self) -> u64 {
        self.selected_lines()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Snapshot of the selection for the checkout service.
    #[must_use]
    pub fn checkout(&self) -> CheckoutHandoff {
        CheckoutHandoff {
            lines: self.selected_lines().cloned().collect(),
            total: self.selected_total(),
            item_count: self.selected_count(),
        }
    }

    /// Remove every selected line from the cart, then empty the selection.
    ///
    /// Called once checkout succeeds. Returns the removed lines.
    #[instrument(skip(self))]
    pub fn clear_selected(&mut self) -> Vec<CartLine> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.lines)
            .into_iter()
            .partition(|line| self.selection.contains(&line.id));
        self.lines = kept;
        self.selection.clear();

        debug!(removed = removed.len(), "Cleared selected lines");
        self.commit();
        removed
    }
}
