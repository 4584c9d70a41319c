//! Cart store: ordered cart lines with stock-bound merge rules.
//!
//! # Invariants
//!
//! After every operation:
//! 1. line ids are unique
//! 2. every line has `0 < quantity <= stock`
//! 3. the selection only references ids present in the cart
//!
//! Operations never fail. Requests that would break an invariant are clamped
//! or refused and the [`CartOutcome`] says which. Every successful mutation
//! ends in [`CartStore::commit`], which persists the lines and the selection
//! and signals subscribers.
//!
//! The selection is persisted under its own key so that a selection made in
//! one session is still there at checkout in the next. Ids that no longer
//! name a line are dropped when it is loaded.

use burvon_core::{LineId, ProductId};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::config::CartConfig;
use crate::line::{CartLine, ProductSnapshot};
use crate::notification::Notifier;
use crate::persistence::PersistenceAdapter;
use crate::selection::Selection;
use crate::storage::KeyValueStore;

/// Why a request left the cart unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// Requested quantity was zero.
    ZeroQuantity,
    /// The line already holds as many units as the stock cap allows.
    AtStockCap,
    /// Another size of the same product is at its stock cap.
    VariantAtStockCap,
    /// The stock cap for a new line is zero.
    OutOfStock,
}

/// Result of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    /// A new line was inserted.
    Added {
        line: CartLine,
        /// The requested quantity was reduced to the stock cap.
        clamped: bool,
    },
    /// An existing line changed (merge, quantity or size update).
    Updated { line: CartLine, clamped: bool },
    /// A line was deleted.
    Removed { id: LineId },
    /// Nothing changed.
    Refused(Refusal),
    /// No line has the given id.
    NotFound,
}

impl CartOutcome {
    /// Whether the requested quantity was clamped.
    #[must_use]
    pub const fn is_clamped(&self) -> bool {
        matches!(
            self,
            Self::Added { clamped: true, .. } | Self::Updated { clamped: true, .. }
        )
    }

    /// Whether the cart was left unchanged.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Refused(_) | Self::NotFound)
    }
}

/// The cart: ordered lines, selection, persistence and add notifications.
#[derive(Debug)]
pub struct CartStore<S> {
    pub(crate) lines: Vec<CartLine>,
    pub(crate) selection: Selection,
    persistence: PersistenceAdapter<S, CartLine>,
    selection_persistence: PersistenceAdapter<S, LineId>,
    notifier: Notifier,
    revision: watch::Sender<u64>,
}

impl<S: KeyValueStore + Clone> CartStore<S> {
    /// Create an empty, un-hydrated store over `store`, keyed by
    /// [`CartConfig::cart_key`] and [`CartConfig::selection_key`].
    ///
    /// Call [`init`](Self::init) before the first mutation; saves are
    /// suppressed until then.
    #[must_use]
    pub fn new(store: S, config: &CartConfig) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            lines: Vec::new(),
            selection: Selection::default(),
            persistence: PersistenceAdapter::new(store.clone(), config.cart_key()),
            selection_persistence: PersistenceAdapter::new(store, config.selection_key()),
            notifier: Notifier::new(config.notification_timeout),
            revision,
        }
    }
}

impl<S: KeyValueStore> CartStore<S> {
    /// Replace in-memory state with the persisted cart and selection.
    ///
    /// Selected ids without a matching line are dropped.
    pub fn init(&mut self) {
        self.lines = self.persistence.load();
        self.selection = self.selection_persistence.load().into_iter().collect();

        let lines = &self.lines;
        self.selection
            .retain(|id| lines.iter().any(|line| line.id == *id));
        self.save_selection();

        info!(
            key = self.persistence.key(),
            lines = self.lines.len(),
            selected = self.selection.len(),
            "Cart hydrated"
        );
        self.signal();
    }

    /// Flush state and dismiss any pending notification.
    pub fn dispose(&mut self) {
        self.persistence.save(&self.lines);
        self.save_selection();
        self.notifier.close();
        debug!(key = self.persistence.key(), "Cart disposed");
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of `product` in `size`.
    ///
    /// An existing line grows up to its cap (`size_stock`, else the line's own
    /// stock) and is refused once it sits at the cap. A new line is refused if
    /// another size of the same product is already at its cap; otherwise it
    /// is inserted with `min(quantity, cap)` where the cap is `size_stock`,
    /// else `product.stock`.
    ///
    /// Accepted adds (clamped or not) raise a notification.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(
        &mut self,
        product: &ProductSnapshot,
        quantity: u32,
        size: Option<&str>,
        size_stock: Option<u32>,
    ) -> CartOutcome {
        if quantity == 0 {
            return CartOutcome::Refused(Refusal::ZeroQuantity);
        }

        let id = LineId::compose(&product.id, size);

        if let Some(existing) = self.lines.iter_mut().find(|line| line.id == id) {
            let cap = size_stock.unwrap_or(existing.stock);
            if existing.is_at_cap(cap) {
                debug!(line_id = %id, cap, "Add refused, line at stock cap");
                return CartOutcome::Refused(Refusal::AtStockCap);
            }

            let wanted = existing.quantity.saturating_add(quantity);
            existing.quantity = wanted.min(cap);
            existing.stock = cap;
            let line = existing.clone();

            debug!(line_id = %id, quantity = line.quantity, "Merged into existing line");
            self.commit();
            self.notifier.notify(line.clone());
            return CartOutcome::Updated {
                line,
                clamped: wanted > cap,
            };
        }

        let sibling_at_cap = self
            .lines
            .iter()
            .any(|line| line.product_id == product.id && line.is_at_cap(line.stock));
        if sibling_at_cap {
            debug!(line_id = %id, "Add refused, another size at stock cap");
            return CartOutcome::Refused(Refusal::VariantAtStockCap);
        }

        let cap = size_stock.unwrap_or(product.stock);
        if cap == 0 {
            debug!(line_id = %id, "Add refused, out of stock");
            return CartOutcome::Refused(Refusal::OutOfStock);
        }

        let line = CartLine::from_product(product, size, quantity.min(cap), cap);
        self.lines.push(line.clone());

        debug!(line_id = %id, quantity = line.quantity, "Inserted line");
        self.commit();
        self.notifier.notify(line.clone());
        CartOutcome::Added {
            line,
            clamped: quantity > cap,
        }
    }

    /// Delete a line and drop it from the selection.
    #[instrument(skip(self), fields(line_id = %id))]
    pub fn remove(&mut self, id: &LineId) -> CartOutcome {
        let Some(position) = self.position(id) else {
            return CartOutcome::NotFound;
        };
        self.lines.remove(position);
        self.selection.remove(id);

        debug!("Removed line");
        self.commit();
        CartOutcome::Removed { id: id.clone() }
    }

    /// Set a line's quantity, clamped to its cap.
    ///
    /// Zero removes the line. The cap is `stock_limit`, else the line's own
    /// stock; a `stock_limit` of zero is treated as "not loaded yet" when the
    /// line itself has stock. A resolved cap of zero removes the line.
    #[instrument(skip(self), fields(line_id = %id))]
    pub fn update_quantity(
        &mut self,
        id: &LineId,
        quantity: u32,
        stock_limit: Option<u32>,
    ) -> CartOutcome {
        if quantity == 0 {
            return self.remove(id);
        }

        let Some(line) = self.lines.iter_mut().find(|line| line.id == *id) else {
            return CartOutcome::NotFound;
        };

        let cap = match stock_limit {
            Some(0) if line.stock > 0 => line.stock,
            Some(limit) => limit,
            None => line.stock,
        };
        if cap == 0 {
            return self.remove(id);
        }

        line.quantity = quantity.min(cap);
        line.stock = cap;
        let line = line.clone();

        debug!(quantity = line.quantity, cap, "Updated quantity");
        self.commit();
        CartOutcome::Updated {
            line,
            clamped: quantity > cap,
        }
    }

    /// Move a line to another size.
    ///
    /// If another line already holds the target size the two merge: the
    /// target grows to `min(target + moved, cap)` with the cap taken from
    /// `size_stock`, else the target's stock, and the original line is
    /// deleted. Otherwise the line is re-keyed in place and its stock replaced
    /// by `size_stock` when given. Selection follows the line to its new id.
    #[instrument(skip(self), fields(line_id = %id))]
    pub fn update_size(
        &mut self,
        id: &LineId,
        size: &str,
        size_stock: Option<u32>,
    ) -> CartOutcome {
        let Some(position) = self.position(id) else {
            return CartOutcome::NotFound;
        };
        let Some(product_id) = self.lines.get(position).map(|line| line.product_id.clone())
        else {
            return CartOutcome::NotFound;
        };
        let target_id = LineId::compose(&product_id, Some(size));

        if target_id != *id && self.position(&target_id).is_some() {
            return self.merge_into(position, &target_id, size_stock);
        }

        let Some(line) = self.lines.get_mut(position) else {
            return CartOutcome::NotFound;
        };
        line.id = target_id.clone();
        line.size = Some(size.to_owned());
        if let Some(stock) = size_stock {
            line.stock = stock;
        }
        if line.stock == 0 {
            self.lines.remove(position);
            self.selection.remove(id);
            debug!(target = %target_id, "New size out of stock, line removed");
            self.commit();
            return CartOutcome::Removed { id: id.clone() };
        }

        let clamped = line.quantity > line.stock;
        line.quantity = line.quantity.min(line.stock);
        let line = line.clone();
        self.selection.rename(id, &target_id);

        debug!(target = %target_id, quantity = line.quantity, "Changed size in place");
        self.commit();
        CartOutcome::Updated { line, clamped }
    }

    /// Empty the cart and the selection.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.lines.clear();
        self.selection.clear();
        debug!("Cleared cart");
        self.commit();
    }

    /// Dismiss the pending add notification.
    pub fn close_notification(&mut self) {
        self.notifier.close();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line by composite id.
    #[must_use]
    pub fn get(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == *id)
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    #[must_use]
    pub fn is_in_cart(&self, product_id: &ProductId, size: Option<&str>) -> bool {
        self.cart_item(product_id, size).is_some()
    }

    /// Line for a product and size, if present.
    #[must_use]
    pub fn cart_item(&self, product_id: &ProductId, size: Option<&str>) -> Option<&CartLine> {
        self.get(&LineId::compose(product_id, size))
    }

    /// Whether the line is at `size_stock` (else its own stock). Unknown ids
    /// are never at max.
    #[must_use]
    pub fn is_at_max_stock(&self, id: &LineId, size_stock: Option<u32>) -> bool {
        self.get(id)
            .is_some_and(|line| line.is_at_cap(size_stock.unwrap_or(line.stock)))
    }

    /// The add notification emitter.
    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Receive a revision number after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn position(&self, id: &LineId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == *id)
    }

    fn merge_into(
        &mut self,
        position: usize,
        target_id: &LineId,
        size_stock: Option<u32>,
    ) -> CartOutcome {
        let moved = self.lines.remove(position);
        let merged = self
            .lines
            .iter_mut()
            .find(|line| line.id == *target_id)
            .map(|target| {
                let cap = size_stock.unwrap_or(target.stock);
                let wanted = target.quantity.saturating_add(moved.quantity);
                target.quantity = wanted.min(cap);
                target.stock = cap;
                (target.clone(), wanted > cap)
            });
        let Some((line, clamped)) = merged else {
            // Caller checked the target exists; put the line back untouched
            self.lines.insert(position, moved);
            return CartOutcome::NotFound;
        };

        if line.quantity == 0 {
            self.lines.retain(|line| line.id != *target_id);
            self.selection.remove(&moved.id);
            self.selection.remove(target_id);
            debug!(target = %target_id, "Merge target out of stock, both lines removed");
            self.commit();
            return CartOutcome::Removed {
                id: target_id.clone(),
            };
        }

        self.selection.rename(&moved.id, target_id);

        debug!(from = %moved.id, target = %target_id, quantity = line.quantity, "Merged sizes");
        self.commit();
        CartOutcome::Updated { line, clamped }
    }

    /// Persist the lines and the selection, then notify subscribers.
    pub(crate) fn commit(&mut self) {
        self.persistence.save(&self.lines);
        self.commit_selection();
    }

    /// Persist the selection only, then notify subscribers.
    pub(crate) fn commit_selection(&self) {
        self.save_selection();
        self.signal();
    }

    fn save_selection(&self) {
        let ids: Vec<LineId> = self.selection.iter().cloned().collect();
        self.selection_persistence.save(&ids);
    }

    fn signal(&self) {
        self.revision
            .send_modify(|revision| *revision = revision.wrapping_add(1));
    }
}
