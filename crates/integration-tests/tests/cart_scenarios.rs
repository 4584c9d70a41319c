//! End-to-end cart, selection and checkout flows.

use std::time::Duration;

use burvon_cart::{CartConfig, CartEngine, CartOutcome, KeyValueStore, MemoryStore, Refusal};
use burvon_core::LineId;
use burvon_integration_tests::{hydrated_cart, hydrated_engine, product};
use rust_decimal::Decimal;

fn id(raw: &str) -> LineId {
    LineId::new(raw)
}

// =============================================================================
// Stock-bound merge rules
// =============================================================================

#[test]
fn test_add_size_then_clamp_then_resize() {
    let mut cart = hydrated_cart(&MemoryStore::new());
    let p1 = product("P1", 5);

    cart.add(&p1, 2, Some("M"), None);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(&id("P1_M")).unwrap().quantity, 2);

    let outcome = cart.add(&p1, 10, Some("M"), None);
    assert!(outcome.is_clamped());
    assert_eq!(cart.get(&id("P1_M")).unwrap().quantity, 5);

    cart.update_size(&id("P1_M"), "L", Some(3));
    assert_eq!(cart.len(), 1);
    let line = cart.get(&id("P1_L")).unwrap();
    assert_eq!(line.quantity, 3);
    assert_eq!(line.stock, 3);
}

#[test]
fn test_merge_arithmetic_clamps_to_stock() {
    let mut cart = hydrated_cart(&MemoryStore::new());
    let p = product("P", 10);
    cart.add(&p, 8, None, None);

    cart.add(&p, 3, None, None);
    assert_eq!(cart.get(&id("P_default")).unwrap().quantity, 10);
}

#[test]
fn test_add_at_stock_cap_leaves_store_unchanged() {
    let backend = MemoryStore::new();
    let mut cart = hydrated_cart(&backend);
    let p = product("P", 4);
    cart.add(&p, 4, None, None);
    let persisted = backend.get("burvon_cart").unwrap();
    let lines = cart.lines().to_vec();

    assert_eq!(
        cart.add(&p, 1, None, None),
        CartOutcome::Refused(Refusal::AtStockCap)
    );
    assert_eq!(cart.lines(), lines.as_slice());
    assert_eq!(backend.get("burvon_cart").unwrap(), persisted);
}

#[test]
fn test_variant_merge_on_size_change() {
    let mut cart = hydrated_cart(&MemoryStore::new());
    let p = product("P", 5);
    cart.add(&p, 2, Some("small"), None);
    cart.add(&p, 4, Some("large"), None);

    cart.update_size(&id("P_small"), "large", None);

    assert_eq!(cart.len(), 1);
    assert!(cart.get(&id("P_small")).is_none());
    assert_eq!(cart.get(&id("P_large")).unwrap().quantity, 5);
}

#[test]
fn test_merge_keeps_first_added_timestamp() {
    let mut cart = hydrated_cart(&MemoryStore::new());
    let p = product("P", 9);
    cart.add(&p, 1, None, None);
    let added_at = cart.get(&id("P_default")).unwrap().added_at;

    cart.add(&p, 1, None, None);
    assert_eq!(cart.get(&id("P_default")).unwrap().added_at, added_at);
}

#[test]
fn test_stale_zero_stock_limit_does_not_delete_line() {
    let mut cart = hydrated_cart(&MemoryStore::new());
    cart.add(&product("P", 6), 2, Some("7"), None);

    cart.update_quantity(&id("P_7"), 3, Some(0));
    assert_eq!(cart.get(&id("P_7")).unwrap().quantity, 3);
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut cart = hydrated_cart(&MemoryStore::new());
    cart.add(&product("P", 6), 2, None, None);
    let before = cart.lines().to_vec();

    assert!(cart.remove(&id("ghost")).is_noop());
    assert!(cart.update_quantity(&id("ghost"), 3, None).is_noop());
    assert!(cart.update_size(&id("ghost"), "L", None).is_noop());
    assert_eq!(cart.lines(), before.as_slice());
}

// =============================================================================
// Selection and checkout
// =============================================================================

#[test]
fn test_removing_selected_line_prunes_selection() {
    let mut cart = hydrated_cart(&MemoryStore::new());
    cart.add(&product("P1", 5), 1, None, None);
    cart.add(&product("P2", 5), 1, None, None);
    cart.select_all();

    cart.remove(&id("P1_default"));

    assert!(!cart.is_selected(&id("P1_default")));
    assert!(cart.is_selected(&id("P2_default")));
    assert_eq!(cart.selection().len(), 1);
}

#[test]
fn test_partial_checkout_flow() {
    let backend = MemoryStore::new();
    let mut engine = hydrated_engine(&backend);
    let cart = engine.cart_mut();
    cart.add(&product("P1", 5), 2, Some("6"), None);
    cart.add(&product("P2", 5), 1, None, None);
    cart.add(&product("P3", 5), 3, None, None);
    cart.toggle_selected(&id("P1_6"));
    cart.toggle_selected(&id("P3_default"));

    let handoff = cart.checkout();
    assert_eq!(handoff.item_count, 5);
    assert_eq!(handoff.total, Decimal::from(5000));
    let ids: Vec<_> = handoff.lines.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["P1_6", "P3_default"]);

    cart.clear_selected();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total(), Decimal::from(1000));
    assert!(cart.selection().is_empty());

    engine.dispose();
    let reopened = hydrated_engine(&backend);
    assert_eq!(reopened.cart().item_count(), 1);
}

#[test]
fn test_selection_carries_across_sessions_to_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let config = CartConfig {
        storage_dir: dir.path().to_path_buf(),
        ..CartConfig::default()
    };
    let session = || {
        let mut engine = CartEngine::open(config.clone());
        engine.init();
        engine
    };

    let mut engine = session();
    engine.cart_mut().add(&product("P1", 5), 2, Some("M"), None);
    engine.cart_mut().add(&product("P2", 5), 1, None, None);
    engine.dispose();

    let mut engine = session();
    assert!(engine.cart_mut().toggle_selected(&id("P1_M")));
    engine.dispose();

    let mut engine = session();
    let handoff = engine.cart().checkout();
    assert_eq!(handoff.lines.len(), 1);
    assert_eq!(handoff.lines.first().unwrap().id, id("P1_M"));
    engine.cart_mut().clear_selected();
    engine.dispose();

    let engine = session();
    assert_eq!(engine.cart().len(), 1);
    assert!(engine.cart().get(&id("P2_default")).is_some());
    assert!(engine.cart().selection().is_empty());
}

// =============================================================================
// Notifications
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_add_notification_dismisses_after_five_seconds() {
    let mut engine = hydrated_engine(&MemoryStore::new());
    let mut rx = engine.cart().notifier().subscribe();

    engine.cart_mut().add(&product("P1", 5), 7, Some("M"), None);
    let shown = rx.borrow_and_update().clone().unwrap();
    assert_eq!(shown.line.quantity, 5);

    tokio::time::sleep(Duration::from_millis(4_900)).await;
    assert!(engine.cart().notifier().current().is_some());

    rx.changed().await.unwrap();
    assert!(rx.borrow().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_manual_close_dismisses_immediately() {
    let mut engine = hydrated_engine(&MemoryStore::new());
    engine.cart_mut().add(&product("P1", 5), 1, None, None);

    engine.cart_mut().close_notification();
    engine.cart_mut().close_notification();
    assert!(engine.cart().notifier().current().is_none());
}
