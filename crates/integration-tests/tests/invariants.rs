//! Property tests: cart invariants hold after any operation sequence.

use std::collections::HashSet;

use burvon_cart::{CartStore, MemoryStore};
use burvon_core::LineId;
use burvon_integration_tests::{hydrated_cart, product};
use proptest::prelude::*;

const PRODUCTS: [&str; 3] = ["P1", "P2", "P3"];
const SIZES: [Option<&str>; 3] = [None, Some("S"), Some("L")];

#[derive(Debug, Clone)]
enum Op {
    Add {
        product: usize,
        stock: u32,
        quantity: u32,
        size: usize,
        size_stock: Option<u32>,
    },
    Remove(usize, usize),
    UpdateQuantity(usize, usize, u32, Option<u32>),
    UpdateSize(usize, usize, usize, Option<u32>),
    Toggle(usize, usize),
    SelectAll,
    ClearSelected,
    Clear,
}

fn line_id(product: usize, size: usize) -> LineId {
    let product = burvon_core::ProductId::new(PRODUCTS[product % PRODUCTS.len()]);
    LineId::compose(&product, SIZES[size % SIZES.len()])
}

fn op() -> impl Strategy<Value = Op> {
    let idx = 0usize..3;
    prop_oneof![
        4 => (idx.clone(), 0u32..8, 0u32..12, idx.clone(), proptest::option::of(0u32..8)).prop_map(
            |(product, stock, quantity, size, size_stock)| Op::Add {
                product,
                stock,
                quantity,
                size,
                size_stock,
            }
        ),
        1 => (idx.clone(), idx.clone()).prop_map(|(p, s)| Op::Remove(p, s)),
        2 => (idx.clone(), idx.clone(), 0u32..12, proptest::option::of(0u32..8))
            .prop_map(|(p, s, q, l)| Op::UpdateQuantity(p, s, q, l)),
        2 => (idx.clone(), idx.clone(), idx.clone(), proptest::option::of(0u32..8))
            .prop_map(|(p, s, to, l)| Op::UpdateSize(p, s, to, l)),
        2 => (idx.clone(), idx).prop_map(|(p, s)| Op::Toggle(p, s)),
        1 => Just(Op::SelectAll),
        1 => Just(Op::ClearSelected),
        1 => Just(Op::Clear),
    ]
}

fn apply(cart: &mut CartStore<MemoryStore>, op: &Op) {
    match *op {
        Op::Add {
            product: p,
            stock,
            quantity,
            size,
            size_stock,
        } => {
            let snapshot = product(PRODUCTS[p], stock);
            cart.add(&snapshot, quantity, SIZES[size], size_stock);
        }
        Op::Remove(p, s) => {
            cart.remove(&line_id(p, s));
        }
        Op::UpdateQuantity(p, s, q, limit) => {
            cart.update_quantity(&line_id(p, s), q, limit);
        }
        Op::UpdateSize(p, s, to, limit) => {
            let size = SIZES[to].unwrap_or("default");
            cart.update_size(&line_id(p, s), size, limit);
        }
        Op::Toggle(p, s) => {
            cart.toggle_selected(&line_id(p, s));
        }
        Op::SelectAll => cart.select_all(),
        Op::ClearSelected => {
            cart.clear_selected();
        }
        Op::Clear => cart.clear(),
    }
}

fn assert_invariants(cart: &CartStore<MemoryStore>) -> Result<(), TestCaseError> {
    let mut ids = HashSet::new();
    for line in cart.lines() {
        prop_assert!(line.quantity > 0, "zero quantity on {}", line.id);
        prop_assert!(
            line.quantity <= line.stock,
            "{} has {} > stock {}",
            line.id,
            line.quantity,
            line.stock
        );
        prop_assert!(ids.insert(line.id.clone()), "duplicate id {}", line.id);
    }
    for selected in cart.selection().iter() {
        prop_assert!(ids.contains(selected), "dangling selection {selected}");
    }
    Ok(())
}

proptest! {
    #[test]
    fn cart_invariants_hold(ops in prop::collection::vec(op(), 0..60)) {
        let mut cart = hydrated_cart(&MemoryStore::new());
        for op in &ops {
            apply(&mut cart, op);
            assert_invariants(&cart)?;
        }
    }

    #[test]
    fn persisted_state_round_trips(ops in prop::collection::vec(op(), 0..40)) {
        let backend = MemoryStore::new();
        let mut cart = hydrated_cart(&backend);
        for op in &ops {
            apply(&mut cart, op);
        }

        let reloaded = hydrated_cart(&backend);
        prop_assert_eq!(reloaded.lines(), cart.lines());
        prop_assert_eq!(reloaded.selection(), cart.selection());
    }

    #[test]
    fn item_count_matches_quantities(ops in prop::collection::vec(op(), 0..40)) {
        let mut cart = hydrated_cart(&MemoryStore::new());
        for op in &ops {
            apply(&mut cart, op);
        }
        let expected: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
        prop_assert_eq!(cart.item_count(), expected);
    }
}
