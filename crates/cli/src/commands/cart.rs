//! `burvon cart ...` handlers.

use burvon_cart::{CartOutcome, CartStore, KeyValueStore};
use burvon_core::{CurrencyCode, LineId, Price};
use serde::Serialize;

use super::{CartAction, CliError, describe, print_json, print_line};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartSummary {
    lines: usize,
    item_count: u64,
    total: String,
}

/// Currency of the cart, read off its first line.
fn currency<S: KeyValueStore>(cart: &CartStore<S>) -> CurrencyCode {
    cart.lines()
        .first()
        .map_or_else(CurrencyCode::default, |line| CurrencyCode::detect(&line.price))
}

/// Run a cart subcommand.
///
/// # Errors
///
/// Returns `CliError::NotFound` when the line id is not in the cart, or an
/// error if JSON output cannot be encoded.
pub fn run<S: KeyValueStore>(cart: &mut CartStore<S>, action: CartAction) -> Result<(), CliError> {
    match action {
        CartAction::Add {
            product,
            stock,
            quantity,
            size,
            size_stock,
        } => {
            let product = product.into_snapshot(stock);
            let outcome = cart.add(&product, quantity, size.as_deref(), size_stock);
            print_line(&describe(&outcome));
        }
        CartAction::Remove { id } => {
            let id = LineId::new(id);
            report(&cart.remove(&id), &id)?;
        }
        CartAction::Qty {
            id,
            quantity,
            stock,
        } => {
            let id = LineId::new(id);
            report(&cart.update_quantity(&id, quantity, stock), &id)?;
        }
        CartAction::Size { id, size, stock } => {
            let id = LineId::new(id);
            report(&cart.update_size(&id, &size, stock), &id)?;
        }
        CartAction::List => print_json(&cart.lines())?,
        CartAction::Total => print_json(&CartSummary {
            lines: cart.len(),
            item_count: cart.item_count(),
            total: Price::new(cart.total(), currency(cart)).to_string(),
        })?,
        CartAction::Clear => {
            cart.clear();
            print_line("cart cleared");
        }
    }
    Ok(())
}

/// Print the outcome of a mutation on an existing line.
fn report(outcome: &CartOutcome, id: &LineId) -> Result<(), CliError> {
    if matches!(outcome, CartOutcome::NotFound) {
        return Err(CliError::NotFound(id.to_string()));
    }
    print_line(&describe(outcome));
    Ok(())
}
