//! `burvon select ...` and `burvon checkout` handlers.

use burvon_cart::{CartStore, KeyValueStore};
use burvon_core::LineId;
use tracing::info;

use super::{CliError, SelectAction, print_json, print_line};

/// Run a selection subcommand.
///
/// # Errors
///
/// Returns `CliError::NotFound` when toggling an unknown line.
pub fn run<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    action: SelectAction,
) -> Result<(), CliError> {
    match action {
        SelectAction::Toggle { id } => {
            let id = LineId::new(id);
            if cart.get(&id).is_none() {
                return Err(CliError::NotFound(id.to_string()));
            }
            let state = if cart.toggle_selected(&id) {
                "selected"
            } else {
                "deselected"
            };
            print_line(&format!("{state} {id}"));
        }
        SelectAction::All => {
            cart.select_all();
            print_line(&format!("selected {} lines", cart.selection().len()));
        }
        SelectAction::Clear => {
            cart.deselect_all();
            print_line("selection cleared");
        }
        SelectAction::List => print_json(&cart.checkout())?,
    }
    Ok(())
}

/// Print the checkout hand-off and remove the selected lines.
///
/// The CLI stands in for the checkout service, so submission always
/// succeeds.
///
/// # Errors
///
/// Returns an error if the hand-off cannot be encoded; the cart is left
/// untouched in that case.
pub fn checkout<S: KeyValueStore>(cart: &mut CartStore<S>) -> Result<(), CliError> {
    let handoff = cart.checkout();
    if handoff.lines.is_empty() {
        print_line("nothing selected");
        return Ok(());
    }

    print_json(&handoff)?;
    let removed = cart.clear_selected();
    info!(lines = removed.len(), "Checkout handed off");
    Ok(())
}
