//! `burvon wishlist ...` handlers.

use burvon_cart::{KeyValueStore, WishlistItem, WishlistStore};
use burvon_core::ProductId;

use super::{CliError, ProductArgs, WishlistAction, print_json, print_line};

/// Wishlist entries carry no stock.
fn saved_item(product: ProductArgs) -> WishlistItem {
    WishlistItem::from(&product.into_snapshot(0))
}

/// Run a wishlist subcommand.
///
/// # Errors
///
/// Returns `CliError::NotFound` when removing an unsaved product.
pub fn run<S: KeyValueStore>(
    wishlist: &mut WishlistStore<S>,
    action: WishlistAction,
) -> Result<(), CliError> {
    match action {
        WishlistAction::Add { product } => {
            let item = saved_item(product);
            let id = item.id.clone();
            if wishlist.add(item) {
                print_line(&format!("saved {id}"));
            } else {
                print_line(&format!("{id} already saved"));
            }
        }
        WishlistAction::Remove { product_id } => {
            let id = ProductId::new(product_id);
            if !wishlist.remove(&id) {
                return Err(CliError::NotFound(id.into_inner()));
            }
            print_line(&format!("removed {id}"));
        }
        WishlistAction::Toggle { product } => {
            let item = saved_item(product);
            let id = item.id.clone();
            let state = if wishlist.toggle(item) {
                "saved"
            } else {
                "removed"
            };
            print_line(&format!("{state} {id}"));
        }
        WishlistAction::List => print_json(&wishlist.items())?,
    }
    Ok(())
}
