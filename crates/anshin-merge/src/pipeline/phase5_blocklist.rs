use tracing::trace;

use anshin_scoring::is_blocked;

use crate::shop::MergedShop;

/// Drop generic menu names unless the item carries an allergen-free tag
/// or a non-empty removable-on-request set. Returns the number removed.
pub fn filter_blocked(shop: &mut MergedShop) -> usize {
    let before = shop.menus.len();
    shop.menus.retain(|m| {
        let keep = !is_blocked(&m.claim.name)
            || m.has_allergen_free_tag()
            || !m.removable_on_request.is_empty();
        if !keep {
            trace!(menu = %m.claim.name, "blocked generic menu");
        }
        keep
    });
    before - shop.menus.len()
}
