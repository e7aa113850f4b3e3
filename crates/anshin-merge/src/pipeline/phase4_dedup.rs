use std::collections::HashMap;

use anshin_core::Allergen;

use crate::shop::{MergedShop, ScoredMenu};

/// Collapse menus sharing (name, allergen set), keeping the highest score.
/// Ties keep the earlier item. Returns the number removed.
pub fn dedup_menus(shop: &mut MergedShop) -> usize {
    let before = shop.menus.len();
    let mut best: HashMap<(String, Vec<Allergen>), usize> = HashMap::new();
    let mut kept: Vec<ScoredMenu> = Vec::with_capacity(before);

    for menu in std::mem::take(&mut shop.menus) {
        let key = menu.dedup_key();
        match best.get(&key) {
            Some(&i) => {
                let current = &mut kept[i];
                if menu.value_score > current.value_score {
                    *current = menu;
                }
            }
            None => {
                best.insert(key, kept.len());
                kept.push(menu);
            }
        }
    }

    shop.menus = kept;
    before - shop.menus.len()
}
