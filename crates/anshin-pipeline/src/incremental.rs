//! Incremental update detection against already-approved restaurants.
//!
//! A shop found in the approved set becomes an update carrying only menus
//! the restaurant does not list yet; an update with nothing new is dropped.
//! A shop not found is new and must clear the acceptance filter. Either
//! kind is dropped when the review queue already holds it.

use std::collections::HashSet;
use std::sync::Arc;

use anshin_core::errors::AnshinResult;
use anshin_core::models::RestaurantRef;
use anshin_core::traits::CollectionStore;
use anshin_merge::fingerprint::fold;
use anshin_merge::{MergedShop, UpdateRef};

/// Menu-name comparison key: width-folded, whitespace-free, lowercase.
pub fn menu_key(name: &str) -> String {
    fold::strip_whitespace(&fold::fold_width(name)).to_lowercase()
}

#[derive(Debug, Default)]
pub struct DetectionOutcome {
    pub shops: Vec<MergedShop>,
    pub new_shops: u32,
    pub updates: u32,
    /// Updates whose every menu was already known.
    pub suppressed_updates: usize,
    /// New shops with no valuable menu and low reliability.
    pub below_threshold: usize,
    pub already_queued: usize,
}

pub struct IncrementalDetector {
    store: Arc<dyn CollectionStore>,
    acceptance_threshold: u8,
}

impl IncrementalDetector {
    pub fn new(store: Arc<dyn CollectionStore>, acceptance_threshold: u8) -> Self {
        Self {
            store,
            acceptance_threshold,
        }
    }

    /// Place id first; exact name only when the shop has no place id.
    async fn existing(&self, shop: &MergedShop) -> AnshinResult<Option<RestaurantRef>> {
        match shop.place_id.as_deref() {
            Some(place_id) => self.store.find_restaurant_by_place_id(place_id).await,
            None => self.store.find_restaurant_by_name(&shop.name).await,
        }
    }

    /// New shops need a valuable menu or reliability above the threshold.
    pub fn accepts_new(&self, shop: &MergedShop) -> bool {
        shop.has_valuable_menu() || shop.reliability_score > self.acceptance_threshold
    }

    pub async fn apply(&self, shops: Vec<MergedShop>) -> AnshinResult<DetectionOutcome> {
        let mut outcome = DetectionOutcome::default();

        for mut shop in shops {
            match self.existing(&shop).await? {
                Some(restaurant) => {
                    let known: HashSet<String> = self
                        .store
                        .restaurant_menu_names(&restaurant.id)
                        .await?
                        .iter()
                        .map(|n| menu_key(n))
                        .collect();
                    shop.menus.retain(|m| !known.contains(&menu_key(&m.claim.name)));
                    if shop.menus.is_empty() {
                        tracing::debug!(shop = %shop.name, restaurant = %restaurant.id, "no new menus");
                        outcome.suppressed_updates += 1;
                        continue;
                    }
                    shop.update = Some(UpdateRef {
                        restaurant_id: restaurant.id,
                    });
                }
                None => {
                    if !self.accepts_new(&shop) {
                        outcome.below_threshold += 1;
                        continue;
                    }
                }
            }

            if self
                .store
                .candidate_in_queue(&shop.name, shop.place_id.as_deref())
                .await?
            {
                tracing::debug!(shop = %shop.name, "already in review queue");
                outcome.already_queued += 1;
                continue;
            }

            if shop.is_update() {
                outcome.updates += 1;
            } else {
                outcome.new_shops += 1;
            }
            outcome.shops.push(shop);
        }

        Ok(outcome)
    }
}
