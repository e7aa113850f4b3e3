//! MergedShop → CandidateRecord.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use anshin_core::models::{CandidateMenu, CandidateRecord, CandidateStatus, SystemMetadata};
use anshin_merge::{MergedShop, ScoredMenu};

fn candidate_menu(menu: &ScoredMenu) -> CandidateMenu {
    let removable = menu.allergens_removable();
    let mut tags = menu.claim.tags.clone();
    for allergen in &removable {
        let tag = format!("{}_free", allergen.english());
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    CandidateMenu {
        name: menu.claim.name.trim().to_string(),
        price: menu.claim.price,
        description: menu.claim.description.clone(),
        category: menu.category.clone(),
        allergens_removable: removable,
        value_score: menu.value_score,
        tags,
    }
}

fn system_metadata(shop: &MergedShop) -> SystemMetadata {
    SystemMetadata {
        phone: shop.phone.clone(),
        opening_hours: shop.opening_hours.clone(),
        website_url: shop.website.clone(),
        tags: shop.tags.iter().cloned().collect(),
        features: shop.features.clone(),
        images: shop.images.clone(),
        contamination_level: shop.contamination_level.clone(),
        child_status: shop.child_status.clone(),
        child_details: shop.child_details.clone(),
        place_id: shop.place_id.clone(),
        is_update: shop.is_update(),
        reference_restaurant_id: shop.update.as_ref().map(|u| u.restaurant_id.clone()),
    }
}

/// Build the review-queue row for one accepted shop. Blank names yield
/// `None`: a malformed shop is filtered, never persisted.
pub fn to_candidate(shop: &MergedShop, job_id: &str, now: DateTime<Utc>) -> Option<CandidateRecord> {
    let shop_name = shop.name.trim();
    if shop_name.is_empty() {
        return None;
    }
    Some(CandidateRecord {
        id: Uuid::new_v4().to_string(),
        job_id: job_id.to_string(),
        shop_name: shop_name.to_string(),
        address: shop.address.clone(),
        lat: shop.location.map(|p| p.lat),
        lng: shop.location.map(|p| p.lng),
        menus: shop.menus.iter().map(candidate_menu).collect(),
        sources: shop.sources.clone(),
        metadata: system_metadata(shop),
        reliability_score: shop.reliability_score,
        status: CandidateStatus::Pending,
        created_at: now,
    })
}
