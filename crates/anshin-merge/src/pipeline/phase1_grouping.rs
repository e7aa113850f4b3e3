use std::collections::HashMap;

use tracing::debug;

use anshin_core::RawSighting;

use crate::fingerprint::Fingerprinter;
use crate::shop::MergedShop;

pub struct Grouped {
    pub shops: Vec<MergedShop>,
    pub blank_names: usize,
}

/// A sighting joins a shop only when their place ids do not disagree.
fn same_place(shop: &MergedShop, sighting: &RawSighting) -> bool {
    let theirs = sighting.place_id.as_deref().map(str::trim).filter(|p| !p.is_empty());
    match (shop.place_id.as_deref(), theirs) {
        (Some(ours), Some(theirs)) => ours == theirs,
        _ => true,
    }
}

/// Fold sightings into one shop per fingerprint, in first-seen order.
///
/// Sightings that share a fingerprint but carry different place ids are
/// distinct branches and stay separate shops.
pub fn group(sightings: Vec<RawSighting>, fingerprinter: &Fingerprinter) -> Grouped {
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    let mut shops: Vec<MergedShop> = Vec::new();
    let mut blank_names = 0usize;

    for sighting in sightings {
        if sighting.shop_name.trim().is_empty() {
            blank_names += 1;
            debug!(source = %sighting.source.source_type, "dropping sighting without a name");
            continue;
        }
        let fp = fingerprinter.fingerprint(&sighting.shop_name, sighting.address.as_deref());
        let slots = index.entry(fp.clone()).or_default();
        match slots.iter().copied().find(|&i| same_place(&shops[i], &sighting)) {
            Some(i) => shops[i].absorb(sighting),
            None => {
                slots.push(shops.len());
                shops.push(MergedShop::from_sighting(fp, sighting));
            }
        }
    }

    Grouped { shops, blank_names }
}
