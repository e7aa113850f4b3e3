//! MergeEngine: owns the fingerprinter and scorer, runs the merge phases.

use chrono::{DateTime, Utc};

use anshin_core::RawSighting;
use anshin_scoring::ValueScorer;

use crate::fingerprint::Fingerprinter;
use crate::pipeline::{self, MergeOutcome};

pub struct MergeEngine {
    fingerprinter: Fingerprinter,
    scorer: ValueScorer,
}

impl MergeEngine {
    pub fn new(fingerprinter: Fingerprinter, scorer: ValueScorer) -> Self {
        Self {
            fingerprinter,
            scorer,
        }
    }

    pub fn fingerprinter(&self) -> &Fingerprinter {
        &self.fingerprinter
    }

    pub fn scorer(&self) -> &ValueScorer {
        &self.scorer
    }

    pub fn merge(&self, sightings: Vec<RawSighting>, now: DateTime<Utc>) -> MergeOutcome {
        pipeline::run_pipeline(sightings, &self.fingerprinter, &self.scorer, now)
    }
}
