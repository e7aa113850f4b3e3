use chrono::{DateTime, Utc};

/// Step-wise freshness multiplier for a claim collected at `collected_at`.
///
/// | Age            | Multiplier |
/// |----------------|------------|
/// | ≤ 30 days      | 1.0        |
/// | ≤ 90 days      | 0.8        |
/// | ≤ 180 days     | 0.5        |
/// | older          | 0.2        |
/// | unknown        | 0.5        |
pub fn multiplier(collected_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(at) = collected_at else {
        return 0.5;
    };
    let days = (now - at).num_days();
    match days {
        d if d <= 30 => 1.0,
        d if d <= 90 => 0.8,
        d if d <= 180 => 0.5,
        _ => 0.2,
    }
}
