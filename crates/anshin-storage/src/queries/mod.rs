pub mod area_ops;
pub mod candidate_ops;
pub mod job_ops;
pub mod restaurant_ops;
pub mod snapshot_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use anshin_core::errors::{AnshinResult, StorageError};

/// Timestamps are stored as fixed-width RFC 3339 text so they sort lexically.
pub(crate) fn to_sql_time(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_time(table: &str, value: &str) -> AnshinResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::CorruptRow {
                table: table.to_string(),
                reason: format!("bad timestamp {value:?}: {e}"),
            }
            .into()
        })
}

pub(crate) fn parse_opt_time(
    table: &str,
    value: Option<String>,
) -> AnshinResult<Option<DateTime<Utc>>> {
    value.map(|v| parse_time(table, &v)).transpose()
}
