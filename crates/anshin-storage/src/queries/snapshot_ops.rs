//! Raw audit snapshots of collected sightings.

use rusqlite::{params, Connection};

use anshin_core::errors::AnshinResult;
use anshin_core::models::RawSnapshot;

use crate::to_storage_err;

/// Insert all snapshots in one transaction.
pub fn insert_snapshots(conn: &Connection, rows: &[RawSnapshot]) -> AnshinResult<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO raw_collected_data (job_id, source_type, source_url, raw_data)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            stmt.execute(params![
                row.job_id,
                row.source_type.as_str(),
                row.source_url,
                serde_json::to_string(&row.raw_data)?,
            ])
            .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows.len())
}

pub fn count_for_job(conn: &Connection, job_id: &str) -> AnshinResult<usize> {
    conn.query_row(
        "SELECT COUNT(*) FROM raw_collected_data WHERE job_id = ?1",
        params![job_id],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}
