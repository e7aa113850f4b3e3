//! Review-queue candidates.

use rusqlite::{params, Connection};

use anshin_core::errors::{AnshinResult, StorageError};
use anshin_core::models::{CandidateRecord, CandidateStatus};

use super::{parse_time, to_sql_time};
use crate::to_storage_err;

const TABLE: &str = "candidate_restaurants";

/// Insert every candidate of a job atomically: either all rows land or none.
pub fn insert_candidates(conn: &Connection, rows: &[CandidateRecord]) -> AnshinResult<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO candidate_restaurants
                    (id, job_id, shop_name, address, lat, lng, place_id, menus, sources,
                     reliability_score, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            stmt.execute(params![
                row.id,
                row.job_id,
                row.shop_name,
                row.address,
                row.lat,
                row.lng,
                row.metadata.place_id,
                serde_json::to_string(&row.menus)?,
                serde_json::to_string(&row.sources_json())?,
                row.reliability_score,
                row.status.as_str(),
                to_sql_time(row.created_at),
            ])
            .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows.len())
}

/// A pending or approved candidate already carries this place id, or this
/// exact shop name.
pub fn in_queue(conn: &Connection, shop_name: &str, place_id: Option<&str>) -> AnshinResult<bool> {
    let found: i64 = conn
        .query_row(
            "SELECT EXISTS (
                SELECT 1 FROM candidate_restaurants
                WHERE status IN ('pending', 'approved')
                  AND ((?2 IS NOT NULL AND place_id = ?2) OR shop_name = ?1)
             )",
            params![shop_name, place_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(found != 0)
}

pub fn list_for_job(conn: &Connection, job_id: &str) -> AnshinResult<Vec<CandidateRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, job_id, shop_name, address, lat, lng, menus, sources,
                    reliability_score, status, created_at
             FROM candidate_restaurants WHERE job_id = ?1 ORDER BY rowid",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![job_id], |row| {
            Ok(RawCandidateRow {
                id: row.get(0)?,
                job_id: row.get(1)?,
                shop_name: row.get(2)?,
                address: row.get(3)?,
                lat: row.get(4)?,
                lng: row.get(5)?,
                menus: row.get(6)?,
                sources: row.get(7)?,
                reliability_score: row.get(8)?,
                status: row.get(9)?,
                created_at: row.get(10)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let row = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(row.into_record()?);
    }
    Ok(out)
}

struct RawCandidateRow {
    id: String,
    job_id: String,
    shop_name: String,
    address: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    menus: String,
    sources: String,
    reliability_score: u8,
    status: String,
    created_at: String,
}

impl RawCandidateRow {
    fn into_record(self) -> AnshinResult<CandidateRecord> {
        let sources: serde_json::Value = serde_json::from_str(&self.sources)?;
        let (citations, metadata) = CandidateRecord::split_sources(&sources)?;
        let status = match self.status.as_str() {
            "pending" => CandidateStatus::Pending,
            "approved" => CandidateStatus::Approved,
            "rejected" => CandidateStatus::Rejected,
            other => {
                return Err(StorageError::CorruptRow {
                    table: TABLE.to_string(),
                    reason: format!("unknown status {other:?}"),
                }
                .into())
            }
        };
        Ok(CandidateRecord {
            id: self.id,
            job_id: self.job_id,
            shop_name: self.shop_name,
            address: self.address,
            lat: self.lat,
            lng: self.lng,
            menus: serde_json::from_str(&self.menus)?,
            sources: citations,
            metadata,
            reliability_score: self.reliability_score,
            status,
            created_at: parse_time(TABLE, &self.created_at)?,
        })
    }
}
