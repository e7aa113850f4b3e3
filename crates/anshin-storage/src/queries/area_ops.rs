//! Municipality master rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use anshin_core::constants::MESH_MUNICIPALITY_CODE;
use anshin_core::errors::AnshinResult;
use anshin_core::models::{AreaRecord, CollectionTarget};

use super::{parse_opt_time, to_sql_time};
use crate::to_storage_err;

const TABLE: &str = "master_municipalities";

/// Areas never collected or last collected before `cutoff`, oldest code
/// first. The mesh bookkeeping row is never returned.
pub fn uncollected(
    conn: &Connection,
    cutoff: DateTime<Utc>,
    limit: usize,
) -> AnshinResult<Vec<AreaRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT code, prefecture, name, last_collected_at FROM master_municipalities
             WHERE code != ?1 AND (last_collected_at IS NULL OR last_collected_at < ?2)
             ORDER BY code
             LIMIT ?3",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![MESH_MUNICIPALITY_CODE, to_sql_time(cutoff), limit as i64],
            map_row,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect_rows(rows)
}

pub fn get(conn: &Connection, code: &str) -> AnshinResult<Option<AreaRecord>> {
    let row = conn
        .query_row(
            "SELECT code, prefecture, name, last_collected_at FROM master_municipalities
             WHERE code = ?1",
            params![code],
            map_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(into_record).transpose()
}

pub fn upsert(conn: &Connection, area: &AreaRecord) -> AnshinResult<()> {
    conn.execute(
        "INSERT INTO master_municipalities (code, prefecture, name, last_collected_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(code) DO UPDATE SET
            prefecture = excluded.prefecture,
            name = excluded.name,
            last_collected_at = excluded.last_collected_at",
        params![
            area.code,
            area.prefecture,
            area.name,
            area.last_collected_at.map(to_sql_time),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Stamp the area a job collected for. Coded areas match by code, uncoded
/// ones by name (bare or prefixed with the prefecture); spatial jobs stamp
/// the mesh row, creating it on first use.
pub fn mark_collected(
    conn: &Connection,
    target: &CollectionTarget,
    at: DateTime<Utc>,
) -> AnshinResult<usize> {
    let at = to_sql_time(at);
    let changed = match target {
        CollectionTarget::Area {
            municipality_code: Some(code),
            ..
        } => conn.execute(
            "UPDATE master_municipalities SET last_collected_at = ?2 WHERE code = ?1",
            params![code, at],
        ),
        CollectionTarget::Area { name, .. } => conn.execute(
            "UPDATE master_municipalities SET last_collected_at = ?2
             WHERE name = ?1 OR (prefecture || ' ' || name) = ?1",
            params![name, at],
        ),
        CollectionTarget::Spatial { .. } => conn.execute(
            "INSERT INTO master_municipalities (code, prefecture, name, last_collected_at)
             VALUES (?1, '', 'mesh sweep', ?2)
             ON CONFLICT(code) DO UPDATE SET last_collected_at = excluded.last_collected_at",
            params![MESH_MUNICIPALITY_CODE, at],
        ),
    }
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed)
}

type RawArea = (String, String, String, Option<String>);

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawArea> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn into_record((code, prefecture, name, last): RawArea) -> AnshinResult<AreaRecord> {
    Ok(AreaRecord {
        code,
        prefecture,
        name,
        last_collected_at: parse_opt_time(TABLE, last)?,
    })
}

fn collect_rows(
    rows: impl Iterator<Item = rusqlite::Result<RawArea>>,
) -> AnshinResult<Vec<AreaRecord>> {
    let mut out = Vec::new();
    for row in rows {
        out.push(into_record(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(out)
}
