//! Collection job lifecycle rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use anshin_core::errors::{AnshinError, AnshinResult, StorageError};
use anshin_core::models::{JobLogEntry, JobRecord, JobStatus};

use super::{parse_opt_time, parse_time, to_sql_time};
use crate::to_storage_err;

const TABLE: &str = "data_collection_jobs";

pub fn insert_job(conn: &Connection, job: &JobRecord) -> AnshinResult<()> {
    let logs = serde_json::to_string(&job.logs)?;
    conn.execute(
        "INSERT INTO data_collection_jobs
            (id, area_name, municipality_code, status, collected_count, processed_count,
             created_at, completed_at, logs)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            job.id,
            job.area_name,
            job.municipality_code,
            job.status.as_str(),
            job.collected_count,
            job.processed_count,
            to_sql_time(job.created_at),
            job.completed_at.map(to_sql_time),
            logs,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn complete_job(
    conn: &Connection,
    job_id: &str,
    collected: u32,
    processed: u32,
    at: DateTime<Utc>,
) -> AnshinResult<()> {
    let changed = conn
        .execute(
            "UPDATE data_collection_jobs
             SET status = 'completed', collected_count = ?2, processed_count = ?3, completed_at = ?4
             WHERE id = ?1 AND status = 'processing'",
            params![job_id, collected, processed, to_sql_time(at)],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    ensure_transitioned(conn, job_id, changed)
}

/// Mark a processing job failed and append the message to its log.
pub fn fail_job(
    conn: &Connection,
    job_id: &str,
    message: &str,
    at: DateTime<Utc>,
) -> AnshinResult<()> {
    let mut logs = load_logs(conn, job_id)?
        .ok_or_else(|| StorageError::JobNotFound {
            job_id: job_id.to_string(),
        })?;
    logs.push(JobLogEntry {
        time: at,
        msg: message.to_string(),
    });
    let changed = conn
        .execute(
            "UPDATE data_collection_jobs
             SET status = 'failed', completed_at = ?2, logs = ?3
             WHERE id = ?1 AND status = 'processing'",
            params![job_id, to_sql_time(at), serde_json::to_string(&logs)?],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    ensure_transitioned(conn, job_id, changed)
}

pub fn get_job(conn: &Connection, job_id: &str) -> AnshinResult<Option<JobRecord>> {
    let row = conn
        .query_row(
            "SELECT id, area_name, municipality_code, status, collected_count, processed_count,
                    created_at, completed_at, logs
             FROM data_collection_jobs WHERE id = ?1",
            params![job_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, u32>(4)?,
                    row.get::<_, u32>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, Option<String>>(7)?,
                    row.get::<_, String>(8)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((id, area_name, code, status, collected, processed, created, completed, logs)) = row
    else {
        return Ok(None);
    };
    let status = JobStatus::parse(&status).ok_or_else(|| StorageError::CorruptRow {
        table: TABLE.to_string(),
        reason: format!("unknown status {status:?}"),
    })?;
    Ok(Some(JobRecord {
        id,
        area_name,
        municipality_code: code,
        status,
        collected_count: collected,
        processed_count: processed,
        created_at: parse_time(TABLE, &created)?,
        completed_at: parse_opt_time(TABLE, completed)?,
        logs: serde_json::from_str(&logs)?,
    }))
}

fn load_logs(conn: &Connection, job_id: &str) -> AnshinResult<Option<Vec<JobLogEntry>>> {
    let logs: Option<String> = conn
        .query_row(
            "SELECT logs FROM data_collection_jobs WHERE id = ?1",
            params![job_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    logs.map(|l| serde_json::from_str::<Vec<JobLogEntry>>(&l).map_err(AnshinError::from))
        .transpose()
}

/// Terminal states are final: a zero-row update means the job is missing
/// or no longer `processing`.
fn ensure_transitioned(conn: &Connection, job_id: &str, changed: usize) -> AnshinResult<()> {
    if changed > 0 {
        return Ok(());
    }
    let status: Option<String> = conn
        .query_row(
            "SELECT status FROM data_collection_jobs WHERE id = ?1",
            params![job_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let job_id = job_id.to_string();
    Err(match status {
        Some(status) => StorageError::JobAlreadyFinished { job_id, status },
        None => StorageError::JobNotFound { job_id },
    }
    .into())
}
