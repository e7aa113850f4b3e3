//! v001: jobs, raw snapshots, candidate review queue.

use rusqlite::Connection;

use anshin_core::errors::AnshinResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AnshinResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS data_collection_jobs (
            id                 TEXT PRIMARY KEY,
            area_name          TEXT NOT NULL,
            municipality_code  TEXT,
            status             TEXT NOT NULL
                               CHECK (status IN ('processing', 'completed', 'failed')),
            collected_count    INTEGER NOT NULL DEFAULT 0,
            processed_count    INTEGER NOT NULL DEFAULT 0,
            created_at         TEXT NOT NULL,
            completed_at       TEXT,
            logs               TEXT NOT NULL DEFAULT '[]'
        );

        CREATE INDEX IF NOT EXISTS idx_jobs_status ON data_collection_jobs(status);

        CREATE TABLE IF NOT EXISTS raw_collected_data (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id       TEXT NOT NULL,
            source_type  TEXT NOT NULL,
            source_url   TEXT,
            raw_data     TEXT NOT NULL,
            created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            FOREIGN KEY (job_id) REFERENCES data_collection_jobs(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_raw_job ON raw_collected_data(job_id);

        CREATE TABLE IF NOT EXISTS candidate_restaurants (
            id                 TEXT PRIMARY KEY,
            job_id             TEXT NOT NULL,
            shop_name          TEXT NOT NULL,
            address            TEXT,
            lat                REAL,
            lng                REAL,
            place_id           TEXT,
            menus              TEXT NOT NULL DEFAULT '[]',
            sources            TEXT NOT NULL DEFAULT '[]',
            reliability_score  INTEGER NOT NULL DEFAULT 0,
            status             TEXT NOT NULL DEFAULT 'pending'
                               CHECK (status IN ('pending', 'approved', 'rejected')),
            created_at         TEXT NOT NULL,
            FOREIGN KEY (job_id) REFERENCES data_collection_jobs(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_candidates_job ON candidate_restaurants(job_id);
        CREATE INDEX IF NOT EXISTS idx_candidates_status ON candidate_restaurants(status);
        CREATE INDEX IF NOT EXISTS idx_candidates_name ON candidate_restaurants(shop_name);
        CREATE INDEX IF NOT EXISTS idx_candidates_place ON candidate_restaurants(place_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
