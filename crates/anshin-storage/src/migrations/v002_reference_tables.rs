//! v002: approved restaurants and menus, municipality master.

use rusqlite::Connection;

use anshin_core::errors::AnshinResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AnshinResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS restaurants (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            address     TEXT,
            place_id    TEXT UNIQUE,
            lat         REAL,
            lng         REAL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_restaurants_name ON restaurants(name);

        CREATE TABLE IF NOT EXISTS menus (
            id             TEXT PRIMARY KEY,
            restaurant_id  TEXT NOT NULL,
            name           TEXT NOT NULL,
            created_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            FOREIGN KEY (restaurant_id) REFERENCES restaurants(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_menus_restaurant ON menus(restaurant_id);

        CREATE TABLE IF NOT EXISTS master_municipalities (
            code               TEXT PRIMARY KEY,
            prefecture         TEXT NOT NULL DEFAULT '',
            name               TEXT NOT NULL,
            last_collected_at  TEXT
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
