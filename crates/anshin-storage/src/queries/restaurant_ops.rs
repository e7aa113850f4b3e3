//! Read access to approved restaurants, plus the inserts that seed them.

use rusqlite::{params, Connection, OptionalExtension};

use anshin_core::errors::AnshinResult;
use anshin_core::models::RestaurantRef;

use crate::to_storage_err;

fn find_one(conn: &Connection, sql: &str, key: &str) -> AnshinResult<Option<RestaurantRef>> {
    conn.query_row(sql, params![key], |row| {
        Ok(RestaurantRef {
            id: row.get(0)?,
            name: row.get(1)?,
            place_id: row.get(2)?,
        })
    })
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn find_by_place_id(conn: &Connection, place_id: &str) -> AnshinResult<Option<RestaurantRef>> {
    find_one(
        conn,
        "SELECT id, name, place_id FROM restaurants WHERE place_id = ?1 LIMIT 1",
        place_id,
    )
}

/// Exact-name lookup.
pub fn find_by_name(conn: &Connection, name: &str) -> AnshinResult<Option<RestaurantRef>> {
    find_one(
        conn,
        "SELECT id, name, place_id FROM restaurants WHERE name = ?1 ORDER BY rowid LIMIT 1",
        name,
    )
}

pub fn menu_names(conn: &Connection, restaurant_id: &str) -> AnshinResult<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM menus WHERE restaurant_id = ?1 ORDER BY rowid")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![restaurant_id], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn insert_restaurant(
    conn: &Connection,
    id: &str,
    name: &str,
    address: Option<&str>,
    place_id: Option<&str>,
) -> AnshinResult<()> {
    conn.execute(
        "INSERT INTO restaurants (id, name, address, place_id) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, address, place_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn insert_menu(conn: &Connection, id: &str, restaurant_id: &str, name: &str) -> AnshinResult<()> {
    conn.execute(
        "INSERT INTO menus (id, restaurant_id, name) VALUES (?1, ?2, ?3)",
        params![id, restaurant_id, name],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
