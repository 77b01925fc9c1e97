use anyhow::Context;
use chrono::Utc;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Appointment, Client};

pub const APPOINTMENTS_KEY: &str = "appointments";
pub const CLIENTS_KEY: &str = "clients";

// ── Key/value ──

pub fn get_value(conn: &Connection, key: &str) -> anyhow::Result<Option<String>> {
    let result = conn.query_row(
        "SELECT value FROM kv_store WHERE key = ?1",
        params![key],
        |row| row.get::<_, String>(0),
    );

    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn put_value(conn: &Connection, key: &str, value: &str) -> anyhow::Result<()> {
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET
           value = excluded.value,
           updated_at = excluded.updated_at",
        params![key, value, now],
    )?;
    Ok(())
}

fn load_list<T: DeserializeOwned>(conn: &Connection, key: &str) -> anyhow::Result<Vec<T>> {
    match get_value(conn, key)? {
        Some(json) => serde_json::from_str(&json)
            .with_context(|| format!("stored value for '{key}' is not a valid list")),
        None => Ok(Vec::new()),
    }
}

fn save_list<T: Serialize>(conn: &Connection, key: &str, items: &[T]) -> anyhow::Result<()> {
    let json = serde_json::to_string(items)?;
    put_value(conn, key, &json)
}

// ── Appointments ──

pub fn load_appointments(conn: &Connection) -> anyhow::Result<Vec<Appointment>> {
    load_list(conn, APPOINTMENTS_KEY)
}

pub fn save_appointments(conn: &Connection, appointments: &[Appointment]) -> anyhow::Result<()> {
    save_list(conn, APPOINTMENTS_KEY, appointments)
}

// ── Clients ──

pub fn load_clients(conn: &Connection) -> anyhow::Result<Vec<Client>> {
    load_list(conn, CLIENTS_KEY)
}

pub fn save_clients(conn: &Connection, clients: &[Client]) -> anyhow::Result<()> {
    save_list(conn, CLIENTS_KEY, clients)
}
