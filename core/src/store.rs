//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Records are persisted as they arrive (JSON body per row); the engine
//! does its own field probing, so no per-collection schema is imposed.

use crate::error::ReconResult;
use crate::record::string_field;
use crate::source::RecordSource;
use crate::types::Record;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

pub struct ReconStore {
    conn: Connection,
}

impl ReconStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> ReconResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> ReconResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> ReconResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Inserts ────────────────────────────────────────────────

    pub fn insert_settlement_batch(&self, record: &Record) -> ReconResult<()> {
        self.insert("settlement_batch", &["id", "batch_id"], record)
    }

    pub fn insert_sale(&self, record: &Record) -> ReconResult<()> {
        self.insert("sale", &["id"], record)
    }

    pub fn insert_cash_collection(&self, record: &Record) -> ReconResult<()> {
        self.insert("cash_collection", &["id"], record)
    }

    pub fn insert_chargeback(&self, record: &Record) -> ReconResult<()> {
        self.insert("chargeback", &["id"], record)
    }

    fn insert(&self, table: &str, id_fields: &[&str], record: &Record) -> ReconResult<()> {
        let record_id = string_field(record, id_fields)
            .unwrap_or_else(|| format!("anon-{}", Uuid::new_v4()));
        let body = serde_json::to_string(record)?;
        // Table names are fixed literals above, never caller input.
        let sql =
            format!("INSERT OR REPLACE INTO {table} (record_id, body) VALUES (?1, ?2)");
        self.conn.execute(&sql, params![record_id, body])?;
        Ok(())
    }

    // ── Reads ──────────────────────────────────────────────────

    fn list(&self, table: &str) -> ReconResult<Vec<Record>> {
        let sql = format!("SELECT body FROM {table} ORDER BY rowid");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut records = Vec::new();
        for body in rows {
            records.push(serde_json::from_str(&body?)?);
        }
        Ok(records)
    }

    pub fn get_settlement_batch(&self, id: &str) -> ReconResult<Option<Record>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM settlement_batch WHERE record_id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }
}

impl RecordSource for ReconStore {
    fn list_settlement_batches(&self) -> ReconResult<Vec<Record>> {
        self.list("settlement_batch")
    }

    fn retrieve_settlement_batch(&self, id: &str) -> ReconResult<Option<Record>> {
        self.get_settlement_batch(id)
    }

    fn list_sales(&self) -> ReconResult<Vec<Record>> {
        self.list("sale")
    }

    fn list_cash_collections(&self) -> ReconResult<Vec<Record>> {
        self.list("cash_collection")
    }

    fn list_chargebacks(&self) -> ReconResult<Vec<Record>> {
        self.list("chargeback")
    }
}
