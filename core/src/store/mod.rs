//! SQLite warehouse access layer.
//!
//! RULE: Only store/ talks to the database.
//! The catalog calls store methods: it never executes SQL directly.
//! Every report method is a single read-only statement.

use crate::{
    error::{PulseError, PulseResult},
    report::{ReportResult, Value},
    schema,
    types::Year,
};
use rusqlite::{Connection, OpenFlags, Params};

mod devices;
mod engagement;
mod insurance;
mod market;
mod transactions;
mod warehouse;

pub struct PulseStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl PulseStore {
    /// Open an existing warehouse read-only.
    /// A missing or unreadable file is a connectivity failure.
    pub fn open(path: &str) -> PulseResult<Self> {
        let store = Self::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
        )?;
        log::info!("store opened read-only at {path}");
        Ok(store)
    }

    /// Open (or create) a warehouse for loading fixtures or upstream data.
    pub fn open_writable(path: &str) -> PulseResult<Self> {
        Self::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PulseResult<Self> {
        let conn = Connection::open_in_memory().map_err(|source| PulseError::Connectivity {
            location: ":memory:".into(),
            source,
        })?;
        Ok(Self { conn, path: None })
    }

    fn open_with_flags(path: &str, flags: OpenFlags) -> PulseResult<Self> {
        let connectivity = |source| PulseError::Connectivity {
            location: path.to_string(),
            source,
        };
        let conn = Connection::open_with_flags(path, flags).map_err(connectivity)?;
        // SQLite opens lazily; touch the header so a non-database file fails here.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(connectivity)?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Location this store was opened from, `None` for in-memory stores.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Apply the warehouse DDL. Idempotent.
    pub fn migrate(&self) -> PulseResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_warehouse.sql"))?;
        log::info!("warehouse schema applied ({} tables)", schema::TABLES.len());
        Ok(())
    }

    // ── Generic execution ──────────────────────────────────────

    /// Run one aggregation statement and collect the complete result set.
    /// Column names come from the statement, in select-list order.
    pub(crate) fn query_report<P: Params>(&self, sql: &str, params: P) -> PulseResult<ReportResult> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();
        let mut result = ReportResult::new(columns);

        let mut rows = stmt.query(params)?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(Value::from(row.get_ref(i)?));
            }
            result.push_row(values);
        }
        Ok(result)
    }

    // ── Warehouse metadata ─────────────────────────────────────

    /// Most recent year present in `table`, or `None` if it is empty.
    pub fn latest_year(&self, table: &str) -> PulseResult<Option<Year>> {
        let table = known_table(table)?;
        let year: Option<Year> = self.conn.query_row(
            &format!("SELECT MAX(Year) FROM {table}"),
            [],
            |row| row.get(0),
        )?;
        Ok(year)
    }

    pub fn row_count(&self, table: &str) -> PulseResult<i64> {
        let table = known_table(table)?;
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {table}"),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

/// Numbered placeholder list `?start, ?start+1, ...` for an `IN (...)` clause.
/// An empty list renders as `NULL`, which matches nothing.
pub(crate) fn placeholders(start: usize, count: usize) -> String {
    if count == 0 {
        return "NULL".into();
    }
    (start..start + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Table names are interpolated into SQL, so only schema tables pass.
fn known_table(table: &str) -> PulseResult<&'static str> {
    schema::TABLES
        .iter()
        .copied()
        .find(|t| *t == table)
        .ok_or_else(|| {
            PulseError::Query(rusqlite::Error::InvalidParameterName(table.to_string()))
        })
}
