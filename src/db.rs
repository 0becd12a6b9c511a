// 🗄️ Schema Store - owns the SQLite connection and the five warehouse tables

use crate::entities::{table_by_name, Record, ALL_TABLES};
use crate::error::{EtlError, EtlResult};
use crate::schema::{quote_ident, TableSchema};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

/// Handle to the warehouse database.
///
/// Opened once per run and passed by reference to every load; dropping it
/// (or calling [`Store::close`]) releases the connection.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> EtlResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;

        // Enable WAL mode for crash recovery
        conn.pragma_update(None, "journal_mode", "WAL")?;

        info!(path = %path.display(), "opened warehouse database");
        Ok(Store { conn })
    }

    pub fn open_in_memory() -> EtlResult<Self> {
        Ok(Store {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create every warehouse table that does not exist yet.
    ///
    /// Existing tables and their rows are left untouched.
    pub fn ensure_schema(&self) -> EtlResult<()> {
        for table in ALL_TABLES.iter() {
            self.ensure_table(table)?;
        }
        Ok(())
    }

    pub fn ensure_table(&self, table: &TableSchema) -> EtlResult<()> {
        if self.table_exists(table.name)? {
            debug!(table = table.name, "table already present");
            return Ok(());
        }

        self.conn.execute(&table.create_table_sql(), [])?;
        info!(table = table.name, "created table");
        Ok(())
    }

    pub fn table_exists(&self, name: &str) -> EtlResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        Ok(found.is_some())
    }

    /// Names of all user tables, sorted
    pub fn table_names(&self) -> EtlResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(names)
    }

    pub fn count_rows(&self, table: &str) -> EtlResult<i64> {
        let table = table_by_name(table).ok_or_else(|| EtlError::UnknownTable(table.to_string()))?;

        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_ident(table.name)),
            [],
            |row| row.get(0),
        )?;

        Ok(count)
    }

    /// Read one record back by primary key
    pub fn get<R: Record>(&self, key: i64) -> EtlResult<Option<R>> {
        let table = R::schema();
        let key_column = table
            .primary_key()
            .ok_or_else(|| EtlError::UnknownTable(table.name.to_string()))?;

        let sql = format!(
            "SELECT * FROM {} WHERE {} = ?1",
            quote_ident(table.name),
            quote_ident(key_column.name)
        );

        let record = self
            .conn
            .query_row(&sql, params![key], |row| R::from_row(row))
            .optional()?;

        Ok(record)
    }

    /// Every record of `R`'s table, ordered by primary key
    pub fn all<R: Record>(&self) -> EtlResult<Vec<R>> {
        let table = R::schema();
        let key_column = table
            .primary_key()
            .ok_or_else(|| EtlError::UnknownTable(table.name.to_string()))?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {}",
            quote_ident(table.name),
            quote_ident(key_column.name)
        ))?;

        let records = stmt
            .query_map([], |row| R::from_row(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Release the connection, reporting any error from SQLite
    pub fn close(self) -> EtlResult<()> {
        self.conn.close().map_err(|(_, err)| EtlError::Storage(err))
    }
}
