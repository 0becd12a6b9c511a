// Data Warehouse ETL - Core Library
// Download CSV sources and append them into the local SQLite warehouse

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use config::{EtlConfig, LoadMode, SourceJob, DATABASE_PATH, DEFAULT_SOURCES};
pub use db::Store;
pub use entities::{
    table_by_name, Record, ALL_TABLES,
    AccountInformation, CreditCardInformation, CustomerInformation, LoanInformation,
    TransactionInformation,
};
pub use error::{EtlError, EtlResult};
pub use fetch::{AnyFetcher, FileFetcher, Fetcher, HttpFetcher};
pub use loader::{append_csv, fetch_and_load, read_records, run, LoadSummary};
pub use schema::{Column, ColumnType, TableSchema};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
