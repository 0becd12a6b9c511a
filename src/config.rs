// ⚙️ Run configuration - literal sources and target tables

use crate::entities::{
    ACCOUNT_INFORMATION, CREDIT_CARD_INFORMATION, CUSTOMER_INFORMATION, LOAN_INFORMATION,
    TRANSACTION_INFORMATION,
};
use crate::schema::TableSchema;
use std::path::PathBuf;

/// SQLite file created in the working directory
pub const DATABASE_PATH: &str = "datawarehouse.db";

/// Source document for each table, in load order
pub static DEFAULT_SOURCES: [(&str, &TableSchema); 5] = [
    ("https://CustomerInformation.csv", &CUSTOMER_INFORMATION),
    ("https://AccountInformation.csv", &ACCOUNT_INFORMATION),
    ("https://TransactionInformation.csv", &TRANSACTION_INFORMATION),
    ("https://LoanInformation.csv", &LOAN_INFORMATION),
    ("https://CreditCardInformation.csv", &CREDIT_CARD_INFORMATION),
];

/// How one table's rows are committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Each row commits on its own; a failure keeps the rows before it
    #[default]
    RowByRow,
    /// One transaction per table; a failure keeps none of that table's rows
    Transactional,
}

/// One fetch-and-load job
#[derive(Debug, Clone)]
pub struct SourceJob {
    pub source: String,
    pub table: &'static TableSchema,
}

impl SourceJob {
    pub fn new(source: impl Into<String>, table: &'static TableSchema) -> Self {
        SourceJob {
            source: source.into(),
            table,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub database: PathBuf,
    pub mode: LoadMode,
    pub jobs: Vec<SourceJob>,
}

impl Default for EtlConfig {
    fn default() -> Self {
        EtlConfig {
            database: PathBuf::from(DATABASE_PATH),
            mode: LoadMode::default(),
            jobs: DEFAULT_SOURCES
                .iter()
                .map(|(source, table)| SourceJob::new(*source, *table))
                .collect(),
        }
    }
}
