// 💸 Transaction Entity - amount, date, type per account

use super::Record;
use crate::schema::{Column, ColumnType, TableSchema};
use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

pub static TRANSACTION_INFORMATION: TableSchema = TableSchema {
    name: "TransactionInformation",
    columns: &[
        Column::key("TransactionID"),
        Column::new("AccountID", ColumnType::Integer),
        Column::new("TransactionDate", ColumnType::Date),
        Column::new("TransactionAmount", ColumnType::Decimal { precision: 10, scale: 2 }),
        Column::new("TransactionType", ColumnType::Varchar(50)),
    ],
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionInformation {
    #[serde(rename = "TransactionID")]
    pub transaction_id: i64,

    #[serde(rename = "AccountID", default)]
    pub account_id: Option<i64>,

    #[serde(rename = "TransactionDate", default)]
    pub transaction_date: Option<NaiveDate>,

    #[serde(rename = "TransactionAmount", default)]
    pub transaction_amount: Option<f64>,

    #[serde(rename = "TransactionType", default)]
    pub transaction_type: Option<String>,
}

impl Record for TransactionInformation {
    fn schema() -> &'static TableSchema {
        &TRANSACTION_INFORMATION
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TransactionInformation {
            transaction_id: row.get("TransactionID")?,
            account_id: row.get("AccountID")?,
            transaction_date: row.get("TransactionDate")?,
            transaction_amount: row.get("TransactionAmount")?,
            transaction_type: row.get("TransactionType")?,
        })
    }
}
