// 💳 Credit Card Entity - limit, balance, status, application date

use super::Record;
use crate::schema::{Column, ColumnType, TableSchema};
use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

const AMOUNT: ColumnType = ColumnType::Decimal { precision: 10, scale: 2 };

pub static CREDIT_CARD_INFORMATION: TableSchema = TableSchema {
    name: "CreditCardInformation",
    columns: &[
        Column::key("CreditCardID"),
        Column::new("CustomerID", ColumnType::Integer),
        Column::new("CreditLimit", AMOUNT),
        Column::new("Balance", AMOUNT),
        Column::new("CreditCardStatus", ColumnType::Varchar(50)),
        Column::new("CreditCardApplicationDate", ColumnType::Date),
    ],
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreditCardInformation {
    #[serde(rename = "CreditCardID")]
    pub credit_card_id: i64,

    #[serde(rename = "CustomerID", default)]
    pub customer_id: Option<i64>,

    #[serde(rename = "CreditLimit", default)]
    pub credit_limit: Option<f64>,

    #[serde(rename = "Balance", default)]
    pub balance: Option<f64>,

    #[serde(rename = "CreditCardStatus", default)]
    pub credit_card_status: Option<String>,

    #[serde(rename = "CreditCardApplicationDate", default)]
    pub credit_card_application_date: Option<NaiveDate>,
}

impl Record for CreditCardInformation {
    fn schema() -> &'static TableSchema {
        &CREDIT_CARD_INFORMATION
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(CreditCardInformation {
            credit_card_id: row.get("CreditCardID")?,
            customer_id: row.get("CustomerID")?,
            credit_limit: row.get("CreditLimit")?,
            balance: row.get("Balance")?,
            credit_card_status: row.get("CreditCardStatus")?,
            credit_card_application_date: row.get("CreditCardApplicationDate")?,
        })
    }
}

