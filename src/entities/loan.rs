// 🏦 Loan Entity - amounts, status, applicant income

use super::Record;
use crate::schema::{Column, ColumnType, TableSchema};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

pub static LOAN_INFORMATION: TableSchema = TableSchema {
    name: "LoanInformation",
    columns: &[
        Column::key("LoanID"),
        Column::new("CustomerID", ColumnType::Integer),
        Column::new("Dependents", ColumnType::Integer),
        Column::new("Education", ColumnType::Varchar(50)),
        Column::new("LoanAmount", ColumnType::Decimal { precision: 10, scale: 2 }),
        Column::new("LoanType", ColumnType::Varchar(50)),
        Column::new("LoanTerm", ColumnType::Varchar(50)),
        Column::new("Collateral", ColumnType::Varchar(50)),
        Column::new("LoanStatus", ColumnType::Varchar(50)),
        Column::new("Applicant_income", ColumnType::Integer),
        Column::new("Coapplicant_income", ColumnType::Integer),
    ],
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoanInformation {
    #[serde(rename = "LoanID")]
    pub loan_id: i64,

    #[serde(rename = "CustomerID", default)]
    pub customer_id: Option<i64>,

    #[serde(rename = "Dependents", default)]
    pub dependents: Option<i64>,

    #[serde(rename = "Education", default)]
    pub education: Option<String>,

    #[serde(rename = "LoanAmount", default)]
    pub loan_amount: Option<f64>,

    #[serde(rename = "LoanType", default)]
    pub loan_type: Option<String>,

    /// Free text in the source feed (e.g. "36 months")
    #[serde(rename = "LoanTerm", default)]
    pub loan_term: Option<String>,

    #[serde(rename = "Collateral", default)]
    pub collateral: Option<String>,

    #[serde(rename = "LoanStatus", default)]
    pub loan_status: Option<String>,

    #[serde(rename = "Applicant_income", default)]
    pub applicant_income: Option<i64>,

    #[serde(rename = "Coapplicant_income", default)]
    pub coapplicant_income: Option<i64>,
}

impl Record for LoanInformation {
    fn schema() -> &'static TableSchema {
        &LOAN_INFORMATION
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(LoanInformation {
            loan_id: row.get("LoanID")?,
            customer_id: row.get("CustomerID")?,
            dependents: row.get("Dependents")?,
            education: row.get("Education")?,
            loan_amount: row.get("LoanAmount")?,
            loan_type: row.get("LoanType")?,
            loan_term: row.get("LoanTerm")?,
            collateral: row.get("Collateral")?,
            loan_status: row.get("LoanStatus")?,
            applicant_income: row.get("Applicant_income")?,
            coapplicant_income: row.get("Coapplicant_income")?,
        })
    }
}

