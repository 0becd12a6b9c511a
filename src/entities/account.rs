// 💳 Account Entity - balances, limits, dates, transaction aggregates
// CustomerID points at CustomerInformation by convention only

use super::Record;
use crate::schema::{Column, ColumnType, TableSchema};
use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

const AMOUNT: ColumnType = ColumnType::Decimal { precision: 10, scale: 2 };

pub static ACCOUNT_INFORMATION: TableSchema = TableSchema {
    name: "AccountInformation",
    columns: &[
        Column::key("AccountID"),
        Column::new("CustomerID", ColumnType::Integer),
        Column::new("AccountType", ColumnType::Varchar(50)),
        Column::new("AccountNumber", ColumnType::Varchar(50)),
        Column::new("AccountStatus", ColumnType::Varchar(50)),
        Column::new("Balance", AMOUNT),
        Column::new("CreditLimit", AMOUNT),
        Column::new("OverdraftLimit", AMOUNT),
        Column::new("InterestRate", ColumnType::Decimal { precision: 5, scale: 2 }),
        Column::new("DateOpened", ColumnType::Date),
        Column::new("DateClosed", ColumnType::Date),
        Column::new("MonthlyFee", AMOUNT),
        Column::new("MinimumBalanceRequired", AMOUNT),
        Column::new("LastTransactionDate", ColumnType::Date),
        Column::new("TotalDeposits", AMOUNT),
        Column::new("TotalWithdrawals", AMOUNT),
        Column::new("TotalTransactions", ColumnType::Integer),
    ],
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountInformation {
    #[serde(rename = "AccountID")]
    pub account_id: i64,

    #[serde(rename = "CustomerID", default)]
    pub customer_id: Option<i64>,

    #[serde(rename = "AccountType", default)]
    pub account_type: Option<String>,

    #[serde(rename = "AccountNumber", default)]
    pub account_number: Option<String>,

    #[serde(rename = "AccountStatus", default)]
    pub account_status: Option<String>,

    #[serde(rename = "Balance", default)]
    pub balance: Option<f64>,

    #[serde(rename = "CreditLimit", default)]
    pub credit_limit: Option<f64>,

    #[serde(rename = "OverdraftLimit", default)]
    pub overdraft_limit: Option<f64>,

    #[serde(rename = "InterestRate", default)]
    pub interest_rate: Option<f64>,

    #[serde(rename = "DateOpened", default)]
    pub date_opened: Option<NaiveDate>,

    /// None while the account is open
    #[serde(rename = "DateClosed", default)]
    pub date_closed: Option<NaiveDate>,

    #[serde(rename = "MonthlyFee", default)]
    pub monthly_fee: Option<f64>,

    #[serde(rename = "MinimumBalanceRequired", default)]
    pub minimum_balance_required: Option<f64>,

    #[serde(rename = "LastTransactionDate", default)]
    pub last_transaction_date: Option<NaiveDate>,

    #[serde(rename = "TotalDeposits", default)]
    pub total_deposits: Option<f64>,

    #[serde(rename = "TotalWithdrawals", default)]
    pub total_withdrawals: Option<f64>,

    #[serde(rename = "TotalTransactions", default)]
    pub total_transactions: Option<i64>,
}

impl Record for AccountInformation {
    fn schema() -> &'static TableSchema {
        &ACCOUNT_INFORMATION
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(AccountInformation {
            account_id: row.get("AccountID")?,
            customer_id: row.get("CustomerID")?,
            account_type: row.get("AccountType")?,
            account_number: row.get("AccountNumber")?,
            account_status: row.get("AccountStatus")?,
            balance: row.get("Balance")?,
            credit_limit: row.get("CreditLimit")?,
            overdraft_limit: row.get("OverdraftLimit")?,
            interest_rate: row.get("InterestRate")?,
            date_opened: row.get("DateOpened")?,
            date_closed: row.get("DateClosed")?,
            monthly_fee: row.get("MonthlyFee")?,
            minimum_balance_required: row.get("MinimumBalanceRequired")?,
            last_transaction_date: row.get("LastTransactionDate")?,
            total_deposits: row.get("TotalDeposits")?,
            total_withdrawals: row.get("TotalWithdrawals")?,
            total_transactions: row.get("TotalTransactions")?,
        })
    }
}

