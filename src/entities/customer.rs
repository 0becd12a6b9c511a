// 👤 Customer Entity - demographics + credit-bureau attributes

use super::Record;
use crate::schema::{Column, ColumnType, TableSchema};
use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

const PERCENT: ColumnType = ColumnType::Decimal { precision: 5, scale: 2 };
const AMOUNT: ColumnType = ColumnType::Decimal { precision: 10, scale: 2 };

pub static CUSTOMER_INFORMATION: TableSchema = TableSchema {
    name: "CustomerInformation",
    columns: &[
        Column::key("CustomerID"),
        Column::new("Name", ColumnType::Varchar(100)),
        Column::new("DateOfBirth", ColumnType::Date),
        Column::new("Gender", ColumnType::Varchar(10)),
        Column::new("Address", ColumnType::Varchar(255)),
        Column::new("City", ColumnType::Varchar(50)),
        Column::new("State", ColumnType::Varchar(50)),
        Column::new("PinCode", ColumnType::Varchar(10)),
        Column::new("DefaultStatus", ColumnType::Integer),
        Column::new("BankruptcyIndicator", ColumnType::Integer),
        Column::new("CreditInquiriesPast6Months", ColumnType::Integer),
        Column::new("MonthsSinceLastInquiry", ColumnType::Integer),
        Column::new("PercentageOpenAccounts", PERCENT),
        Column::new("PercentageOpenAccountsPast24Months", PERCENT),
        Column::new("TotalOpenAccounts", ColumnType::Integer),
        Column::new("TotalCreditLimitSum", AMOUNT),
        Column::new("MaxCreditLimit", AMOUNT),
        Column::new("PercentageHighBalanceAccounts", PERCENT),
        Column::new("PercentageSatisfiedAccounts", PERCENT),
        Column::new("BadDerogatoryMarksCount", ColumnType::Integer),
        Column::new("SatisfiedAccountsCount", ColumnType::Integer),
        Column::new("MonthsSinceFirstCreditAccount", ColumnType::Integer),
        Column::new("MonthsSinceLastCreditAccount", ColumnType::Integer),
        Column::new("DelinquentAccounts30To60DaysPast24Months", ColumnType::Integer),
        Column::new("DelinquentAccounts90DaysPast24Months", ColumnType::Integer),
        Column::new("TotalDelinquentAccounts60Days", ColumnType::Integer),
    ],
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomerInformation {
    #[serde(rename = "CustomerID")]
    pub customer_id: i64,

    // ========================================================================
    // DEMOGRAPHICS
    // ========================================================================
    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "DateOfBirth", default)]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,

    #[serde(rename = "Address", default)]
    pub address: Option<String>,

    #[serde(rename = "City", default)]
    pub city: Option<String>,

    #[serde(rename = "State", default)]
    pub state: Option<String>,

    #[serde(rename = "PinCode", default)]
    pub pin_code: Option<String>,

    // ========================================================================
    // CREDIT BUREAU
    // ========================================================================
    /// 1 when the customer has defaulted
    #[serde(rename = "DefaultStatus", default)]
    pub default_status: Option<i64>,

    #[serde(rename = "BankruptcyIndicator", default)]
    pub bankruptcy_indicator: Option<i64>,

    #[serde(rename = "CreditInquiriesPast6Months", default)]
    pub credit_inquiries_past_6_months: Option<i64>,

    #[serde(rename = "MonthsSinceLastInquiry", default)]
    pub months_since_last_inquiry: Option<i64>,

    #[serde(rename = "PercentageOpenAccounts", default)]
    pub percentage_open_accounts: Option<f64>,

    #[serde(rename = "PercentageOpenAccountsPast24Months", default)]
    pub percentage_open_accounts_past_24_months: Option<f64>,

    #[serde(rename = "TotalOpenAccounts", default)]
    pub total_open_accounts: Option<i64>,

    #[serde(rename = "TotalCreditLimitSum", default)]
    pub total_credit_limit_sum: Option<f64>,

    #[serde(rename = "MaxCreditLimit", default)]
    pub max_credit_limit: Option<f64>,

    #[serde(rename = "PercentageHighBalanceAccounts", default)]
    pub percentage_high_balance_accounts: Option<f64>,

    #[serde(rename = "PercentageSatisfiedAccounts", default)]
    pub percentage_satisfied_accounts: Option<f64>,

    #[serde(rename = "BadDerogatoryMarksCount", default)]
    pub bad_derogatory_marks_count: Option<i64>,

    #[serde(rename = "SatisfiedAccountsCount", default)]
    pub satisfied_accounts_count: Option<i64>,

    #[serde(rename = "MonthsSinceFirstCreditAccount", default)]
    pub months_since_first_credit_account: Option<i64>,

    #[serde(rename = "MonthsSinceLastCreditAccount", default)]
    pub months_since_last_credit_account: Option<i64>,

    #[serde(rename = "DelinquentAccounts30To60DaysPast24Months", default)]
    pub delinquent_accounts_30_to_60_days_past_24_months: Option<i64>,

    #[serde(rename = "DelinquentAccounts90DaysPast24Months", default)]
    pub delinquent_accounts_90_days_past_24_months: Option<i64>,

    #[serde(rename = "TotalDelinquentAccounts60Days", default)]
    pub total_delinquent_accounts_60_days: Option<i64>,
}

impl Record for CustomerInformation {
    fn schema() -> &'static TableSchema {
        &CUSTOMER_INFORMATION
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(CustomerInformation {
            customer_id: row.get("CustomerID")?,
            name: row.get("Name")?,
            date_of_birth: row.get("DateOfBirth")?,
            gender: row.get("Gender")?,
            address: row.get("Address")?,
            city: row.get("City")?,
            state: row.get("State")?,
            pin_code: row.get("PinCode")?,
            default_status: row.get("DefaultStatus")?,
            bankruptcy_indicator: row.get("BankruptcyIndicator")?,
            credit_inquiries_past_6_months: row.get("CreditInquiriesPast6Months")?,
            months_since_last_inquiry: row.get("MonthsSinceLastInquiry")?,
            percentage_open_accounts: row.get("PercentageOpenAccounts")?,
            percentage_open_accounts_past_24_months: row.get("PercentageOpenAccountsPast24Months")?,
            total_open_accounts: row.get("TotalOpenAccounts")?,
            total_credit_limit_sum: row.get("TotalCreditLimitSum")?,
            max_credit_limit: row.get("MaxCreditLimit")?,
            percentage_high_balance_accounts: row.get("PercentageHighBalanceAccounts")?,
            percentage_satisfied_accounts: row.get("PercentageSatisfiedAccounts")?,
            bad_derogatory_marks_count: row.get("BadDerogatoryMarksCount")?,
            satisfied_accounts_count: row.get("SatisfiedAccountsCount")?,
            months_since_first_credit_account: row.get("MonthsSinceFirstCreditAccount")?,
            months_since_last_credit_account: row.get("MonthsSinceLastCreditAccount")?,
            delinquent_accounts_30_to_60_days_past_24_months: row
                .get("DelinquentAccounts30To60DaysPast24Months")?,
            delinquent_accounts_90_days_past_24_months: row
                .get("DelinquentAccounts90DaysPast24Months")?,
            total_delinquent_accounts_60_days: row.get("TotalDelinquentAccounts60Days")?,
        })
    }
}

