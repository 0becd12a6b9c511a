// Entity Models - one plain struct per warehouse table
//
// Each entity has:
// - A struct with serde renames matching the CSV/SQL column names
// - A static TableSchema (column name → type) used by the loader
// - A Record impl so rows can be read back by primary key
//
// Foreign keys (CustomerID, AccountID) are naming conventions only.

pub mod customer;
pub mod account;
pub mod transaction;
pub mod loan;
pub mod credit_card;

pub use customer::{CustomerInformation, CUSTOMER_INFORMATION};
pub use account::{AccountInformation, ACCOUNT_INFORMATION};
pub use transaction::{TransactionInformation, TRANSACTION_INFORMATION};
pub use loan::{LoanInformation, LOAN_INFORMATION};
pub use credit_card::{CreditCardInformation, CREDIT_CARD_INFORMATION};

use crate::schema::TableSchema;
use rusqlite::Row;

/// Every table the warehouse knows, in load order
pub static ALL_TABLES: [&TableSchema; 5] = [
    &CUSTOMER_INFORMATION,
    &ACCOUNT_INFORMATION,
    &TRANSACTION_INFORMATION,
    &LOAN_INFORMATION,
    &CREDIT_CARD_INFORMATION,
];

/// Find a table descriptor by name (ASCII case-insensitive)
pub fn table_by_name(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES
        .iter()
        .copied()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

/// A typed row of one warehouse table
pub trait Record: Sized {
    /// Descriptor of the table this record lives in
    fn schema() -> &'static TableSchema;

    /// Build the record from a `SELECT *` row, reading columns by name
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_has_one_primary_key() {
        for table in ALL_TABLES.iter() {
            let keys = table.columns.iter().filter(|c| c.primary_key).count();
            assert_eq!(keys, 1, "{} should declare exactly one key", table.name);
        }
    }

    #[test]
    fn test_table_by_name() {
        assert_eq!(
            table_by_name("loaninformation").map(|t| t.name),
            Some("LoanInformation")
        );
        assert!(table_by_name("Nope").is_none());
    }

    fn serialized_header<T: serde::Serialize + Default>() -> String {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(T::default()).unwrap();
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        text.lines().next().unwrap().to_string()
    }

    #[test]
    fn test_schemas_match_struct_renames() {
        // One descriptor column per serialized field, same names, same order
        let headers = [
            serialized_header::<CustomerInformation>(),
            serialized_header::<AccountInformation>(),
            serialized_header::<TransactionInformation>(),
            serialized_header::<LoanInformation>(),
            serialized_header::<CreditCardInformation>(),
        ];

        for (table, header) in ALL_TABLES.iter().zip(headers.iter()) {
            assert_eq!(header, &table.column_names().join(","), "{} renames drifted", table.name);
        }
    }

    #[test]
    fn test_column_counts() {
        assert_eq!(CUSTOMER_INFORMATION.columns.len(), 26);
        assert_eq!(ACCOUNT_INFORMATION.columns.len(), 17);
        assert_eq!(TRANSACTION_INFORMATION.columns.len(), 5);
        assert_eq!(LOAN_INFORMATION.columns.len(), 11);
        assert_eq!(CREDIT_CARD_INFORMATION.columns.len(), 6);
    }
}
