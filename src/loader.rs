// 🚚 Fetch-and-Load - retrieve → decode → append, once per table
//
// The only non-trivial procedure of the warehouse load:
// 1. Fetch the whole document (fails before any write)
// 2. Decode UTF-8 CSV, first row is the header
// 3. Append every row to the target table, coercing cells by column type

use crate::config::{EtlConfig, LoadMode};
use crate::db::Store;
use crate::error::{EtlError, EtlResult};
use crate::fetch::Fetcher;
use crate::schema::{quote_ident, Column, TableSchema};
use anyhow::Context;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Outcome of one successful fetch-and-load call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub table: &'static str,
    pub source: String,
    pub rows: usize,
}

// ============================================================================
// DRIVER
// ============================================================================

/// Create the schema, then run every configured job in order.
///
/// Stops at the first failing job; tables loaded before it stay loaded.
pub fn run(store: &Store, fetcher: &dyn Fetcher, config: &EtlConfig) -> anyhow::Result<Vec<LoadSummary>> {
    store
        .ensure_schema()
        .context("Failed to create warehouse tables")?;

    let mut summaries = Vec::with_capacity(config.jobs.len());
    for job in &config.jobs {
        let summary = fetch_and_load(store, fetcher, &job.source, job.table, config.mode)
            .with_context(|| format!("Failed to load {} from {}", job.table.name, job.source))?;
        summaries.push(summary);
    }

    Ok(summaries)
}

// ============================================================================
// FETCH-AND-LOAD
// ============================================================================

pub fn fetch_and_load(
    store: &Store,
    fetcher: &dyn Fetcher,
    source: &str,
    table: &TableSchema,
    mode: LoadMode,
) -> EtlResult<LoadSummary> {
    info!(table = table.name, source, "fetching");
    let bytes = fetcher.fetch(source)?;
    let text = decode_utf8(source, bytes)?;

    let rows = match mode {
        LoadMode::RowByRow => append_csv(store.connection(), source, table, &text)?,
        LoadMode::Transactional => {
            let tx = store.connection().unchecked_transaction()?;
            let rows = append_csv(&tx, source, table, &text)?;
            tx.commit()?;
            rows
        }
    };

    info!(table = table.name, rows, "loaded");
    Ok(LoadSummary {
        table: table.name,
        source: source.to_string(),
        rows,
    })
}

/// Interpret the body as UTF-8, dropping a leading byte-order mark
pub fn decode_utf8(source: &str, bytes: Vec<u8>) -> EtlResult<String> {
    let text = String::from_utf8(bytes).map_err(|err| EtlError::Decode {
        source_location: source.to_string(),
        source: err,
    })?;

    if text.starts_with('\u{feff}') {
        Ok(text['\u{feff}'.len_utf8()..].to_string())
    } else {
        Ok(text)
    }
}

/// Append every CSV row of `text` to `table`, returning the row count.
///
/// Rows are written as they are decoded, so an error leaves the earlier rows
/// in place unless `conn` is inside a transaction the caller rolls back.
pub fn append_csv(conn: &Connection, source: &str, table: &TableSchema, text: &str) -> EtlResult<usize> {
    let csv_err = |err: csv::Error| EtlError::Csv {
        source_location: source.to_string(),
        source: err,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let columns = map_headers(source, table, &headers)?;

    let mut stmt = conn.prepare(&insert_sql(table, &columns))?;
    let mut rows = 0;

    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let values = coerce_record(&columns, &record);
        stmt.execute(params_from_iter(values.iter()))?;
        rows += 1;
    }

    debug!(table = table.name, rows, "rows appended");
    Ok(rows)
}

/// Match header names to table columns (case- and order-insensitive)
fn map_headers<'t>(
    source: &str,
    table: &'t TableSchema,
    headers: &csv::StringRecord,
) -> EtlResult<Vec<&'t Column>> {
    let header_error = |message: String| EtlError::Header {
        source_location: source.to_string(),
        table: table.name.to_string(),
        message,
    };

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(header_error("document has no header row".to_string()));
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(headers.len());

    for name in headers.iter() {
        let column = table
            .column(name)
            .ok_or_else(|| header_error(format!("unknown column {:?}", name)))?;
        if !seen.insert(column.name) {
            return Err(header_error(format!("column {} appears twice", column.name)));
        }
        columns.push(column);
    }

    let missing = table.columns.len() - columns.len();
    if missing > 0 {
        warn!(table = table.name, missing, "source omits columns, storing NULL");
    }

    Ok(columns)
}

fn insert_sql(table: &TableSchema, columns: &[&Column]) -> String {
    let names: Vec<String> = columns.iter().map(|c| quote_ident(c.name)).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table.name),
        names.join(", "),
        placeholders.join(", ")
    )
}

fn coerce_record(columns: &[&Column], record: &csv::StringRecord) -> Vec<Value> {
    columns
        .iter()
        .zip(record.iter())
        .map(|(column, cell)| column.ty.coerce(cell))
        .collect()
}

/// Parse a CSV document straight into typed records.
///
/// Unlike [`append_csv`], header names must match the serde names exactly.
pub fn read_records<R: DeserializeOwned>(source: &str, text: &str) -> EtlResult<Vec<R>> {
    let mut rdr = csv::Reader::from_reader(text.as_bytes());

    rdr.deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(|err| EtlError::Csv {
            source_location: source.to_string(),
            source: err,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceJob;
    use crate::entities::{
        CustomerInformation, TransactionInformation, ACCOUNT_INFORMATION, CREDIT_CARD_INFORMATION,
        CUSTOMER_INFORMATION, LOAN_INFORMATION, TRANSACTION_INFORMATION,
    };
    use chrono::NaiveDate;
    use std::collections::HashMap;

    /// In-memory sources; unknown locations answer 404
    struct MapFetcher {
        documents: HashMap<String, Vec<u8>>,
    }

    impl MapFetcher {
        fn new(documents: &[(&str, &str)]) -> Self {
            MapFetcher {
                documents: documents
                    .iter()
                    .map(|(loc, body)| (loc.to_string(), body.as_bytes().to_vec()))
                    .collect(),
            }
        }

        fn with_bytes(location: &str, body: Vec<u8>) -> Self {
            let mut documents = HashMap::new();
            documents.insert(location.to_string(), body);
            MapFetcher { documents }
        }
    }

    impl Fetcher for MapFetcher {
        fn fetch(&self, location: &str) -> EtlResult<Vec<u8>> {
            self.documents
                .get(location)
                .cloned()
                .ok_or_else(|| EtlError::Status {
                    url: location.to_string(),
                    status: 404,
                })
        }
    }

    fn setup_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    const CUSTOMERS: &str = "CustomerID,Name,DateOfBirth\n1,Alice,1990-01-01\n2,Bob,1985-05-05";

    #[test]
    fn test_load_customer_example() {
        let store = setup_store();
        let fetcher = MapFetcher::new(&[("mem://customers.csv", CUSTOMERS)]);

        let summary = fetch_and_load(
            &store,
            &fetcher,
            "mem://customers.csv",
            &CUSTOMER_INFORMATION,
            LoadMode::RowByRow,
        )
        .unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.table, "CustomerInformation");
        assert_eq!(store.count_rows("CustomerInformation").unwrap(), 2);

        let alice: CustomerInformation = store.get(1).unwrap().unwrap();
        assert_eq!(alice.name.as_deref(), Some("Alice"));
        assert_eq!(alice.date_of_birth, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(alice.city, None);

        let bob: CustomerInformation = store.get(2).unwrap().unwrap();
        assert_eq!(bob.name.as_deref(), Some("Bob"));
        assert_eq!(bob.date_of_birth, NaiveDate::from_ymd_opt(1985, 5, 5));
    }

    #[test]
    fn test_headers_match_by_name_any_case_any_order() {
        let store = setup_store();
        let doc = "transactiontype,TRANSACTIONAMOUNT,TransactionID\nDebit,12.5,10\nCredit,99,11\nDebit,,12\n";
        let fetcher = MapFetcher::new(&[("mem://tx.csv", doc)]);

        let summary = fetch_and_load(&store, &fetcher, "mem://tx.csv", &TRANSACTION_INFORMATION, LoadMode::RowByRow)
            .unwrap();
        assert_eq!(summary.rows, 3);

        let tx: TransactionInformation = store.get(10).unwrap().unwrap();
        assert_eq!(tx.transaction_type.as_deref(), Some("Debit"));
        assert_eq!(tx.transaction_amount, Some(12.5));
        assert_eq!(tx.account_id, None);

        let empty_amount: TransactionInformation = store.get(12).unwrap().unwrap();
        assert_eq!(empty_amount.transaction_amount, None);
    }

    #[test]
    fn test_error_status_writes_nothing() {
        let store = setup_store();
        let fetcher = MapFetcher::new(&[]);

        let err = fetch_and_load(
            &store,
            &fetcher,
            "https://CustomerInformation.csv",
            &CUSTOMER_INFORMATION,
            LoadMode::RowByRow,
        )
        .unwrap_err();

        assert!(matches!(err, EtlError::Status { status: 404, .. }));
        assert_eq!(store.count_rows("CustomerInformation").unwrap(), 0);
    }

    #[test]
    fn test_malformed_row_keeps_preceding_rows() {
        let store = setup_store();
        let doc = "LoanID,LoanAmount\n1,100\n2,200\n3,300,extra\n4,400\n";
        let fetcher = MapFetcher::new(&[("mem://loans.csv", doc)]);

        let err = fetch_and_load(&store, &fetcher, "mem://loans.csv", &LOAN_INFORMATION, LoadMode::RowByRow)
            .unwrap_err();

        assert!(matches!(err, EtlError::Csv { .. }), "got {:?}", err);
        assert_eq!(
            store.count_rows("LoanInformation").unwrap(),
            2,
            "Rows before the malformed one stay committed"
        );
    }

    #[test]
    fn test_transactional_mode_rolls_back_table() {
        let store = setup_store();
        let doc = "LoanID,LoanAmount\n1,100\n2,200\n3,300,extra\n";
        let fetcher = MapFetcher::new(&[("mem://loans.csv", doc)]);

        let result = fetch_and_load(&store, &fetcher, "mem://loans.csv", &LOAN_INFORMATION, LoadMode::Transactional);

        assert!(result.is_err());
        assert_eq!(store.count_rows("LoanInformation").unwrap(), 0);
    }

    #[test]
    fn test_transactional_mode_commits_on_success() {
        let store = setup_store();
        let fetcher = MapFetcher::new(&[("mem://customers.csv", CUSTOMERS)]);

        fetch_and_load(&store, &fetcher, "mem://customers.csv", &CUSTOMER_INFORMATION, LoadMode::Transactional)
            .unwrap();

        assert_eq!(store.count_rows("CustomerInformation").unwrap(), 2);
    }

    #[test]
    fn test_unparsable_cells_stored_as_text() {
        let store = setup_store();
        let doc = "CustomerID,DateOfBirth,TotalOpenAccounts\n1,01/31/1990,N/A\n2,1985-05-05,3\n";
        let fetcher = MapFetcher::new(&[("mem://customers.csv", doc)]);

        let summary = fetch_and_load(&store, &fetcher, "mem://customers.csv", &CUSTOMER_INFORMATION, LoadMode::RowByRow)
            .unwrap();
        assert_eq!(summary.rows, 2, "Cells are not validated against column types");

        let (dob, accounts): (String, String) = store
            .connection()
            .query_row(
                "SELECT DateOfBirth, TotalOpenAccounts FROM CustomerInformation WHERE CustomerID = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(dob, "01/31/1990");
        assert_eq!(accounts, "N/A");

        let bob: CustomerInformation = store.get(2).unwrap().unwrap();
        assert_eq!(bob.total_open_accounts, Some(3));
    }

    #[test]
    fn test_duplicate_key_is_storage_error() {
        let store = setup_store();
        let doc = "AccountID,Balance\n1,10\n1,20\n";
        let fetcher = MapFetcher::new(&[("mem://accounts.csv", doc)]);

        let err = fetch_and_load(&store, &fetcher, "mem://accounts.csv", &ACCOUNT_INFORMATION, LoadMode::RowByRow)
            .unwrap_err();

        assert!(matches!(err, EtlError::Storage(_)));
        assert_eq!(store.count_rows("AccountInformation").unwrap(), 1);
    }

    #[test]
    fn test_unknown_header_rejected_before_write() {
        let store = setup_store();
        let doc = "CustomerID,Nickname\n1,Al\n";
        let fetcher = MapFetcher::new(&[("mem://customers.csv", doc)]);

        let err = fetch_and_load(&store, &fetcher, "mem://customers.csv", &CUSTOMER_INFORMATION, LoadMode::RowByRow)
            .unwrap_err();

        assert!(matches!(err, EtlError::Header { .. }));
        assert_eq!(store.count_rows("CustomerInformation").unwrap(), 0);
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let store = setup_store();
        let doc = "CustomerID,Name,NAME\n1,Al,Alice\n";
        let fetcher = MapFetcher::new(&[("mem://customers.csv", doc)]);

        let err = fetch_and_load(&store, &fetcher, "mem://customers.csv", &CUSTOMER_INFORMATION, LoadMode::RowByRow)
            .unwrap_err();

        assert!(matches!(err, EtlError::Header { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let store = setup_store();
        let fetcher = MapFetcher::with_bytes("mem://bad.csv", vec![b'L', b'o', 0xff, 0xfe, b'\n']);

        let err = fetch_and_load(&store, &fetcher, "mem://bad.csv", &LOAN_INFORMATION, LoadMode::RowByRow)
            .unwrap_err();

        assert!(matches!(err, EtlError::Decode { .. }));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let store = setup_store();
        let mut body = vec![0xef, 0xbb, 0xbf];
        body.extend_from_slice(b"LoanID,LoanType\n5,Home\n");
        let fetcher = MapFetcher::with_bytes("mem://bom.csv", body);

        let summary = fetch_and_load(&store, &fetcher, "mem://bom.csv", &LOAN_INFORMATION, LoadMode::RowByRow)
            .unwrap();

        assert_eq!(summary.rows, 1);
    }

    #[test]
    fn test_empty_document_rejected() {
        let store = setup_store();
        let fetcher = MapFetcher::new(&[("mem://empty.csv", "")]);

        let err = fetch_and_load(&store, &fetcher, "mem://empty.csv", &LOAN_INFORMATION, LoadMode::RowByRow)
            .unwrap_err();

        assert!(matches!(err, EtlError::Header { .. }));
    }

    #[test]
    fn test_round_trip_matches_source_rows() {
        let store = setup_store();
        let doc = "TransactionID,AccountID,TransactionDate,TransactionAmount,TransactionType\n\
                   100,7,2024-01-15,1500.75,Deposit\n\
                   101,7,2024-01-16,250.00,Withdrawal\n\
                   102,8,,,\n";
        let fetcher = MapFetcher::new(&[("mem://tx.csv", doc)]);

        fetch_and_load(&store, &fetcher, "mem://tx.csv", &TRANSACTION_INFORMATION, LoadMode::RowByRow)
            .unwrap();

        let expected: Vec<TransactionInformation> = read_records("mem://tx.csv", doc).unwrap();
        assert_eq!(expected.len(), 3);

        for source_row in &expected {
            let stored: TransactionInformation = store.get(source_row.transaction_id).unwrap().unwrap();
            assert_eq!(&stored, source_row);
        }
    }

    #[test]
    fn test_run_loads_every_job_in_order() {
        let store = Store::open_in_memory().unwrap();
        let fetcher = MapFetcher::new(&[
            ("mem://customers.csv", CUSTOMERS),
            ("mem://accounts.csv", "AccountID,CustomerID,DateOpened\n1,1,2020-02-02\n"),
            ("mem://tx.csv", "TransactionID,AccountID\n1,1\n2,1\n3,1\n"),
            ("mem://loans.csv", "LoanID,CustomerID,Applicant_income\n1,2,4000\n"),
            ("mem://cards.csv", "CreditCardID,CustomerID\n1,1\n"),
        ]);
        let config = EtlConfig {
            jobs: vec![
                SourceJob::new("mem://customers.csv", &CUSTOMER_INFORMATION),
                SourceJob::new("mem://accounts.csv", &ACCOUNT_INFORMATION),
                SourceJob::new("mem://tx.csv", &TRANSACTION_INFORMATION),
                SourceJob::new("mem://loans.csv", &LOAN_INFORMATION),
                SourceJob::new("mem://cards.csv", &CREDIT_CARD_INFORMATION),
            ],
            ..EtlConfig::default()
        };

        let summaries = run(&store, &fetcher, &config).unwrap();

        let rows: Vec<(&str, usize)> = summaries.iter().map(|s| (s.table, s.rows)).collect();
        assert_eq!(
            rows,
            vec![
                ("CustomerInformation", 2),
                ("AccountInformation", 1),
                ("TransactionInformation", 3),
                ("LoanInformation", 1),
                ("CreditCardInformation", 1),
            ]
        );
    }

    #[test]
    fn test_run_stops_at_first_failure() {
        let store = Store::open_in_memory().unwrap();
        let fetcher = MapFetcher::new(&[
            ("mem://customers.csv", CUSTOMERS),
            ("mem://loans.csv", "LoanID\n1\n"),
        ]);
        let config = EtlConfig {
            jobs: vec![
                SourceJob::new("mem://customers.csv", &CUSTOMER_INFORMATION),
                SourceJob::new("mem://missing.csv", &ACCOUNT_INFORMATION),
                SourceJob::new("mem://loans.csv", &LOAN_INFORMATION),
            ],
            ..EtlConfig::default()
        };

        let err = run(&store, &fetcher, &config).unwrap_err();

        assert!(err.to_string().contains("AccountInformation"));
        assert!(matches!(
            err.downcast_ref::<EtlError>(),
            Some(EtlError::Status { status: 404, .. })
        ));
        assert_eq!(store.count_rows("CustomerInformation").unwrap(), 2);
        assert_eq!(store.count_rows("LoanInformation").unwrap(), 0);
    }
}
