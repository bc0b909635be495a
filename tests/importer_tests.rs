// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use paisaclip::store::{self, ExpenseFilter};
use paisaclip::{cli, commands, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn import(conn: &mut Connection, path: &str) -> anyhow::Result<()> {
    let matches =
        cli::build_cli().get_matches_from(["paisaclip", "import", "expenses", "--path", path]);
    let Some(("import", sub)) = matches.subcommand() else {
        panic!("expected import subcommand");
    };
    commands::importer::handle(conn, sub)
}

#[test]
fn rows_import_and_blank_categories_get_classified() {
    let mut conn = setup();
    let file = csv_file(
        "date,description,amount,category\n\
         2025-07-01,monthly rent,15000,Rent\n\
         2025-07-02,Dinner at restaurant,540.50,\n",
    );

    import(&mut conn, file.path().to_str().unwrap()).unwrap();

    let data = store::query_expenses(&conn, &ExpenseFilter::default()).unwrap();
    assert_eq!(data.len(), 2);
    // newest first
    assert_eq!(data[0].description, "Dinner at restaurant");
    assert_eq!(data[0].category, "Food");
    assert_eq!(data[1].description, "monthly rent");
    assert_eq!(data[1].category, "Rent");
    assert_eq!(data[1].amount, Decimal::from(15_000));
}

#[test]
fn a_bad_row_aborts_the_whole_import() {
    let mut conn = setup();
    let file = csv_file(
        "date,description,amount,category\n\
         2025-07-01,groceries,800,Food\n\
         2025-07-02,broken,not-a-number,Food\n",
    );

    assert!(import(&mut conn, file.path().to_str().unwrap()).is_err());
    assert!(store::query_expenses(&conn, &ExpenseFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn a_non_positive_amount_aborts_the_whole_import() {
    let mut conn = setup();
    let file = csv_file(
        "date,description,amount,category\n\
         2025-07-01,groceries,800,Food\n\
         2025-07-02,refund,-200,Food\n",
    );

    assert!(import(&mut conn, file.path().to_str().unwrap()).is_err());
    assert!(store::query_expenses(&conn, &ExpenseFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn missing_file_is_an_error() {
    let mut conn = setup();
    assert!(import(&mut conn, "/nonexistent/expenses.csv").is_err());
}
