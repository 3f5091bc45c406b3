use std::error::Error;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;

use bookkeeper_rs::{
    Bookkeeper, Config, Entry, EntryStatus, EntryType, NewUser, init_logging,
};

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    init_logging(config.log_level);

    let output_path = config.db_path.as_path();

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    let mut bookkeeper = Bookkeeper::new(conn, config.hash_cost)?;

    println!("Creating test user...");
    let user = bookkeeper
        .users
        .register(NewUser::new("Test", "test@example.com", "test"))?;

    println!("Creating test entries...");
    let test_entries = [
        ("Salary", EntryType::Income, Decimal::new(5_000_00, 2), EntryStatus::Confirmed),
        ("Rent", EntryType::Expense, Decimal::new(1_500_00, 2), EntryStatus::Confirmed),
        ("Groceries", EntryType::Expense, Decimal::new(230_45, 2), EntryStatus::Pending),
        ("Gym", EntryType::Expense, Decimal::new(50_00, 2), EntryStatus::Canceled),
    ];

    for (description, entry_type, value, status) in test_entries {
        let mut entry = bookkeeper.entries.create(
            Entry::new()
                .description(description)
                .month(1)
                .year(2024)
                .owner(user.id)
                .value(value)
                .entry_type(entry_type),
        )?;

        if status != entry.status {
            bookkeeper.entries.change_status(&mut entry, status)?;
        }
    }

    for entry_type in [EntryType::Income, EntryType::Expense] {
        let balance = bookkeeper
            .entries
            .get_balance(user.id, entry_type, EntryStatus::Confirmed)?;

        match balance {
            Some(balance) => println!("Confirmed {entry_type}: {balance}"),
            None => println!("Confirmed {entry_type}: no entries"),
        }
    }

    println!("Success!");

    Ok(())
}
