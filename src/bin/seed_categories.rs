use std::error::Error;

use clap::Parser;
use rusqlite::Connection;

use dompetku::{initialize_db, seed_default_categories};

/// A utility for populating a DompetKu database with the default categories.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, short)]
    db_path: String,
}

/// Insert the default income and expense categories, skipping any that
/// already exist.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("Opening database at {:?}", args.db_path);
    let conn = Connection::open(&args.db_path)?;

    initialize_db(&conn)?;
    let inserted = seed_default_categories(&conn)?;

    println!("Inserted {inserted} categories.");

    Ok(())
}
