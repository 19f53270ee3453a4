use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use loan_eligibility::{
    count_records, decide, ingest, parse_intake_file, setup_database, ClientDirectory,
};

#[derive(Parser, Debug)]
#[command(name = "loan-eligibility")]
#[command(about = "Ingest client intake files and run loan decisions offline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// SQLite database holding the clients table
    #[arg(long, env = "LOAN_DB_PATH", default_value = "clients.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an intake file and append it to the clients table
    Ingest { file: PathBuf },
    /// List stored clients
    List,
    /// Print the loan decision for a client
    Decide { client_id: String },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    loan_eligibility::init_tracing("loan_eligibility=warn");

    let cli = Cli::parse();

    let conn = Connection::open(&cli.db)
        .with_context(|| format!("Failed to open database {}", cli.db.display()))?;
    setup_database(&conn)?;

    match cli.command {
        Command::Ingest { file } => run_ingest(&conn, &file),
        Command::List => run_list(&conn),
        Command::Decide { client_id } => run_decide(&conn, &client_id),
    }
}

fn run_ingest(conn: &Connection, file: &Path) -> Result<()> {
    let record = parse_intake_file(file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    ingest(conn, &record)?;

    println!("✓ Ingested client: {}", record.name);
    println!("✓ Table contains {} rows", count_records(conn)?);

    Ok(())
}

fn run_list(conn: &Connection) -> Result<()> {
    let directory = ClientDirectory::load(conn)?;

    for name in directory.names() {
        let financial = directory.get_financial(name)?;
        println!(
            "{}\t{} over {} months",
            name, financial.loan_amount, financial.loan_duration
        );
    }
    println!("{} clients", directory.len());

    Ok(())
}

fn run_decide(conn: &Connection, client_id: &str) -> Result<()> {
    let directory = ClientDirectory::load(conn)?;

    if !directory.contains(client_id) {
        eprintln!("warning: unknown client '{}', deciding on empty data", client_id);
    }

    let decision = decide(&directory, client_id)?;
    println!("{}", decision);

    Ok(())
}
