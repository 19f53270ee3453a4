// Loan Eligibility Service - Web Server
// REST API with Axum over the client directory

use anyhow::{Context, Result};
use clap::Parser;
use loan_eligibility::api::{self, AppState};
use loan_eligibility::{ingest, parse_intake_file, setup_database, ClientDirectory, ServerConfig};
use rusqlite::Connection;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    loan_eligibility::init_tracing("loan_eligibility=info,loan_server=info,tower_http=info");

    let config = ServerConfig::parse();

    // Open database
    let conn = Connection::open(&config.db_path)
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;
    setup_database(&conn).context("Failed to prepare clients table")?;
    tracing::info!(db = %config.db_path.display(), "database opened");

    // Ingest the intake file once, then snapshot the table
    if let Some(intake_file) = &config.intake_file {
        let record = parse_intake_file(intake_file)
            .with_context(|| format!("Failed to parse intake file {}", intake_file.display()))?;
        ingest(&conn, &record).context("Failed to store intake record")?;
    }

    let directory = ClientDirectory::load(&conn)
        .context("Failed to load client records")?
        .with_strict(config.strict_lookup);
    drop(conn);

    let state = AppState::new(directory);
    let app = if config.cors_permissive {
        api::router_with_cors(state)
    } else {
        api::router(state)
    };

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(%addr, strict = config.strict_lookup, "loan server listening");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
