//! Server configuration, from command-line flags or environment variables.

use clap::Parser;
use std::path::PathBuf;

/// | Env Var                | Default      |
/// |------------------------|--------------|
/// | `LOAN_DB_PATH`         | `clients.db` |
/// | `LOAN_INTAKE_FILE`     | unset        |
/// | `HOST`                 | `127.0.0.1`  |
/// | `PORT`                 | `8080`       |
/// | `LOAN_STRICT_LOOKUP`   | `false`      |
/// | `LOAN_CORS_PERMISSIVE` | `false`      |
#[derive(Parser, Debug, Clone)]
#[command(name = "loan-server")]
#[command(about = "Loan eligibility HTTP service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct ServerConfig {
    /// SQLite database holding the clients table
    #[arg(long, env = "LOAN_DB_PATH", default_value = "clients.db")]
    pub db_path: PathBuf,

    /// Intake file ingested once at startup
    #[arg(long, env = "LOAN_INTAKE_FILE")]
    pub intake_file: Option<PathBuf>,

    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Answer 404 for unknown clients instead of empty snapshots
    #[arg(long, env = "LOAN_STRICT_LOOKUP")]
    pub strict_lookup: bool,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "LOAN_CORS_PERMISSIVE")]
    pub cors_permissive: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
