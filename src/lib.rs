// Loan Eligibility Service - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod db;
pub mod decision;
pub mod error;
pub mod lookup;
pub mod parser;
pub mod rules;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::ServerConfig;
pub use db::{
    ClientRecord, CLIENTS_TABLE,
    setup_database, ingest, all_records, count_records,
};
pub use decision::{decide, Decision, RejectionReason};
pub use error::{LoanError, Result};
pub use lookup::{ClientDirectory, FinancialSnapshot, PersonalSnapshot, PropertySnapshot};
pub use parser::{parse_intake, parse_intake_file};
pub use rules::{
    check_solvency, evaluate_property, estimate_property_value,
    PropertyValuation, Solvency,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the fmt subscriber, honouring `RUST_LOG` when set
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
