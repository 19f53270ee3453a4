use crate::error::{LoanError, Result};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Table holding one row per ingested intake file
pub const CLIENTS_TABLE: &str = "clients";

/// One client's intake data
/// Wire and column names keep the French labels of the intake format
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    // ========================================================================
    // IDENTITY & CONTACT
    // ========================================================================
    /// Unique key of the record
    #[serde(rename = "nom")]
    pub name: String,

    #[serde(rename = "adresse")]
    pub address: String,

    #[serde(rename = "email")]
    pub email: String,

    #[serde(rename = "telephone")]
    pub phone: String,

    // ========================================================================
    // LOAN & INCOME
    // ========================================================================
    #[serde(rename = "montant_pret")]
    pub loan_amount: i64,

    /// Loan duration in months
    #[serde(rename = "duree_pret")]
    pub loan_duration: i64,

    #[serde(rename = "revenu_mensuel")]
    pub monthly_income: i64,

    #[serde(rename = "depenses_mensuelles")]
    pub monthly_expenses: i64,

    // ========================================================================
    // PROPERTY
    // ========================================================================
    #[serde(rename = "description_propriete")]
    pub property_description: String,
}

impl ClientRecord {
    /// Check that every required field is present before the record is stored
    pub fn validate(&self) -> Result<()> {
        let text_fields = [
            ("nom", &self.name),
            ("adresse", &self.address),
            ("email", &self.email),
            ("telephone", &self.phone),
            ("description_propriete", &self.property_description),
        ];

        for (field, value) in text_fields {
            if value.trim().is_empty() {
                return Err(LoanError::Validation(format!("{} is required", field)));
            }
        }

        let numeric_fields = [
            ("montant_pret", self.loan_amount),
            ("duree_pret", self.loan_duration),
            ("revenu_mensuel", self.monthly_income),
            ("depenses_mensuelles", self.monthly_expenses),
        ];

        for (field, value) in numeric_fields {
            if value < 0 {
                return Err(LoanError::Validation(format!(
                    "{} must not be negative (got {})",
                    field, value
                )));
            }
        }

        Ok(())
    }
}

/// Create the clients table when it does not exist yet.
/// An existing table is left untouched.
pub fn setup_database(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {CLIENTS_TABLE} (
                id TEXT NOT NULL,
                nom TEXT NOT NULL,
                adresse TEXT NOT NULL,
                email TEXT NOT NULL,
                telephone TEXT NOT NULL,
                montant_pret INTEGER NOT NULL,
                duree_pret INTEGER NOT NULL,
                revenu_mensuel INTEGER NOT NULL,
                depenses_mensuelles INTEGER NOT NULL,
                description_propriete TEXT NOT NULL
            )"
        ),
        [],
    )?;

    Ok(())
}

/// Append one record to the clients table
pub fn ingest(conn: &Connection, record: &ClientRecord) -> Result<()> {
    record.validate()?;

    conn.execute(
        &format!(
            "INSERT INTO {CLIENTS_TABLE} (
                id, nom, adresse, email, telephone,
                montant_pret, duree_pret, revenu_mensuel, depenses_mensuelles,
                description_propriete
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
        ),
        params![
            // id mirrors the name
            record.name,
            record.name,
            record.address,
            record.email,
            record.phone,
            record.loan_amount,
            record.loan_duration,
            record.monthly_income,
            record.monthly_expenses,
            record.property_description,
        ],
    )?;

    tracing::info!(client = %record.name, "client record ingested");

    Ok(())
}

/// Read every row keyed by client name.
/// Rows are visited in insertion order, so the latest row for a name wins.
pub fn all_records(conn: &Connection) -> Result<HashMap<String, ClientRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT nom, adresse, email, telephone,
                montant_pret, duree_pret, revenu_mensuel, depenses_mensuelles,
                description_propriete
         FROM {CLIENTS_TABLE}
         ORDER BY rowid"
    ))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(ClientRecord {
                name: row.get(0)?,
                address: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                loan_amount: row.get(4)?,
                loan_duration: row.get(5)?,
                monthly_income: row.get(6)?,
                monthly_expenses: row.get(7)?,
                property_description: row.get(8)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let total_rows = rows.len();
    let mut records = HashMap::with_capacity(total_rows);
    for record in rows {
        records.insert(record.name.clone(), record);
    }

    if records.len() < total_rows {
        tracing::warn!(
            rows = total_rows,
            unique = records.len(),
            "duplicate client names in table, keeping the latest row for each"
        );
    }

    Ok(records)
}

pub fn count_records(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {CLIENTS_TABLE}"),
        [],
        |row| row.get(0),
    )?;

    Ok(count)
}
