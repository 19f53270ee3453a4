// Lookup Service
// Read-only projections of client records, loaded once from the store

use crate::db::{all_records, ClientRecord};
use crate::error::{LoanError, Result};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// SNAPSHOTS
// ============================================================================

/// Contact fields of a client (`ClientData` on the wire)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalSnapshot {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "adresse")]
    pub address: String,
    #[serde(rename = "email")]
    pub email: String,
    #[serde(rename = "telephone")]
    pub phone: String,
}

/// Inputs of the solvency rule (`FinancialData` on the wire)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    #[serde(rename = "montant_pret")]
    pub loan_amount: i64,
    #[serde(rename = "duree_pret")]
    pub loan_duration: i64,
    #[serde(rename = "revenu_mensuel")]
    pub monthly_income: i64,
    #[serde(rename = "depenses_mensuelles")]
    pub monthly_expenses: i64,
}

/// Inputs of the property rule (`PropertyData` on the wire)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    #[serde(rename = "description_propriete")]
    pub property_description: String,
    #[serde(rename = "montant_pret")]
    pub loan_amount: i64,
}

impl From<&ClientRecord> for PersonalSnapshot {
    fn from(record: &ClientRecord) -> Self {
        Self {
            name: record.name.clone(),
            address: record.address.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
        }
    }
}

impl From<&ClientRecord> for FinancialSnapshot {
    fn from(record: &ClientRecord) -> Self {
        Self {
            loan_amount: record.loan_amount,
            loan_duration: record.loan_duration,
            monthly_income: record.monthly_income,
            monthly_expenses: record.monthly_expenses,
        }
    }
}

impl From<&ClientRecord> for PropertySnapshot {
    fn from(record: &ClientRecord) -> Self {
        Self {
            property_description: record.property_description.clone(),
            loan_amount: record.loan_amount,
        }
    }
}

// ============================================================================
// CLIENT DIRECTORY
// ============================================================================

/// Immutable view of the clients table keyed by name.
///
/// Unknown names resolve to default (zero) snapshots unless the directory is
/// strict, in which case they are reported as `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct ClientDirectory {
    records: HashMap<String, ClientRecord>,
    strict: bool,
}

impl ClientDirectory {
    pub fn new(records: HashMap<String, ClientRecord>) -> Self {
        ClientDirectory {
            records,
            strict: false,
        }
    }

    /// Snapshot every row currently in the store
    pub fn load(conn: &Connection) -> Result<Self> {
        let records = all_records(conn)?;
        tracing::info!(clients = records.len(), "client directory loaded");
        Ok(Self::new(records))
    }

    /// Report unknown clients as `NotFound` instead of zero snapshots
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, client_id: &str) -> bool {
        self.records.contains_key(client_id)
    }

    /// Client names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn project<T>(&self, client_id: &str) -> Result<T>
    where
        T: Default + for<'a> From<&'a ClientRecord>,
    {
        match self.records.get(client_id) {
            Some(record) => Ok(T::from(record)),
            None if self.strict => Err(LoanError::NotFound(client_id.to_string())),
            None => {
                tracing::debug!(client = %client_id, "unknown client, using empty snapshot");
                Ok(T::default())
            }
        }
    }

    pub fn get_personal(&self, client_id: &str) -> Result<PersonalSnapshot> {
        self.project(client_id)
    }

    pub fn get_financial(&self, client_id: &str) -> Result<FinancialSnapshot> {
        self.project(client_id)
    }

    pub fn get_property(&self, client_id: &str) -> Result<PropertySnapshot> {
        self.project(client_id)
    }
}
