// Decision Rules - solvency and property valuation
// Pure functions over the financial and property snapshots

use crate::error::{LoanError, Result};
use crate::lookup::{FinancialSnapshot, PropertySnapshot};
use std::fmt;

// ============================================================================
// SOLVENCY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solvency {
    Solvent,
    Insolvent,
}

impl Solvency {
    pub fn is_solvent(&self) -> bool {
        matches!(self, Solvency::Solvent)
    }
}

impl fmt::Display for Solvency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solvency::Solvent => write!(f, "Le client est solvable."),
            Solvency::Insolvent => write!(f, "Le client n'est pas solvable."),
        }
    }
}

/// Solvent iff the yearly margin covers the monthly installment:
/// `(income - expenses) * 12 >= amount / duration`
pub fn check_solvency(snapshot: &FinancialSnapshot) -> Result<Solvency> {
    if snapshot.loan_duration == 0 {
        return Err(LoanError::InvalidInput(
            "loan duration must be non-zero".to_string(),
        ));
    }

    // i128 holds any i64 difference times 12
    let yearly_margin =
        (i128::from(snapshot.monthly_income) - i128::from(snapshot.monthly_expenses)) * 12;

    let installment = snapshot.loan_amount as f64 / snapshot.loan_duration as f64;

    let verdict = if yearly_margin as f64 >= installment {
        Solvency::Solvent
    } else {
        Solvency::Insolvent
    };

    tracing::debug!(%yearly_margin, installment, ?verdict, "solvency checked");

    Ok(verdict)
}

// ============================================================================
// PROPERTY VALUATION
// ============================================================================

pub const BASE_PROPERTY_VALUE: i64 = 100_000;

/// Keyword bonuses added to the base value.
/// Matching is case-sensitive and each keyword counts once.
pub const PROPERTY_FEATURES: &[(&str, i64)] = &[
    ("jardin", 10_000),
    ("piscine", 50_000),
    ("centre-ville", 5_000),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValuation {
    Adequate,
    Inadequate,
}

impl PropertyValuation {
    pub fn is_adequate(&self) -> bool {
        matches!(self, PropertyValuation::Adequate)
    }
}

impl fmt::Display for PropertyValuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValuation::Adequate => write!(f, "La propriété vaut le montant du prêt."),
            PropertyValuation::Inadequate => {
                write!(f, "La propriété ne vaut pas le montant du prêt.")
            }
        }
    }
}

pub fn estimate_property_value(description: &str) -> i64 {
    PROPERTY_FEATURES
        .iter()
        .filter(|(keyword, _)| description.contains(keyword))
        .fold(BASE_PROPERTY_VALUE, |value, (_, bonus)| value + bonus)
}

/// Adequate iff the estimated value covers the requested amount
pub fn evaluate_property(snapshot: &PropertySnapshot) -> PropertyValuation {
    let estimated = estimate_property_value(&snapshot.property_description);

    let verdict = if estimated >= snapshot.loan_amount {
        PropertyValuation::Adequate
    } else {
        PropertyValuation::Inadequate
    };

    tracing::debug!(estimated, requested = snapshot.loan_amount, ?verdict, "property evaluated");

    verdict
}
