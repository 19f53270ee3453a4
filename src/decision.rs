// Decision Orchestrator
// Combines the solvency and property rules into a loan verdict

use crate::error::{LoanError, Result};
use crate::lookup::ClientDirectory;
use crate::rules::{check_solvency, evaluate_property, PropertyValuation, Solvency};
use std::collections::BTreeSet;
use std::fmt;

/// Why a loan was refused. Ordered as rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RejectionReason {
    InsolventClient,
    UndervaluedProperty,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::InsolventClient => write!(f, "{}", Solvency::Insolvent),
            RejectionReason::UndervaluedProperty => write!(f, "{}", PropertyValuation::Inadequate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected(BTreeSet<RejectionReason>),
}

impl Decision {
    /// Build the verdict from both rule outcomes
    pub fn from_outcomes(solvency: Solvency, valuation: PropertyValuation) -> Self {
        let mut reasons = BTreeSet::new();
        if !solvency.is_solvent() {
            reasons.insert(RejectionReason::InsolventClient);
        }
        if !valuation.is_adequate() {
            reasons.insert(RejectionReason::UndervaluedProperty);
        }

        if reasons.is_empty() {
            Decision::Accepted
        } else {
            Decision::Rejected(reasons)
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }

    pub fn reasons(&self) -> Vec<RejectionReason> {
        match self {
            Decision::Accepted => Vec::new(),
            Decision::Rejected(reasons) => reasons.iter().copied().collect(),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Accepted => write!(f, "L'acceptation de l'attribution du prêt."),
            Decision::Rejected(reasons) => {
                write!(f, "Refus de l'attribution du prêt.")?;
                for reason in reasons {
                    write!(f, " {}", reason)?;
                }
                Ok(())
            }
        }
    }
}

/// Decide on the loan requested by `client_id`.
///
/// Unknown clients flow through as zero snapshots. A zero loan duration
/// cannot be repaid, so it counts as insolvent here rather than failing.
pub fn decide(directory: &ClientDirectory, client_id: &str) -> Result<Decision> {
    let financial = directory.get_financial(client_id)?;
    let property = directory.get_property(client_id)?;

    let solvency = match check_solvency(&financial) {
        Ok(solvency) => solvency,
        Err(LoanError::InvalidInput(reason)) if financial.loan_duration == 0 => {
            tracing::warn!(client = %client_id, %reason, "no loan duration, treating client as insolvent");
            Solvency::Insolvent
        }
        Err(e) => return Err(e),
    };
    let valuation = evaluate_property(&property);

    let decision = Decision::from_outcomes(solvency, valuation);
    tracing::info!(
        client = %client_id,
        accepted = decision.is_accepted(),
        reasons = ?decision.reasons(),
        "loan decision made"
    );

    Ok(decision)
}
