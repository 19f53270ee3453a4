// Intake Parser
// Extracts a client record from a labeled-line intake text file

use crate::db::ClientRecord;
use crate::error::{LoanError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// ============================================================================
// FIELD PATTERNS
// ============================================================================

/// A labeled line in the intake file, e.g. `Adresse: 12 rue des Lilas`
struct FieldPattern {
    label: &'static str,
    regex: Regex,
}

impl FieldPattern {
    fn text(label: &'static str) -> Self {
        Self::build(label, r"(.+)")
    }

    fn digits(label: &'static str) -> Self {
        Self::build(label, r"([0-9]+)")
    }

    fn build(label: &'static str, value: &str) -> Self {
        let pattern = format!("{}: {}", regex::escape(label), value);
        FieldPattern {
            label,
            regex: Regex::new(&pattern).expect("valid regex"),
        }
    }

    /// First occurrence of the label, trailing whitespace removed
    fn capture<'t>(&self, text: &'t str) -> Result<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end())
            .ok_or_else(|| LoanError::Validation(format!("missing field '{}'", self.label)))
    }

    fn capture_number(&self, text: &str) -> Result<i64> {
        let raw = self.capture(text)?;
        raw.parse::<i64>().map_err(|e| {
            LoanError::Validation(format!("field '{}' is not a valid amount ({}): {}", self.label, raw, e))
        })
    }
}

struct IntakePatterns {
    name: FieldPattern,
    address: FieldPattern,
    email: FieldPattern,
    phone: FieldPattern,
    loan_amount: FieldPattern,
    loan_duration: FieldPattern,
    monthly_income: FieldPattern,
    monthly_expenses: FieldPattern,
    property_description: FieldPattern,
}

static PATTERNS: LazyLock<IntakePatterns> = LazyLock::new(|| IntakePatterns {
    name: FieldPattern::text("Nom du Client"),
    address: FieldPattern::text("Adresse"),
    email: FieldPattern::text("Email"),
    phone: FieldPattern::text("Numero de Telephone"),
    loan_amount: FieldPattern::digits("Montant du Pret Demande"),
    loan_duration: FieldPattern::digits("Duree du Pret"),
    monthly_income: FieldPattern::digits("Revenu Mensuel"),
    monthly_expenses: FieldPattern::digits("Depenses Mensuelles"),
    property_description: FieldPattern::text("Description de la Propriete"),
});

// ============================================================================
// PARSING
// ============================================================================

/// Parse the intake text into a client record.
///
/// Every label must be present; the first occurrence of each label is used.
/// Numeric fields accept plain ASCII digits only.
pub fn parse_intake(text: &str) -> Result<ClientRecord> {
    let p = &*PATTERNS;

    Ok(ClientRecord {
        name: p.name.capture(text)?.to_string(),
        address: p.address.capture(text)?.to_string(),
        email: p.email.capture(text)?.to_string(),
        phone: p.phone.capture(text)?.to_string(),
        loan_amount: p.loan_amount.capture_number(text)?,
        loan_duration: p.loan_duration.capture_number(text)?,
        monthly_income: p.monthly_income.capture_number(text)?,
        monthly_expenses: p.monthly_expenses.capture_number(text)?,
        property_description: p.property_description.capture(text)?.to_string(),
    })
}

/// Read and parse an intake file
pub fn parse_intake_file(file_path: &Path) -> Result<ClientRecord> {
    let text = std::fs::read_to_string(file_path).map_err(|source| LoanError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;

    let record = parse_intake(&text)?;
    tracing::debug!(file = %file_path.display(), client = %record.name, "intake file parsed");

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Nom du Client: Jean Dupont
Adresse: 12 rue des Lilas, 69003 Lyon
Email: jean.dupont@example.fr
Numero de Telephone: 06 01 02 03 04
Montant du Pret Demande: 150000
Duree du Pret: 240
Revenu Mensuel: 4500
Depenses Mensuelles: 1800
Description de la Propriete: Maison de ville avec jardin et piscine
";

    #[test]
    fn test_parse_sample() {
        let record = parse_intake(SAMPLE).unwrap();

        assert_eq!(record.name, "Jean Dupont");
        assert_eq!(record.address, "12 rue des Lilas, 69003 Lyon");
        assert_eq!(record.email, "jean.dupont@example.fr");
        assert_eq!(record.phone, "06 01 02 03 04");
        assert_eq!(record.loan_amount, 150000);
        assert_eq!(record.loan_duration, 240);
        assert_eq!(record.monthly_income, 4500);
        assert_eq!(record.monthly_expenses, 1800);
        assert_eq!(record.property_description, "Maison de ville avec jardin et piscine");
    }

    #[test]
    fn test_parse_windows_line_endings() {
        let text = SAMPLE.replace('\n', "\r\n");
        let record = parse_intake(&text).unwrap();

        assert_eq!(record.name, "Jean Dupont");
        assert_eq!(record.property_description, "Maison de ville avec jardin et piscine");
    }

    #[test]
    fn test_missing_label_is_validation_error() {
        let text = SAMPLE.replace("Revenu Mensuel: 4500\n", "");
        let err = parse_intake(&text).unwrap_err();

        match err {
            LoanError::Validation(msg) => assert!(msg.contains("Revenu Mensuel"), "got: {}", msg),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_amount_is_missing() {
        let text = SAMPLE.replace("Duree du Pret: 240", "Duree du Pret: vingt ans");
        let err = parse_intake(&text).unwrap_err();

        assert!(matches!(err, LoanError::Validation(ref msg) if msg.contains("Duree du Pret")));
    }

    #[test]
    fn test_non_ascii_digits_are_missing() {
        let text = SAMPLE.replace("Revenu Mensuel: 4500", "Revenu Mensuel: ٤٥٠٠");
        let err = parse_intake(&text).unwrap_err();

        match err {
            LoanError::Validation(msg) => {
                assert_eq!(msg, "missing field 'Revenu Mensuel'")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_amount_is_validation_error() {
        let text = SAMPLE.replace("150000", "99999999999999999999999");
        let err = parse_intake(&text).unwrap_err();

        assert!(matches!(err, LoanError::Validation(ref msg) if msg.contains("Montant du Pret Demande")));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = format!("{}Nom du Client: Autre Personne\n", SAMPLE);
        let record = parse_intake(&text).unwrap();

        assert_eq!(record.name, "Jean Dupont");
    }

    #[test]
    fn test_parse_intake_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let record = parse_intake_file(file.path()).unwrap();
        assert_eq!(record.name, "Jean Dupont");
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_intake_file(Path::new("/nonexistent/client.txt")).unwrap_err();
        assert!(matches!(err, LoanError::Io { .. }));
    }
}
