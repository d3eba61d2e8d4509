use crate::domain::model::{Record, ValidationOutcome};
use email_address::{EmailAddress, Options};

/// Number of leading fields every data row must carry: name, surname, email.
pub const REQUIRED_FIELDS: usize = 3;

fn email_options() -> Options {
    Options::default()
        .with_required_tld()
        .without_domain_literal()
        .without_display_text()
}

/// Classifies one raw row. Pure: no I/O, same input gives the same outcome.
pub fn validate(raw_fields: &[String], row: usize) -> ValidationOutcome {
    if raw_fields.len() < REQUIRED_FIELDS {
        return ValidationOutcome::MissingField(row);
    }

    let name = raw_fields[0].trim();
    let surname = raw_fields[1].trim();
    let email = raw_fields[2].trim();

    if name.is_empty() || surname.is_empty() || email.is_empty() {
        return ValidationOutcome::MissingField(row);
    }

    if !is_valid_email(email) {
        return ValidationOutcome::InvalidEmail(row, email.to_string());
    }

    ValidationOutcome::Valid(Record {
        name: name.to_string(),
        surname: surname.to_string(),
        email: email.to_string(),
    })
}

/// RFC 5322 address syntax with a dotted host name as domain. Display names,
/// `[ip]` domain literals and dotted-quad hosts are rejected.
pub fn is_valid_email(email: &str) -> bool {
    match EmailAddress::parse_with_options(email, email_options()) {
        Ok(address) => is_host_name(address.domain()),
        Err(_) => false,
    }
}

/// Labels of letters, digits and inner hyphens, at most 63 bytes each; the
/// top-level label is letters only.
fn is_host_name(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some(tld) = labels.last() else {
        return false;
    };

    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_valid_row_is_trimmed() {
        let outcome = validate(&fields(&[" John ", "Doe\t", "  john@example.com "]), 2);
        assert_eq!(
            outcome,
            ValidationOutcome::Valid(Record {
                name: "John".to_string(),
                surname: "Doe".to_string(),
                email: "john@example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let outcome = validate(&fields(&["Ann", "Lee", "ann@example.org", "extra", ""]), 7);
        assert!(matches!(outcome, ValidationOutcome::Valid(ref r) if r.email == "ann@example.org"));
    }

    #[test]
    fn test_short_row_is_missing_field() {
        assert_eq!(validate(&fields(&["John", "Doe"]), 3), ValidationOutcome::MissingField(3));
        assert_eq!(validate(&[], 4), ValidationOutcome::MissingField(4));
    }

    #[test]
    fn test_blank_field_is_missing_field() {
        assert_eq!(
            validate(&fields(&["John", "Doe", ""]), 2),
            ValidationOutcome::MissingField(2)
        );
        assert_eq!(
            validate(&fields(&["   ", "Doe", "john@example.com"]), 5),
            ValidationOutcome::MissingField(5)
        );
    }

    #[test]
    fn test_missing_field_wins_over_bad_email() {
        assert_eq!(
            validate(&fields(&["", "Roe", "not-an-email"]), 2),
            ValidationOutcome::MissingField(2)
        );
    }

    #[test]
    fn test_invalid_email_keeps_trimmed_value() {
        assert_eq!(
            validate(&fields(&["Jane", "Roe", " not-an-email "]), 2),
            ValidationOutcome::InvalidEmail(2, "not-an-email".to_string())
        );
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("o'connor+tag@mail.example.co.uk"));

        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("john@localhost"));
        assert!(!is_valid_email("john@@example.com"));
        assert!(!is_valid_email("john doe@example.com"));
        assert!(!is_valid_email("John <john@example.com>"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john@exa_mple.com"));
        assert!(!is_valid_email("john@127.0.0.1"));
        assert!(!is_valid_email("john@example.c0m"));
        assert!(!is_valid_email("john@-example.com"));
        assert!(is_valid_email("john@mail-1.example.com"));
    }
}
