use crate::domain::model::{ProcessingResult, SkipReason};
use std::fmt;

pub const COMPLETED_BANNER: &str = "File processing completed.";
pub const TABLE_CREATED: &str = "Table 'users' created successfully.";

impl fmt::Display for ProcessingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingResult::Inserted(row) => write!(f, "Row {} processed successfully.", row),
            ProcessingResult::DuplicateSkipped(row) => write!(
                f,
                "Error: Duplicate email address at row {}. Skipping this row.",
                row
            ),
            ProcessingResult::DryRunSimulated(row, record) => write!(
                f,
                "Dry run: Row {} - Name: {}, Surname: {}, Email: {} - processed successfully (Not inserted into database).",
                row, record.name, record.surname, record.email
            ),
            ProcessingResult::SkippedInvalid(row, SkipReason::MissingField) => {
                write!(f, "Error: Missing data at row {}. Skipping this row.", row)
            }
            ProcessingResult::SkippedInvalid(row, SkipReason::InvalidEmail(_)) => write!(
                f,
                "Error: Invalid email format at row {}. Skipping this row.",
                row
            ),
            ProcessingResult::SkippedInvalid(row, SkipReason::Undecodable(message)) => write!(
                f,
                "Error: Unreadable data at row {}: {}. Skipping this row.",
                row, message
            ),
            ProcessingResult::PersistenceError(row, message) => write!(
                f,
                "Error: Database error at row {}: {}. Skipping this row.",
                row, message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Record;

    #[test]
    fn test_outcome_lines() {
        assert_eq!(
            ProcessingResult::Inserted(2).to_string(),
            "Row 2 processed successfully."
        );
        assert_eq!(
            ProcessingResult::DuplicateSkipped(3).to_string(),
            "Error: Duplicate email address at row 3. Skipping this row."
        );
        assert_eq!(
            ProcessingResult::SkippedInvalid(4, SkipReason::MissingField).to_string(),
            "Error: Missing data at row 4. Skipping this row."
        );
        assert_eq!(
            ProcessingResult::SkippedInvalid(5, SkipReason::InvalidEmail("x".into())).to_string(),
            "Error: Invalid email format at row 5. Skipping this row."
        );
        assert_eq!(
            ProcessingResult::PersistenceError(6, "connection reset".into()).to_string(),
            "Error: Database error at row 6: connection reset. Skipping this row."
        );
    }

    #[test]
    fn test_dry_run_line_echoes_record() {
        let record = Record {
            name: "John".to_string(),
            surname: "Doe".to_string(),
            email: "john@example.com".to_string(),
        };
        assert_eq!(
            ProcessingResult::DryRunSimulated(2, record).to_string(),
            "Dry run: Row 2 - Name: John, Surname: Doe, Email: john@example.com - processed successfully (Not inserted into database)."
        );
    }
}
