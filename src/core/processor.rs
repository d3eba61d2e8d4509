use crate::domain::model::{ProcessingResult, Record};
use crate::domain::ports::{GatewayError, UserGateway};

/// Commits (or, in dry-run mode, only simulates) the insert of one validated
/// record. Gateway failures stay scoped to this row.
pub async fn process<G>(record: Record, row: usize, dry_run: bool, gateway: &mut G) -> ProcessingResult
where
    G: UserGateway + ?Sized,
{
    if dry_run {
        tracing::debug!(row, email = %record.email, "dry run, insert suppressed");
        return ProcessingResult::DryRunSimulated(row, record);
    }

    match gateway
        .insert(&record.name, &record.surname, &record.email)
        .await
    {
        Ok(()) => {
            tracing::debug!(row, email = %record.email, "row inserted");
            ProcessingResult::Inserted(row)
        }
        Err(GatewayError::DuplicateKey) => {
            tracing::debug!(row, email = %record.email, "duplicate email");
            ProcessingResult::DuplicateSkipped(row)
        }
        Err(GatewayError::Other(message)) => {
            tracing::warn!(row, error = %message, "insert failed");
            ProcessingResult::PersistenceError(row, message)
        }
    }
}
