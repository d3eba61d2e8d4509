use crate::core::processor::process;
use crate::core::report::COMPLETED_BANNER;
use crate::core::validator::validate;
use crate::domain::model::{ProcessingResult, RunSummary, SkipReason, SourceRow, ValidationOutcome};
use crate::domain::ports::UserGateway;
use crate::utils::error::{Result, UploadError};
use std::io::Write;

/// Drives every data row of `rows` through validation and the processor, one
/// row at a time, writing one report line per row to `out`.
///
/// The first record is the header and is ignored. Every other record is
/// reported under the file line it starts on, so a blank line between data
/// rows is its own (missing-data) row.
/// Row-scoped failures (bad data, duplicates, insert errors) end up in the
/// returned results. Only a fatal source error or a failed write to `out`
/// aborts the run.
pub async fn run<I, G, W>(
    rows: I,
    dry_run: bool,
    gateway: &mut G,
    out: &mut W,
) -> Result<Vec<ProcessingResult>>
where
    I: IntoIterator<Item = Result<SourceRow>>,
    G: UserGateway + ?Sized,
    W: Write + ?Sized,
{
    let mut rows = rows.into_iter();
    let mut results = Vec::new();

    match rows.next() {
        Some(Ok(header)) => tracing::debug!(fields = ?header.fields, "header skipped"),
        Some(Err(e)) if e.is_row_scoped() => tracing::warn!(error = %e, "undecodable header skipped"),
        Some(Err(e)) => return Err(e),
        None => tracing::warn!("input is empty"),
    }

    for item in rows {
        let result = match item {
            Ok(SourceRow { line, fields }) => process_row(&fields, line, dry_run, gateway).await,
            Err(UploadError::RowDecodeError { line, message }) => {
                tracing::debug!(row = line, error = %message, "undecodable row");
                ProcessingResult::SkippedInvalid(line, SkipReason::Undecodable(message))
            }
            Err(e) => {
                tracing::error!(after = results.len(), error = %e, "input stream failed");
                return Err(e);
            }
        };

        writeln!(out, "{}", result)?;
        results.push(result);
    }

    writeln!(out, "{}", COMPLETED_BANNER)?;
    out.flush()?;

    let summary = RunSummary::from_results(&results);
    tracing::info!(
        rows = summary.total(),
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        simulated = summary.simulated,
        skipped = summary.skipped,
        failed = summary.failed,
        dry_run,
        "upload finished"
    );

    Ok(results)
}

async fn process_row<G>(fields: &[String], row: usize, dry_run: bool, gateway: &mut G) -> ProcessingResult
where
    G: UserGateway + ?Sized,
{
    match validate(fields, row) {
        ValidationOutcome::Valid(record) => process(record, row, dry_run, gateway).await,
        ValidationOutcome::MissingField(row) => {
            tracing::debug!(row, fields = fields.len(), "missing data");
            ProcessingResult::SkippedInvalid(row, SkipReason::MissingField)
        }
        ValidationOutcome::InvalidEmail(row, raw) => {
            tracing::debug!(row, email = %raw, "invalid email");
            ProcessingResult::SkippedInvalid(row, SkipReason::InvalidEmail(raw))
        }
    }
}
