/// Fields of one input row, as split by the reader.
pub type RawRow = Vec<String>;

/// One record of the input together with the file line it starts on. A blank
/// line is a record with no fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub line: usize,
    pub fields: RawRow,
}

/// A validated user row. Only lives while its row is being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub surname: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(Record),
    MissingField(usize),
    InvalidEmail(usize, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingField,
    InvalidEmail(String),
    Undecodable(String),
}

/// Outcome of a single data row. The row number is the 1-based file line the
/// record starts on, so the header is row 1 and blank lines keep their number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    Inserted(usize),
    DuplicateSkipped(usize),
    DryRunSimulated(usize, Record),
    SkippedInvalid(usize, SkipReason),
    PersistenceError(usize, String),
}

impl ProcessingResult {
    pub fn row(&self) -> usize {
        match self {
            ProcessingResult::Inserted(row)
            | ProcessingResult::DuplicateSkipped(row)
            | ProcessingResult::DryRunSimulated(row, _)
            | ProcessingResult::SkippedInvalid(row, _)
            | ProcessingResult::PersistenceError(row, _) => *row,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub inserted: usize,
    pub duplicates: usize,
    pub simulated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_results(results: &[ProcessingResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match result {
                ProcessingResult::Inserted(_) => summary.inserted += 1,
                ProcessingResult::DuplicateSkipped(_) => summary.duplicates += 1,
                ProcessingResult::DryRunSimulated(..) => summary.simulated += 1,
                ProcessingResult::SkippedInvalid(..) => summary.skipped += 1,
                ProcessingResult::PersistenceError(..) => summary.failed += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.inserted + self.duplicates + self.simulated + self.skipped + self.failed
    }
}
