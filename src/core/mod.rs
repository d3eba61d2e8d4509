pub mod ingest;
pub mod processor;
pub mod report;
pub mod validator;

