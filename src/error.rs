use snafu::Snafu;
use std::{num::ParseIntError, path::PathBuf};

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Unable to read records file {}", path.display()))]
    ReadFile {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Unable to write records file {}", path.display()))]
    WriteFile {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Records file {} is not valid JSON", path.display()))]
    ParseRecords {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[snafu(display("Records file {} must contain a JSON array", path.display()))]
    NotAnArray { path: PathBuf },
    #[snafu(display("Record #{} in {} is not a JSON object", index, path.display()))]
    RecordNotObject { path: PathBuf, index: usize },
    #[snafu(display("Error serialising records"))]
    SerialiseRecords { source: serde_json::Error },
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error creating database"))]
    CreateDatabase { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    Migrate { source: sqlx::migrate::MigrateError },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error starting SQL transaction"))]
    BeginTransaction { source: sqlx::Error },
    #[snafu(display("Error commiting SQL transaction"))]
    CommitTransaction { source: sqlx::Error },
    #[snafu(display("Error rolling back SQL transaction"))]
    RollbackTransaction { source: sqlx::Error },
    #[snafu(display(
        "Bulk insert into {:?} failed at record #{} of {}, nothing was inserted",
        collection,
        failed_at,
        attempted
    ))]
    BulkInsert {
        collection: String,
        attempted: usize,
        failed_at: usize,
        #[snafu(source(from(RosterError, Box::new)))]
        source: Box<RosterError>,
    },
    #[snafu(display("Collection {:?} does not exist", name))]
    MissingCollection { name: String },
    #[snafu(display("Document id {:?} already exists in {:?}", id, collection))]
    DuplicateId { collection: String, id: String },
    #[snafu(display("Document id must be a string or a number, found {}", found))]
    InvalidDocumentId { found: serde_json::Value },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Invalid locale: {:?}", provided))]
    InvalidLocale {
        source: icu::locale::ParseError,
        provided: String,
    },
    #[snafu(display("Invalid calendar algorithm: {:?}", provided))]
    InvalidCalendarAlgorithm { provided: String },
    #[snafu(display("Unable to create date formatter"))]
    BadDateFormatter {
        source: icu::datetime::DateTimeFormatterLoadError,
    },
    #[snafu(display("Invalid date range for generated records"))]
    SeedDateRange { source: jiff::Error },
    #[snafu(display("Invalid API URL {:?}: {}", provided, reason))]
    InvalidApiUrl { provided: String, reason: String },
    #[snafu(display("Unable to build HTTP client"))]
    BuildHttpClient { source: reqwest::Error },
    #[snafu(display("Invalid student: {}", reason))]
    InvalidStudent { reason: String },
    #[snafu(display("Unable to listen on {}", address))]
    Bind {
        source: std::io::Error,
        address: String,
    },
    #[snafu(display("Error serving app"))]
    Serve { source: std::io::Error },
}
