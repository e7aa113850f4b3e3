/// Errors raised inside source adapters and their transports.
///
/// The job runner never lets these escape a job: each one is logged and the
/// failing adapter contributes zero sightings.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("failed to parse {source_name} response: {reason}")]
    Parse { source_name: String, reason: String },

    #[error("missing credential: {name}")]
    MissingCredential { name: String },

    #[error("adapter {adapter} timed out after {secs}s")]
    Timeout { adapter: String, secs: u64 },
}
