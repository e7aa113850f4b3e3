/// Orchestration-level errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("unknown area key {key}; known keys: {known}")]
    UnknownArea { key: String, known: String },

    #[error("job {job_id} failed: {reason}")]
    JobFailed { job_id: String, reason: String },

    #[error("{failed} of {total} jobs failed")]
    BatchFailed { failed: usize, total: usize },
}
