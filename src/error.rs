/// Failure of one pipeline stage, carried as a value rather than raised.
///
/// Every variant renders as the message shown inline to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Could not get video transcript: {0}")]
    TranscriptUnavailable(String),

    #[error("Could not fetch video details: {0}")]
    MetadataUnavailable(String),

    #[error("Error generating summary: {0}")]
    SummaryGenerationFailed(String),
}

impl PipelineError {
    /// Short machine-readable label, used in logs and page markup
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidUrl(_) => "invalid-url",
            PipelineError::TranscriptUnavailable(_) => "transcript-unavailable",
            PipelineError::MetadataUnavailable(_) => "metadata-unavailable",
            PipelineError::SummaryGenerationFailed(_) => "summary-failed",
        }
    }
}
