use log::{info, warn};

use crate::PipelineError;
use crate::oembed::MetadataProvider;
use crate::summarize::Summarizer;
use crate::video;
use crate::youtube::TranscriptProvider;

/// Snapshot of one successful summarization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    pub title: String,
    pub author: String,
    pub url: String,
    pub transcript: String,
    pub summary: String,
}

/// Session-lifetime list of successful runs, append-only.
///
/// Starts empty and lives only as long as the owning session.
#[derive(Debug, Default)]
pub struct History {
    records: Vec<SummaryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push(&mut self, record: SummaryRecord) {
        self.records.push(record);
    }

    /// Records in display order, most recent first
    pub fn recent_first(&self) -> impl Iterator<Item = &SummaryRecord> {
        self.records.iter().rev()
    }
}

/// Result of one submission
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Nothing was entered; no stage ran
    EmptyInput,
    Failed(PipelineError),
    Summarized {
        record: SummaryRecord,
        /// Non-fatal problem, e.g. metadata replaced by placeholders
        notice: Option<PipelineError>,
    },
}

/// Runs extraction, fetching and summarization for one URL at a time
pub struct Pipeline {
    metadata: Box<dyn MetadataProvider>,
    transcripts: Box<dyn TranscriptProvider>,
    summarizer: Summarizer,
}

impl Pipeline {
    pub fn new(
        metadata: Box<dyn MetadataProvider>,
        transcripts: Box<dyn TranscriptProvider>,
        summarizer: Summarizer,
    ) -> Self {
        Self {
            metadata,
            transcripts,
            summarizer,
        }
    }

    /// Run the full pipeline for `url`, appending to `history` only on success
    pub async fn submit(&self, history: &mut History, url: &str) -> Outcome {
        let url = url.trim();
        if url.is_empty() {
            return Outcome::EmptyInput;
        }
        info!("Summarizing {url}");

        match self.run(url).await {
            Ok((record, notice)) => {
                history.push(record.clone());
                info!("Summary ready for \"{}\" ({} in history)", record.title, history.len());
                Outcome::Summarized { record, notice }
            }
            Err(e) => {
                warn!("Run for {url} failed [{}]: {e}", e.kind());
                Outcome::Failed(e)
            }
        }
    }

    async fn run(&self, url: &str) -> Result<(SummaryRecord, Option<PipelineError>), PipelineError> {
        let bundle = video::fetch_video_info(self.metadata.as_ref(), self.transcripts.as_ref(), url).await?;
        let summary = self.summarizer.summarize(&bundle.info, &bundle.transcript).await?;

        let record = SummaryRecord {
            title: bundle.info.title,
            author: bundle.info.author,
            url: bundle.info.url,
            transcript: bundle.transcript.as_str().to_string(),
            summary,
        };
        Ok((record, bundle.metadata_error))
    }
}
