use log::{debug, warn};

use crate::oembed::{self, MetadataProvider, VideoInfo};
use crate::youtube::{self, Transcript, TranscriptProvider};
use crate::{PipelineError, VideoId, extract_video_id};

/// Metadata plus transcript for one video
#[derive(Debug, Clone)]
pub struct VideoBundle {
    pub video_id: VideoId,
    pub info: VideoInfo,
    pub transcript: Transcript,
    /// Set when metadata fell back to placeholders
    pub metadata_error: Option<PipelineError>,
}

/// Resolve a pasted URL into metadata and transcript.
///
/// Metadata failure degrades to placeholder fields; transcript failure is fatal.
pub async fn fetch_video_info(
    metadata: &dyn MetadataProvider,
    transcripts: &dyn TranscriptProvider,
    url: &str,
) -> Result<VideoBundle, PipelineError> {
    let video_id = extract_video_id(url).ok_or_else(|| PipelineError::InvalidUrl(url.trim().to_string()))?;
    debug!("Resolved {url} to video {video_id}");

    let (info, metadata_error) = match oembed::fetch_metadata(metadata, &video_id).await {
        Ok(info) => (info, None),
        Err(e) => {
            warn!("Metadata for {video_id} unavailable, using placeholders: {e}");
            (VideoInfo::placeholder(&video_id), Some(e))
        }
    };

    let transcript = youtube::fetch_transcript(transcripts, &video_id).await?;

    Ok(VideoBundle {
        video_id,
        info,
        transcript,
        metadata_error,
    })
}
