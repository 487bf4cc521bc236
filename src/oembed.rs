use async_trait::async_trait;
use eyre::Result;
use log::debug;
use serde::Deserialize;

use crate::{PipelineError, VideoId};

pub const DEFAULT_ENDPOINT: &str = "https://www.youtube.com/oembed";

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Title and channel of a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub title: String,
    pub author: String,
    pub url: String,
}

impl VideoInfo {
    /// Placeholder metadata used when the oembed lookup fails
    pub fn placeholder(video_id: &VideoId) -> Self {
        Self {
            title: UNKNOWN_TITLE.to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
            url: video_id.watch_url(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: Option<String>,
    author_name: Option<String>,
}

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn video_info(&self, video_id: &VideoId) -> Result<VideoInfo>;
}

/// Fetch metadata and convert any provider failure into `MetadataUnavailable`
pub async fn fetch_metadata(
    provider: &dyn MetadataProvider,
    video_id: &VideoId,
) -> Result<VideoInfo, PipelineError> {
    provider
        .video_info(video_id)
        .await
        .map_err(|e| PipelineError::MetadataUnavailable(format!("{e:#}")))
}

pub struct OembedClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OembedClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl MetadataProvider for OembedClient {
    async fn video_info(&self, video_id: &VideoId) -> Result<VideoInfo> {
        let url = video_id.watch_url();
        debug!("Fetching oembed metadata for {url}");

        let resp: OembedResponse = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url.as_str()), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(VideoInfo {
            title: resp.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            author: resp.author_name.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            url,
        })
    }
}
