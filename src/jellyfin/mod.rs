mod segment;
mod stream;
mod ui_config;

pub use segment::{active_segment, Segment, SegmentKind, SegmentSet};
pub use stream::StreamInfo;
pub use ui_config::UiConfig;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Result};

fn authorization(token: &str) -> String {
    format!("MediaBrowser Token={}", token)
}

pub async fn fetch_segments(http: &Client, stream: &StreamInfo, token: &str) -> Result<SegmentSet> {
    http.get(stream.segments_url())
        .header(AUTHORIZATION, authorization(token))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

pub async fn fetch_ui_config(http: &Client, stream: &StreamInfo, token: &str) -> Result<UiConfig> {
    http.get(stream.ui_config_url())
        .header(AUTHORIZATION, authorization(token))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}
