use regex::Regex;
use url::Url;

/// Where a played file came from, as far as the server API is concerned:
/// the API base, the item being streamed and the token the stream was
/// authorized with.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    base: Url,
    item_id: String,
    api_key: Option<String>,
}

impl StreamInfo {
    /// Recognizes a Jellyfin stream or download URL in mpv's `path`
    /// property. Anything else, local files included, is `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let url = Url::parse(path).ok()?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return None;
        }

        let regex = Regex::new(
            r"(?i)/(?:Videos|Items)/([0-9a-f]{32}|[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})/",
        )
        .ok()?;
        let capture = regex.captures(url.path())?;
        let item_id = capture.get(1)?.as_str().to_string();

        // Everything before `/Videos/...` is the server base, reverse
        // proxy subpath included.
        let mut base = url.clone();
        base.set_path(&url.path()[..capture.get(0)?.start() + 1]);
        base.set_query(None);
        base.set_fragment(None);

        let api_key = url
            .query_pairs()
            .find(|(key, _)| key == "api_key" || key == "ApiKey")
            .map(|(_, value)| value.into_owned());

        Some(Self { base, item_id, api_key })
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn set_base(&mut self, mut base: Url) {
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        self.base = base;
    }

    pub fn segments_url(&self) -> Url {
        self.base
            .join(&format!("Episode/{}/IntroSkipperSegments", self.item_id))
            .unwrap()
    }

    pub fn ui_config_url(&self) -> Url {
        self.base.join("Intros/UserInterfaceConfiguration").unwrap()
    }
}
