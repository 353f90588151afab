use super::segment::SegmentKind;

use serde_derive::Deserialize;

/// Button captions as configured on the server.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UiConfig {
    pub skip_button_intro_text: String,
    pub skip_button_end_credits_text: String,
}

impl UiConfig {
    /// Caption for a segment kind. Unknown kinds have no caption.
    pub fn caption(&self, kind: &SegmentKind) -> Option<&str> {
        match kind {
            SegmentKind::Introduction => Some(&self.skip_button_intro_text),
            SegmentKind::Credits => Some(&self.skip_button_end_credits_text),
            SegmentKind::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_ignores_unknown_fields() {
        let config: UiConfig = serde_json::from_str(
            r#"{
                "SkipButtonIntroText": "Skip Intro",
                "SkipButtonEndCreditsText": "Next Episode",
                "SkipButtonVisible": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.skip_button_intro_text, "Skip Intro");
        assert_eq!(config.skip_button_end_credits_text, "Next Episode");
    }

    #[test]
    fn caption_per_kind() {
        let config = UiConfig {
            skip_button_intro_text: "Skip Intro".to_string(),
            skip_button_end_credits_text: "Next Episode".to_string(),
        };

        assert_eq!(config.caption(&SegmentKind::Introduction), Some("Skip Intro"));
        assert_eq!(config.caption(&SegmentKind::Credits), Some("Next Episode"));
        assert_eq!(config.caption(&SegmentKind::Other("Recap".to_string())), None);
    }
}
