use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

/// Label of a skip segment as keyed by the Intro Skipper server plugin.
///
/// Unknown labels are kept as [`SegmentKind::Other`] so a newer server can
/// still have its segments skipped, caption or not. The declaration order
/// is the evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentKind {
    Introduction,
    Credits,
    Other(String),
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Introduction => write!(f, "Introduction"),
            SegmentKind::Credits => write!(f, "Credits"),
            SegmentKind::Other(label) => write!(f, "{}", label),
        }
    }
}

impl<'de> Deserialize<'de> for SegmentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "Introduction" => SegmentKind::Introduction,
            "Credits" => SegmentKind::Credits,
            _ => SegmentKind::Other(s),
        })
    }
}

/// One detected segment of an episode, with the window during which the
/// skip prompt is offered and the position to land on when skipping.
#[derive(Debug, serde_derive::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Segment {
    pub valid: bool,
    pub show_skip_prompt_at: f64,
    pub hide_skip_prompt_at: f64,
    pub intro_end: f64,
}

pub type SegmentSet = BTreeMap<SegmentKind, Segment>;

impl Segment {
    pub fn is_in_prompt_window(&self, time_pos: f64) -> bool {
        time_pos >= self.show_skip_prompt_at && time_pos < self.hide_skip_prompt_at
    }

    /// Seek target in milliseconds, the unit the player API seeks in.
    pub fn skip_target_ms(&self) -> i64 {
        (self.intro_end * 1000.0).round() as i64
    }
}

/// Finds the segment whose prompt window contains `time_pos`.
///
/// A segment with `valid == false` aborts the whole scan: one failed
/// detection disables skipping for the entire item, not just that entry.
pub fn active_segment(segments: &SegmentSet, time_pos: f64) -> Option<(&SegmentKind, &Segment)> {
    for (kind, segment) in segments {
        if !segment.valid {
            return None;
        }
        if segment.is_in_prompt_window(time_pos) {
            return Some((kind, segment));
        }
    }

    None
}
