mod worker;

use crate::config::Config;
use crate::jellyfin::{Segment, SegmentKind, StreamInfo};
use worker::Worker;

use std::ops::Deref;
use std::time::Duration;

use mpv_client::{mpv_handle, Handle};

static NAME_PROP_PATH: &str = "path";
static NAME_PROP_TIME: &str = "time-pos";

pub const REPL_PROP_TIME: u64 = 1;

// Skip prompt currently offered to the user. The trigger fires at most
// once per window; a fresh window re-arms it.
struct Prompt {
    kind: SegmentKind,
    segment: Segment,
    armed: bool,
    shown: bool,
}

pub struct Client {
    mpv: Handle,
    config: Config,
    worker: Worker,
    prompt: Option<Prompt>,
}

impl Client {
    pub fn from_ptr(handle: *mut mpv_handle) -> Self {
        Self {
            mpv: Handle::from_ptr(handle),
            config: Config::get(),
            worker: Worker::new(),
            prompt: None,
        }
    }

    pub fn start_file(&mut self) {
        let path: String = self.get_property(NAME_PROP_PATH).unwrap();
        let mut stream = match StreamInfo::from_path(&path) {
            Some(stream) => stream,
            None => {
                log::debug!("Not a Jellyfin stream, nothing to do");
                return;
            }
        };

        if let Some(base) = &self.config.server_address {
            stream.set_base(base.clone());
        }

        // The key the stream was authorized with wins over the configured one.
        let token = stream
            .api_key()
            .map(str::to_owned)
            .or_else(|| self.config.api_key.clone());
        let token = match token {
            Some(token) => token,
            None => {
                log::warn!("No API key for item {}, segments unavailable", stream.item_id());
                return;
            }
        };

        log::info!("Looking up skip segments for item {}", stream.item_id());

        self.worker.start(stream, token);
        self.observe_property::<f64>(REPL_PROP_TIME, NAME_PROP_TIME)
            .unwrap();
    }

    pub fn time_change(&mut self, time_pos: f64) {
        match self.worker.get_active_segment(time_pos) {
            Some((kind, segment)) => self.show_prompt(kind, segment, time_pos),
            None => self.hide_prompt(),
        }
    }

    pub fn client_message(&mut self, args: &[&str]) {
        match args {
            ["key-binding", "skip-segment", "u-", ..] => self.skip_requested(),
            ["skip-segment"] => self.skip_requested(),
            _ => {}
        };
    }

    pub fn end_file(&mut self) {
        self.worker.stop();
        self.hide_prompt();
        self.unobserve_property(REPL_PROP_TIME).unwrap();
    }

    fn show_prompt(&mut self, kind: SegmentKind, segment: Segment, time_pos: f64) {
        // Working only if entering a new window
        if self.prompt.as_ref().map(|p| &p.kind) == Some(&kind) {
            return;
        }

        let shown = match self.worker.get_caption(&kind) {
            Some(caption) => {
                let remaining = segment.hide_skip_prompt_at - time_pos;
                self.osd_message(caption, Duration::from_secs_f64(remaining)).unwrap();
                true
            }
            None => {
                log::debug!("No caption for segment {}", kind);
                false
            }
        };

        log::info!("Offering to skip segment {}", kind);
        self.prompt = Some(Prompt {
            kind,
            segment,
            armed: true,
            shown,
        });
    }

    fn hide_prompt(&mut self) {
        // Working only if exiting a window
        if let Some(prompt) = self.prompt.take() {
            if prompt.shown {
                self.osd_message(String::new(), Duration::from_millis(1)).unwrap();
            }
        }
    }

    fn skip_requested(&mut self) {
        let (kind, target_ms) = match &mut self.prompt {
            Some(prompt) if prompt.armed => {
                prompt.armed = false;
                prompt.shown = false; // a skip notice must outlive the window
                (prompt.kind.clone(), prompt.segment.skip_target_ms())
            }
            Some(prompt) => {
                log::debug!("Segment {} already skipped", prompt.kind);
                return;
            }
            None => {
                log::info!("No active segment, ignoring skip request");
                return;
            }
        };

        self.set_property(NAME_PROP_TIME, target_ms as f64 / 1000.0).unwrap();
        log::info!("Skipped segment {} to {}ms", kind, target_ms);
        if self.config.skip_notice {
            self.osd_message(format!("Skipped segment {}", kind), Duration::from_secs(8))
                .unwrap();
        }
    }
}

impl Deref for Client {
    type Target = Handle;

    #[inline]
    fn deref(&self) -> &Handle {
        &self.mpv
    }
}
