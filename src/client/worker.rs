use crate::jellyfin::{self, Segment, SegmentKind, SegmentSet, StreamInfo, UiConfig};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use tokio::runtime::Runtime;
use tokio::select;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct SessionData {
    segments: Option<SegmentSet>,
    ui_config: Option<UiConfig>,
}

type SharedSessionData = Arc<Mutex<SessionData>>;

pub struct Worker {
    session_data: SharedSessionData,
    epoch: Arc<AtomicU64>,
    rt: Runtime,
    thread: Option<(CancellationToken, JoinHandle<()>)>,
}

impl Worker {
    pub fn new() -> Self {
        Self {
            session_data: SharedSessionData::default(),
            epoch: Arc::new(AtomicU64::new(0)),
            rt: Runtime::new().unwrap(),
            thread: None,
        }
    }

    pub fn start(&mut self, stream: StreamInfo, token: String) {
        let cancel = CancellationToken::new();
        let session = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let join = self.rt.spawn(Self::run(
            stream,
            token,
            self.session_data.clone(),
            self.epoch.clone(),
            session,
            cancel.clone(),
        ));

        self.thread = Some((cancel, join));
    }

    pub fn stop(&mut self) {
        if let Some(mut thread) = self.thread.take() {
            thread.0.cancel();
            self.rt.block_on(&mut thread.1).unwrap();
        }

        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.session_data.lock().unwrap() = SessionData::default();
    }

    async fn run(
        stream: StreamInfo,
        token: String,
        session_data: SharedSessionData,
        epoch: Arc<AtomicU64>,
        session: u64,
        cancel: CancellationToken,
    ) {
        let http = reqwest::Client::new();

        // The two requests are independent: each result is stored as soon
        // as it lands, and one failing leaves the other untouched.
        let fetch_segments = async {
            let segments = match jellyfin::fetch_segments(&http, &stream, &token).await {
                Ok(s) => {
                    log::info!("Found {} segment(s)", s.len());
                    Some(s)
                }
                Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                    log::info!("No segments found");
                    None
                }
                Err(e) => {
                    log::error!("Failed to get segments: {}", e);
                    None
                }
            };

            Self::apply(&session_data, &epoch, session, |data| data.segments = segments);
        };

        let fetch_ui_config = async {
            let ui_config = match jellyfin::fetch_ui_config(&http, &stream, &token).await {
                Ok(c) => Some(c),
                Err(e) => {
                    log::error!("Failed to get user interface configuration: {}", e);
                    None
                }
            };

            Self::apply(&session_data, &epoch, session, |data| data.ui_config = ui_config);
        };

        select! {
            _ = async { tokio::join!(fetch_segments, fetch_ui_config); } => {}
            _ = cancel.cancelled() => {}
        }
    }

    // A response is only applied while the session it was fetched for is
    // still the current one. Late responses from a superseded playback
    // session are discarded.
    fn apply(
        session_data: &SharedSessionData,
        epoch: &AtomicU64,
        session: u64,
        f: impl FnOnce(&mut SessionData),
    ) {
        let mut data = session_data.lock().unwrap();

        if epoch.load(Ordering::SeqCst) != session {
            log::debug!("Discarding response from a superseded playback session");
            return;
        }

        f(&mut data);
    }

    pub fn get_active_segment(&self, time_pos: f64) -> Option<(SegmentKind, Segment)> {
        self.session_data
            .lock()
            .unwrap()
            .segments
            .as_ref()
            .and_then(|segments| jellyfin::active_segment(segments, time_pos))
            .map(|(kind, segment)| (kind.clone(), segment.clone()))
    }

    pub fn get_caption(&self, kind: &SegmentKind) -> Option<String> {
        self.session_data
            .lock()
            .unwrap()
            .ui_config
            .as_ref()
            .and_then(|config| config.caption(kind))
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_set() -> SegmentSet {
        let mut segments = SegmentSet::new();
        segments.insert(
            SegmentKind::Introduction,
            Segment {
                valid: true,
                show_skip_prompt_at: 10.0,
                hide_skip_prompt_at: 30.0,
                intro_end: 75.0,
            },
        );
        segments
    }

    #[test]
    fn apply_keeps_current_session_response() {
        let session_data = SharedSessionData::default();
        let epoch = AtomicU64::new(1);

        Worker::apply(&session_data, &epoch, 1, |data| data.segments = Some(segment_set()));

        assert!(session_data.lock().unwrap().segments.is_some());
    }

    #[test]
    fn apply_discards_superseded_session_response() {
        let session_data = SharedSessionData::default();
        let epoch = AtomicU64::new(1);

        // The playback session moved on while the fetch was in flight.
        epoch.fetch_add(1, Ordering::SeqCst);

        Worker::apply(&session_data, &epoch, 1, |data| data.segments = Some(segment_set()));

        assert!(session_data.lock().unwrap().segments.is_none());
    }

    #[test]
    fn accessors_on_absent_data() {
        let worker = Worker::new();

        assert!(worker.get_active_segment(15.0).is_none());
        assert!(worker.get_caption(&SegmentKind::Introduction).is_none());
    }
}
