//! Tracing setup and solution log capture.
//!
//! Runner diagnostics go through `tracing` to stderr, filtered by `RUST_LOG`
//! (default `warn,solution=info`). Solutions log under the `solution` target;
//! external programs have their stderr re-emitted there.
//!
//! [`LogTracker`] watches the same event stream: between `track()` and
//! `restore()` it records whether anything was logged, so the runner can
//! separate solution output from the report that follows.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target used for log lines produced by solutions
pub const SOLUTION_TARGET: &str = "solution";

/// Initialize the global tracing subscriber with the tracker's layer attached.
pub fn init(tracker: &LogTracker) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,solution=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .compact(),
        )
        .with(tracker.layer())
        .init();
}

#[derive(Debug, Default)]
struct TrackerState {
    tracking: AtomicBool,
    logged: AtomicBool,
}

/// Records whether log output happened during a capture window
#[derive(Debug, Clone, Default)]
pub struct LogTracker {
    state: Arc<TrackerState>,
}

impl LogTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a capture window
    pub fn track(&self) {
        self.state.logged.store(false, Ordering::SeqCst);
        self.state.tracking.store(true, Ordering::SeqCst);
    }

    /// End the capture window; true if anything was logged inside it
    pub fn restore(&self) -> bool {
        self.state.tracking.store(false, Ordering::SeqCst);
        self.state.logged.swap(false, Ordering::SeqCst)
    }

    /// Layer feeding this tracker from a tracing subscriber
    pub fn layer(&self) -> TrackingLayer {
        TrackingLayer {
            state: Arc::clone(&self.state),
        }
    }
}

/// `tracing_subscriber` layer behind [`LogTracker`]
#[derive(Debug)]
pub struct TrackingLayer {
    state: Arc<TrackerState>,
}

impl<S: Subscriber> Layer<S> for TrackingLayer {
    fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
        if self.state.tracking.load(Ordering::SeqCst) {
            self.state.logged.store(true, Ordering::SeqCst);
        }
    }
}
