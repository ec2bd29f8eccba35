//! Colorful console output for hygiene evaluations.
//!
//! Provides a custom `tracing` layer that renders the engine's structured
//! lifecycle events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (evaluation start/end, grouping)
//! - **DEBUG**: Per-rule timings and data-quality diagnostics

mod format;

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use owo_colors::OwoColorize;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use format::{format_event, EventVisitor};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static EVALUATE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "pipeline_hygiene=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints a banner line and installs the colored layer behind an
/// `EnvFilter` read from `RUST_LOG` (falling back to [`DEFAULT_FILTER`]).
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(HygieneConsoleLayer)
            .try_init();
    });
}

// Marks the start of an evaluation for elapsed time tracking.
pub(crate) fn mark_evaluate_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    EVALUATE_START_NANOS.store(nanos, Ordering::Relaxed);
}

pub(crate) fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = EVALUATE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let title = format!("Pipeline Hygiene v{}", VERSION);
    let rule = "─".repeat(title.chars().count() + 4);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", rule.bright_cyan());
    let _ = writeln!(stdout, "  {}", title.bright_white().bold());
    let _ = writeln!(stdout, "{}", rule.bright_cyan());
    let _ = stdout.flush();
}

/// A tracing layer that formats hygiene events with colors.
pub struct HygieneConsoleLayer;

impl<S: Subscriber> Layer<S> for HygieneConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Accept events from the engine crates only
        if !metadata.target().starts_with("pipeline_hygiene") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}
