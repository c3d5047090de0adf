//! Logging setup built on `tracing-subscriber`.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the caller. The `snap-gauge` binary calls [`init`], tests call
//! [`init_test`], and an embedding application may install its own.
//!
//! # Filtering
//!
//! `RUST_LOG` always wins when set, using the usual `EnvFilter` directives:
//!
//! ```text
//! RUST_LOG=snap_gauge=debug snap-gauge --seed 7
//! RUST_LOG=snap_gauge::inspection=trace,snap_gauge::export=warn snap-gauge
//! ```
//!
//! Otherwise the level comes from the `-v` count: none → `info`, `-v` →
//! `debug`, `-vv` → `trace`. Output goes to stderr with the event target and
//! source line, so the result table on stdout stays clean.
//!
//! # Events
//!
//! | Level | Target | Message | Fields |
//! |-------|--------|---------|--------|
//! | `debug` | `snap_gauge::inspection::run` | `inspection run started` | `nominal`, `tolerance`, `batch_count`, `samples_per_batch` |
//! | `debug` | `snap_gauge::inspection::run` | `part inspected` | `batch`, `diameter`, `verdict` |
//! | `warn` | `snap_gauge::inspection::run` | `non-finite diameter recorded as No-Go` | `diameter` |
//! | `info` | `snap_gauge::inspection::run` | `batch sealed` | `batch`, `defective`, `inspected` |
//! | `info` | `snap_gauge::inspection::run` | `inspection run complete` | `avg_p`, `ucl`, `lcl`, `verdict` |
//! | `info` | `snap_gauge::simulation` | `sphere tray filled` | `spheres`, `lcl`, `ucl` |
//! | `info` | `snap_gauge::export` | `result table exported` | `path`, `rows` |
//! | `info` | `snap_gauge::export` | `result workbook exported` | `path`, `rows` |
//! | `info` | `snap_gauge::export` | `summary exported` | `path` |
//! | `info` | `snap_gauge` (binary) | `simulation started` | `seed` |
//!
//! At the default `info` level a five-batch run logs one line per batch and
//! one per export. Per-part events need `-v`.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `verbosity`: 0 → info, 1 → debug, 2 or more → trace. Ignored when
/// `RUST_LOG` is set.
///
/// # Panics
///
/// If a global subscriber is already installed. Call once, at startup.
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Subscriber for tests: debug level, captured by the test harness.
///
/// Safe to call from many tests; only the first call installs it. Run
/// `cargo test -- --nocapture` to see the events.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
