//! OpenTelemetry-based tracing with file export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → JsonLinesExporter → rotating file
//! ```
//!
//! Finished spans land one JSON object per line in
//! `<data dir>/hireflow-traces.jsonl`; the file rotates at 10 MB keeping three
//! backups. The filter level comes from `trace_level` in [`crate::Config`].
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider and span exporter
//! - `file_writer`: Size-rotated line writer

mod file_writer;
mod init;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
