//! OpenTelemetry tracer provider exporting spans as JSON lines.
//!
//! Each finished span becomes one flat JSON object on its own line, which
//! keeps the trace file greppable and easy to load into `jq`.

use super::file_writer::FileWriter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// One exported span.
#[derive(Debug, Serialize)]
struct SpanRecord<'a> {
    service: &'a str,
    trace_id: String,
    span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_span_id: Option<String>,
    name: &'a str,
    start_unix_nano: u64,
    duration_us: u64,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_message: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, JsonValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<EventRecord<'a>>,
}

/// A log event recorded inside a span.
#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    name: &'a str,
    time_unix_nano: u64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, JsonValue>,
}

fn unix_nanos(time: SystemTime) -> u64 {
    let nanos = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO).as_nanos();
    u64::try_from(nanos).unwrap_or(u64::MAX)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => JsonValue::from(*f),
        Value::String(_) | Value::Array(_) => JsonValue::String(value.as_str().into_owned()),
    }
}

fn attribute_map(attributes: &[KeyValue]) -> BTreeMap<String, JsonValue> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect()
}

impl<'a> SpanRecord<'a> {
    fn from_span(service: &'a str, span: &'a SpanData) -> Self {
        let (status, status_message) = match &span.status {
            Status::Unset => ("unset", None),
            Status::Ok => ("ok", None),
            Status::Error { description } => ("error", Some(description.to_string())),
        };
        let duration = span.end_time.duration_since(span.start_time).unwrap_or(Duration::ZERO);

        Self {
            service,
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id: (span.parent_span_id != SpanId::INVALID)
                .then(|| format!("{:016x}", span.parent_span_id)),
            name: &span.name,
            start_unix_nano: unix_nanos(span.start_time),
            duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            status,
            status_message,
            attributes: attribute_map(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    name: &event.name,
                    time_unix_nano: unix_nanos(event.timestamp),
                    attributes: attribute_map(&event.attributes),
                })
                .collect(),
        }
    }
}

/// Span exporter appending JSON lines to a rotating file.
struct JsonLinesExporter {
    writer: FileWriter,
    service: String,
    is_shutdown: AtomicBool,
}

impl JsonLinesExporter {
    fn new(file_path: PathBuf, resource: &Resource) -> Self {
        let service = resource
            .get(opentelemetry::Key::from_static_str("service.name"))
            .map_or_else(|| "unknown".to_string(), |value| value.as_str().into_owned());
        Self {
            writer: FileWriter::new(file_path),
            service,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> Result<(), TraceError> {
        for span in batch {
            let record = SpanRecord::from_span(&self.service, span);
            let line = serde_json::to_string(&record).map_err(|e| TraceError::from(e.to_string()))?;
            self.writer
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))?;
        }
        Ok(())
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }
        Box::pin(std::future::ready(self.write_batch(&batch)))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, res: &Resource) {
        if let Some(value) = res.get(opentelemetry::Key::from_static_str("service.name")) {
            self.service = value.as_str().into_owned();
        }
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("writer", &self.writer)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Creates a tracer provider that appends every finished span to `file_path`.
///
/// Uses the simple (unbatched) span processor, so a span is on disk as soon as
/// it closes.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonLinesExporter::new(file_path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_map_to_json() {
        assert_eq!(attribute_value(&Value::Bool(true)), JsonValue::Bool(true));
        assert_eq!(attribute_value(&Value::I64(7)), serde_json::json!(7));
        assert_eq!(attribute_value(&Value::from("job")), serde_json::json!("job"));
    }

    #[test]
    fn exporter_reads_service_name_from_resource() {
        let dir = tempfile::TempDir::new().unwrap();
        let resource = Resource::new(vec![KeyValue::new("service.name", "hireflow-test")]);
        let exporter = JsonLinesExporter::new(dir.path().join("t.jsonl"), &resource);
        assert_eq!(exporter.service, "hireflow-test");
    }

    #[test]
    fn pre_epoch_times_clamp_to_zero() {
        assert_eq!(unix_nanos(UNIX_EPOCH - Duration::from_secs(5)), 0);
        assert_eq!(unix_nanos(UNIX_EPOCH + Duration::from_nanos(42)), 42);
    }
}
