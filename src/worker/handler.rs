//! Backend worker.
//!
//! The worker owns the [`Backend`] and turns each [`BackendRequest`] into a
//! [`BackendResponse`] carrying the same ticket. Backend failures never escape
//! as errors: a failed write becomes `Rejected`, which the screen answers with
//! a rollback, and a failed read becomes `Error`.

use crate::domain::error::Result;
use crate::storage::Backend;
use crate::worker::{BackendRequest, BackendResponse};

/// Worker processing backend requests for one screen.
pub struct PortalWorker {
    backend: Box<dyn Backend>,
}

impl std::fmt::Debug for PortalWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalWorker").finish_non_exhaustive()
    }
}

impl PortalWorker {
    /// Creates a worker over `backend`.
    #[must_use]
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Logs the outcome of a backend call and maps it to a response.
    fn handle_backend_result<T, F, G>(
        operation: &str,
        result: Result<T>,
        on_success: F,
        on_failure: G,
    ) -> BackendResponse
    where
        F: FnOnce(T) -> BackendResponse,
        G: FnOnce(String) -> BackendResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "backend operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "backend operation failed");
                on_failure(e.to_string())
            }
        }
    }

    /// Attaches the caller's trace context so the worker's spans join its trace.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(request: &BackendRequest) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = request.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes a request and returns the response carrying its ticket.
    pub fn handle_message(&mut self, request: BackendRequest) -> BackendResponse {
        let _context_guard = Self::attach_parent_trace_context(&request);
        let _span = tracing::debug_span!("worker_handle_message", ticket = request.ticket()).entered();

        match request {
            BackendRequest::FetchCollection { ticket, kind, .. } => Self::handle_backend_result(
                "fetch collection",
                self.backend.fetch_collection(kind),
                |records| {
                    tracing::debug!(%kind, count = records.len(), "collection loaded");
                    BackendResponse::CollectionFetched {
                        ticket,
                        kind,
                        records,
                    }
                },
                |message| BackendResponse::Error { ticket, message },
            ),

            BackendRequest::SubmitTransition {
                ticket,
                kind,
                id,
                target,
                ..
            } => Self::handle_backend_result(
                "submit transition",
                self.backend.submit_transition(kind, &id, &target),
                |()| BackendResponse::Confirmed { ticket },
                |message| BackendResponse::Rejected { ticket, message },
            ),

            BackendRequest::DeleteEntity { ticket, kind, id, .. } => Self::handle_backend_result(
                "delete entity",
                self.backend.delete(kind, &id),
                |()| BackendResponse::Confirmed { ticket },
                |message| BackendResponse::Rejected { ticket, message },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::EntityKind;
    use crate::storage::{InMemoryBackend, SeedData};

    fn worker(reject: Option<&str>) -> PortalWorker {
        let mut backend = InMemoryBackend::new(SeedData::builtin());
        if let Some(id) = reject {
            backend.reject_id(id);
        }
        PortalWorker::new(Box::new(backend))
    }

    #[test]
    fn fetch_echoes_ticket_and_kind() {
        let mut w = worker(None);
        let response = w.handle_message(BackendRequest::fetch_collection(5, EntityKind::Interview));
        match response {
            BackendResponse::CollectionFetched { ticket, kind, records } => {
                assert_eq!(ticket, 5);
                assert_eq!(kind, EntityKind::Interview);
                assert_eq!(records.len(), SeedData::builtin().interviews.len());
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn illegal_or_refused_writes_are_rejected() {
        let mut w = worker(Some("u-1"));
        let refused = w.handle_message(BackendRequest::submit_transition(
            1,
            EntityKind::User,
            "u-1".into(),
            "suspended".into(),
        ));
        assert!(matches!(refused, BackendResponse::Rejected { ticket: 1, .. }));

        let illegal = w.handle_message(BackendRequest::submit_transition(
            2,
            EntityKind::Application,
            "a-5".into(),
            "pending".into(),
        ));
        match illegal {
            BackendResponse::Rejected { ticket, message } => {
                assert_eq!(ticket, 2);
                assert!(message.starts_with("illegal-transition"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn delete_is_confirmed() {
        let mut w = worker(None);
        let response = w.handle_message(BackendRequest::delete_entity(3, EntityKind::Notification, "n-3".into()));
        assert_eq!(response, BackendResponse::Confirmed { ticket: 3 });
    }
}
