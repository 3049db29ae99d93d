//! Backend collaborator protocol.
//!
//! This module defines the request and response messages exchanged between a
//! screen and the backend worker. Every request carries a ticket that the
//! response echoes back, so that a screen can match answers to the optimistic
//! updates they settle regardless of arrival order. Requests also carry the
//! current tracing context so that the worker's spans join the caller's trace.

use crate::domain::entity::Record;
use crate::domain::status::EntityKind;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-boundary span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when a request crosses into the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the boundary.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span has no valid OpenTelemetry context,
    /// for example when tracing was never initialised.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `BackendRequest` constructors that attach the current trace context.
macro_rules! backend_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl BackendRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

backend_request_builders! {
    fetch_collection(FetchCollection { ticket: u64, kind: EntityKind }),
    submit_transition(SubmitTransition { ticket: u64, kind: EntityKind, id: String, target: String }),
    delete_entity(DeleteEntity { ticket: u64, kind: EntityKind, id: String }),
}

/// Requests sent from a screen to the backend worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum BackendRequest {
    /// Load every entity of `kind`.
    FetchCollection {
        ticket: u64,
        kind: EntityKind,

        /// Trace context for linking spans across the boundary.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist a status change that was already applied optimistically.
    SubmitTransition {
        ticket: u64,
        kind: EntityKind,
        id: String,
        /// Wire name of the new status.
        target: String,

        /// Trace context for linking spans across the boundary.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist a delete that was already applied optimistically.
    DeleteEntity {
        ticket: u64,
        kind: EntityKind,
        id: String,

        /// Trace context for linking spans across the boundary.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl BackendRequest {
    /// Ticket the response will echo.
    #[must_use]
    pub const fn ticket(&self) -> u64 {
        match self {
            Self::FetchCollection { ticket, .. }
            | Self::SubmitTransition { ticket, .. }
            | Self::DeleteEntity { ticket, .. } => *ticket,
        }
    }

    /// Trace context captured when the request was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchCollection { trace_context, .. }
            | Self::SubmitTransition { trace_context, .. }
            | Self::DeleteEntity { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the backend worker back to a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "response", rename_all = "snake_case")]
pub enum BackendResponse {
    /// The requested collection.
    CollectionFetched {
        ticket: u64,
        kind: EntityKind,
        records: Vec<Record>,
    },

    /// A submitted change was accepted.
    Confirmed { ticket: u64 },

    /// A submitted change was refused by the backend.
    Rejected { ticket: u64, message: String },

    /// The worker failed to process the request.
    Error { ticket: u64, message: String },
}

impl BackendResponse {
    /// Ticket of the request this answers.
    #[must_use]
    pub const fn ticket(&self) -> u64 {
        match self {
            Self::CollectionFetched { ticket, .. }
            | Self::Confirmed { ticket }
            | Self::Rejected { ticket, .. }
            | Self::Error { ticket, .. } => *ticket,
        }
    }
}
