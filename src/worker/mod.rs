//! Backend worker and its message protocol.
//!
//! Screens never touch the backend directly. They emit [`BackendRequest`]s and
//! later receive [`BackendResponse`]s, possibly out of order. Tickets tie each
//! response to the optimistic update it settles.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker owning the backend

pub mod handler;
pub mod messages;

pub use handler::PortalWorker;
pub use messages::{BackendRequest, BackendResponse, TraceContext};
