//! Worker tasks for remote calls.
//!
//! Remote calls run as tasks spawned by the runtime so the event loop never
//! waits on the network. Results come back as [`WorkerResponse`] events.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation executing messages against a `SkillApi`

pub mod handler;
pub mod messages;

pub use handler::SearchWorker;
pub use messages::{Catalog, TraceContext, WorkerMessage, WorkerResponse};
