//! Amora session runtime.
//!
//! Orchestrates the pure `amora-core` components for one active
//! conversation: timer-driven delivery and reply progression, notification
//! lifetimes, and the event stream a presentation layer consumes. All
//! delayed effects are named, cancellable tokio tasks owned by the
//! [`Session`](session::Session); tearing a session down cancels them
//! deterministically.

pub mod session;

pub use session::{Session, SessionConfig, SessionEvent};
