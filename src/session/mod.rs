//! Session Layer
//!
//! The only mutable state in the crate. Board sessions are created with
//! fixed params and seed, mutated only by successful validation calls and
//! deleted on terminal finish.

pub mod protocol;
pub mod service;
pub mod store;

pub use protocol::{
    CreateSessionResponse, FinishDiagnostics, FinishOutcome, ProgressOutcome, ReasonCode,
    Rejection,
};
pub use service::{BoardValidator, ValidateError, ValidatorConfig};
pub use store::{BoardSession, MemoryStore, SessionPatch, SessionStore, SharedSession};
