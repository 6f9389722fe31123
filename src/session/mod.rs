//! Session authorization and conversation driving.
//!
//! # Module structure
//! - `gate` - Credential gate at the stream boundary (`SessionGate`)
//! - `driver` - One-conversation driver (`ChatSession`, `CancelHandle`)

mod driver;
mod gate;

pub use driver::{CancelHandle, ChatSession, SubmitOutcome};
pub use gate::{GateSignal, SessionGate};
