//! Recording domain module

mod elapsed;
mod session;

pub use elapsed::{Elapsed, TICK_INTERVAL_SECS};
pub use session::{InvalidStateTransition, RecordingSession, SessionPhase, SessionState};
