//! Recording session state machine

use std::fmt;
use std::time::SystemTime;

use thiserror::Error;

/// Phase of a recording session, without the data attached to each state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Requesting,
    Recording,
    StoppedPending,
}

impl SessionPhase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Recording => "recording",
            Self::StoppedPending => "stopped-pending",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session state together with the data each state owns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Requesting,
    Recording { started_at: SystemTime },
    StoppedPending { transient_uri: String },
}

impl SessionState {
    /// Phase of this state
    pub fn phase(&self) -> SessionPhase {
        match self {
            Self::Idle => SessionPhase::Idle,
            Self::Requesting => SessionPhase::Requesting,
            Self::Recording { .. } => SessionPhase::Recording,
            Self::StoppedPending { .. } => SessionPhase::StoppedPending,
        }
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: SessionPhase,
    pub action: String,
}

/// Recording session entity.
/// Guards every transition of a single recording's lifecycle.
///
/// State machine:
///   IDLE -> REQUESTING (begin_request)
///   REQUESTING -> RECORDING (recorder_ready)
///   REQUESTING -> IDLE (abort_request)
///   RECORDING -> STOPPED_PENDING (finish_recording)
///   RECORDING -> IDLE (fail_recording)
///   STOPPED_PENDING -> IDLE (take_pending)
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: SessionState,
}

impl RecordingSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Get the current phase
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == SessionPhase::Idle
    }

    pub fn is_recording(&self) -> bool {
        self.phase() == SessionPhase::Recording
    }

    pub fn is_pending(&self) -> bool {
        self.phase() == SessionPhase::StoppedPending
    }

    /// When the current recording started, if recording
    pub fn started_at(&self) -> Option<SystemTime> {
        match self.state {
            SessionState::Recording { started_at } => Some(started_at),
            _ => None,
        }
    }

    /// The transient clip awaiting save or discard, if any
    pub fn pending_uri(&self) -> Option<&str> {
        match &self.state {
            SessionState::StoppedPending { transient_uri } => Some(transient_uri),
            _ => None,
        }
    }

    fn reject(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.phase(),
            action: action.to_string(),
        }
    }

    /// Fail unless the session is in `expected`
    pub fn require(&self, expected: SessionPhase, action: &str) -> Result<(), InvalidStateTransition> {
        if self.phase() != expected {
            return Err(self.reject(action));
        }
        Ok(())
    }

    /// The pending transient clip, or an error naming `action`
    pub fn pending(&self, action: &str) -> Result<&str, InvalidStateTransition> {
        self.pending_uri().ok_or_else(|| self.reject(action))
    }

    /// Transition from IDLE to REQUESTING
    pub fn begin_request(&mut self) -> Result<(), InvalidStateTransition> {
        if !self.is_idle() {
            return Err(self.reject("start recording"));
        }
        self.state = SessionState::Requesting;
        Ok(())
    }

    /// Transition from REQUESTING to RECORDING once the recorder is live
    pub fn recorder_ready(&mut self, started_at: SystemTime) -> Result<(), InvalidStateTransition> {
        if self.phase() != SessionPhase::Requesting {
            return Err(self.reject("begin recording"));
        }
        self.state = SessionState::Recording { started_at };
        Ok(())
    }

    /// Transition from REQUESTING back to IDLE (recorder failed to start)
    pub fn abort_request(&mut self) -> Result<(), InvalidStateTransition> {
        if self.phase() != SessionPhase::Requesting {
            return Err(self.reject("abort start"));
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Transition from RECORDING to STOPPED_PENDING
    pub fn finish_recording(
        &mut self,
        transient_uri: impl Into<String>,
    ) -> Result<(), InvalidStateTransition> {
        if !self.is_recording() {
            return Err(self.reject("stop recording"));
        }
        self.state = SessionState::StoppedPending {
            transient_uri: transient_uri.into(),
        };
        Ok(())
    }

    /// Transition from RECORDING to IDLE (recorder failed while stopping)
    pub fn fail_recording(&mut self) -> Result<(), InvalidStateTransition> {
        if !self.is_recording() {
            return Err(self.reject("abandon recording"));
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Transition from STOPPED_PENDING to IDLE, handing over the transient clip
    pub fn take_pending(&mut self, action: &str) -> Result<String, InvalidStateTransition> {
        match std::mem::take(&mut self.state) {
            SessionState::StoppedPending { transient_uri } => Ok(transient_uri),
            other => {
                self.state = other;
                Err(self.reject(action))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_session() -> RecordingSession {
        let mut session = RecordingSession::new();
        session.begin_request().unwrap();
        session.recorder_ready(SystemTime::now()).unwrap();
        session
    }

    #[test]
    fn new_session_is_idle() {
        let session = RecordingSession::new();
        assert!(session.is_idle());
        assert!(!session.is_recording());
        assert!(!session.is_pending());
        assert!(session.pending_uri().is_none());
    }

    #[test]
    fn begin_request_from_idle() {
        let mut session = RecordingSession::new();
        assert!(session.begin_request().is_ok());
        assert_eq!(session.phase(), SessionPhase::Requesting);
    }

    #[test]
    fn begin_request_while_requesting_fails() {
        let mut session = RecordingSession::new();
        session.begin_request().unwrap();

        let err = session.begin_request().unwrap_err();
        assert_eq!(err.current_state, SessionPhase::Requesting);
        assert!(err.action.contains("start recording"));
    }

    #[test]
    fn begin_request_while_recording_fails() {
        let mut session = recording_session();
        let err = session.begin_request().unwrap_err();
        assert_eq!(err.current_state, SessionPhase::Recording);
        assert!(session.is_recording());
    }

    #[test]
    fn recorder_ready_records_start_time() {
        let started = SystemTime::now();
        let mut session = RecordingSession::new();
        session.begin_request().unwrap();
        session.recorder_ready(started).unwrap();
        assert_eq!(session.started_at(), Some(started));
    }

    #[test]
    fn recorder_ready_from_idle_fails() {
        let mut session = RecordingSession::new();
        let err = session.recorder_ready(SystemTime::now()).unwrap_err();
        assert_eq!(err.current_state, SessionPhase::Idle);
    }

    #[test]
    fn abort_request_returns_to_idle() {
        let mut session = RecordingSession::new();
        session.begin_request().unwrap();
        session.abort_request().unwrap();
        assert!(session.is_idle());
    }

    #[test]
    fn finish_recording_keeps_transient_uri() {
        let mut session = recording_session();
        session.finish_recording("/tmp/clip.flac").unwrap();
        assert!(session.is_pending());
        assert_eq!(session.pending_uri(), Some("/tmp/clip.flac"));
        assert!(session.started_at().is_none());
    }

    #[test]
    fn finish_recording_from_idle_fails() {
        let mut session = RecordingSession::new();
        let err = session.finish_recording("x").unwrap_err();
        assert_eq!(err.current_state, SessionPhase::Idle);
    }

    #[test]
    fn finish_recording_from_pending_fails() {
        let mut session = recording_session();
        session.finish_recording("x").unwrap();
        let err = session.finish_recording("y").unwrap_err();
        assert_eq!(err.current_state, SessionPhase::StoppedPending);
        assert_eq!(session.pending_uri(), Some("x"));
    }

    #[test]
    fn fail_recording_returns_to_idle() {
        let mut session = recording_session();
        session.fail_recording().unwrap();
        assert!(session.is_idle());
    }

    #[test]
    fn take_pending_hands_over_clip() {
        let mut session = recording_session();
        session.finish_recording("clip").unwrap();
        assert_eq!(session.take_pending("save").unwrap(), "clip");
        assert!(session.is_idle());
    }

    #[test]
    fn take_pending_from_recording_keeps_state() {
        let started = SystemTime::now();
        let mut session = RecordingSession::new();
        session.begin_request().unwrap();
        session.recorder_ready(started).unwrap();

        let err = session.take_pending("discard").unwrap_err();
        assert_eq!(err.current_state, SessionPhase::Recording);
        assert_eq!(session.started_at(), Some(started));
    }

    #[test]
    fn require_matches_phase() {
        let session = recording_session();
        assert!(session.require(SessionPhase::Recording, "stop").is_ok());
        let err = session.require(SessionPhase::Idle, "save").unwrap_err();
        assert_eq!(err.current_state, SessionPhase::Recording);
        assert_eq!(err.action, "save");
    }

    #[test]
    fn pending_requires_stopped_clip() {
        let mut session = recording_session();
        assert!(session.pending("save").is_err());
        session.finish_recording("clip").unwrap();
        assert_eq!(session.pending("save").unwrap(), "clip");
    }

    #[test]
    fn full_cycle() {
        let mut session = recording_session();
        session.finish_recording("a").unwrap();
        session.take_pending("save").unwrap();
        assert!(session.is_idle());

        // Can start another cycle
        session.begin_request().unwrap();
        assert_eq!(session.phase(), SessionPhase::Requesting);
    }

    #[test]
    fn phase_display() {
        assert_eq!(SessionPhase::Idle.to_string(), "idle");
        assert_eq!(SessionPhase::Requesting.to_string(), "requesting");
        assert_eq!(SessionPhase::Recording.to_string(), "recording");
        assert_eq!(SessionPhase::StoppedPending.to_string(), "stopped-pending");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: SessionPhase::Recording,
            action: "start recording".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("start recording"));
        assert!(msg.contains("recording"));
    }
}
