//! Microphone permission gate
//!
//! Asks the permission provider once and remembers the answer for the rest of
//! the process. A denial is never re-prompted.

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::error::MemoError;
use super::ports::{MicrophonePermission, PermissionStatus};

/// Cached microphone authorization
pub struct PermissionGate<P>
where
    P: MicrophonePermission,
{
    provider: P,
    status: OnceCell<PermissionStatus>,
}

impl<P> PermissionGate<P>
where
    P: MicrophonePermission,
{
    /// Create a gate that has not asked yet
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            status: OnceCell::new(),
        }
    }

    /// Ask for microphone access, or return the cached answer.
    ///
    /// A provider failure counts as a denial.
    pub async fn request_microphone_access(&self) -> PermissionStatus {
        *self
            .status
            .get_or_init(|| async {
                let status = match self.provider.request().await {
                    Ok(status) => status,
                    Err(e) => {
                        warn!(error = %e, "microphone permission request failed");
                        PermissionStatus::Denied
                    }
                };
                debug!(%status, "microphone permission resolved");
                status
            })
            .await
    }

    /// Cached answer, if the provider was already asked
    pub fn status(&self) -> Option<PermissionStatus> {
        self.status.get().copied()
    }

    /// Fail with `PermissionDenied` unless access is granted
    pub async fn ensure_granted(&self) -> Result<(), MemoError> {
        if self.request_microphone_access().await.is_granted() {
            Ok(())
        } else {
            Err(MemoError::PermissionDenied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::PermissionError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingPermission {
        answer: Result<PermissionStatus, PermissionError>,
        calls: AtomicUsize,
    }

    impl CountingPermission {
        fn new(answer: Result<PermissionStatus, PermissionError>) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MicrophonePermission for CountingPermission {
        async fn request(&self) -> Result<PermissionStatus, PermissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    #[tokio::test]
    async fn status_is_unknown_before_asking() {
        let gate = PermissionGate::new(CountingPermission::new(Ok(PermissionStatus::Granted)));
        assert_eq!(gate.status(), None);
    }

    #[tokio::test]
    async fn granted_is_cached() {
        let gate = PermissionGate::new(CountingPermission::new(Ok(PermissionStatus::Granted)));

        assert_eq!(gate.request_microphone_access().await, PermissionStatus::Granted);
        assert_eq!(gate.request_microphone_access().await, PermissionStatus::Granted);
        assert!(gate.ensure_granted().await.is_ok());

        assert_eq!(gate.provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(gate.status(), Some(PermissionStatus::Granted));
    }

    #[tokio::test]
    async fn denied_is_never_reprompted() {
        let gate = PermissionGate::new(CountingPermission::new(Ok(PermissionStatus::Denied)));

        assert_eq!(gate.request_microphone_access().await, PermissionStatus::Denied);
        assert!(matches!(
            gate.ensure_granted().await,
            Err(MemoError::PermissionDenied)
        ));
        assert_eq!(gate.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn provider_failure_counts_as_denied() {
        let gate = PermissionGate::new(CountingPermission::new(Err(
            PermissionError::RequestFailed("no portal".into()),
        )));

        assert_eq!(gate.request_microphone_access().await, PermissionStatus::Denied);
    }
}
