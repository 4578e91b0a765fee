//! Caller-supplied cancellation for in-flight operations.

use std::future::Future;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, ErrorKind, Result};

/// Cancellation token and/or deadline attached to a client.
///
/// Network calls and retry sleeps race against it; whichever fires first
/// aborts the operation with [`ErrorKind::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    token: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// Never cancels.
    pub fn none() -> Self {
        Self::default()
    }

    /// Cancel when `token` is cancelled.
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Cancel once `deadline` has passed. An earlier deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Returns true if the signal has already fired.
    pub fn is_cancelled(&self) -> bool {
        self.token.as_ref().is_some_and(CancellationToken::is_cancelled)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail fast if the signal has already fired.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::new(ErrorKind::Cancelled));
        }
        Ok(())
    }

    /// Resolves when the signal fires; pending forever if there is none.
    pub async fn cancelled(&self) {
        let token = async {
            match &self.token {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };
        tokio::select! {
            _ = token => {}
            _ = deadline => {}
        }
    }

    /// Drive `future` unless cancellation fires first.
    pub async fn run<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = T>,
    {
        self.check()?;
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(Error::new(ErrorKind::Cancelled)),
            output = future => Ok(output),
        }
    }

    /// Sleep for `duration` unless cancellation fires first.
    pub async fn sleep(&self, duration: std::time::Duration) -> Result<()> {
        self.run(tokio::time::sleep(duration)).await
    }
}
