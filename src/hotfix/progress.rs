//! Progress reporting hooks for the effectful phases

use async_trait::async_trait;

/// Receives human-readable status updates during gather and replay
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A status line
    async fn on_message(&self, message: &str);

    /// A non-fatal problem worth surfacing
    async fn on_warning(&self, message: &str) {
        self.on_message(message).await;
    }
}

/// Progress sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}
