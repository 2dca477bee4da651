//! Development gateway that returns the source unchanged.

use std::time::Duration;

use cliptrim_common::error::CliptrimResult;

use crate::gateway::{ClipGateway, ClipHandle, TrimRequest};

/// Accepts any valid range and hands back the source uri, optionally after
/// an artificial delay that stands in for real processing time.
#[derive(Debug, Clone, Default)]
pub struct PassthroughGateway {
    delay: Duration,
}

impl PassthroughGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl ClipGateway for PassthroughGateway {
    async fn produce_clip(&self, request: &TrimRequest) -> CliptrimResult<ClipHandle> {
        let selection = request.validate()?;
        tracing::info!(
            source = %request.source_uri,
            start_secs = selection.start_secs(),
            end_secs = selection.end_secs(),
            "Cropping clip (passthrough)"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(ClipHandle {
            uri: request.source_uri.clone(),
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_source_for_any_valid_range() {
        let gateway = PassthroughGateway::new();
        let handle = gateway
            .produce_clip(&TrimRequest::new("file:///v/a.mp4", 3.0, 9.0))
            .await
            .unwrap();
        assert_eq!(handle.uri, "file:///v/a.mp4");
    }

    #[tokio::test]
    async fn test_rejects_inverted_range() {
        let gateway = PassthroughGateway::new();
        let err = gateway
            .produce_clip(&TrimRequest::new("a.mp4", 10.0, 3.0))
            .await
            .unwrap_err();
        assert!(err.is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_awaited() {
        let gateway = PassthroughGateway::with_delay(Duration::from_secs(2));
        let started = tokio::time::Instant::now();
        gateway
            .produce_clip(&TrimRequest::new("a.mp4", 0.0, 1.0))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
