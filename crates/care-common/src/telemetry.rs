//! Telemetry boundary
//!
//! Best-effort view metrics. Emission is a detached task: it never blocks
//! the caller, and sink failures are discarded by design (logged at debug,
//! never propagated).

use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Outbound port for the metrics collaborator.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Record that a view was displayed, tagged with a display name.
    async fn record_view(&self, view: &str, display_name: &str) -> Result<(), TelemetryError>;
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("telemetry sink error: {0}")]
pub struct TelemetryError(pub String);

/// Emit a view metric without waiting for it.
///
/// Must be called from within a tokio runtime. The returned handle is
/// informational; dropping it leaves the task running detached.
pub fn emit_view_metric(
    sink: Arc<dyn TelemetrySink>,
    view: impl Into<String>,
    display_name: impl Into<String>,
) -> JoinHandle<()> {
    let view = view.into();
    let display_name = display_name.into();
    tokio::spawn(async move {
        if let Err(e) = sink.record_view(&view, &display_name).await {
            tracing::debug!(view = %view, error = %e, "view metric dropped");
        }
    })
}

/// Sink that logs metrics locally; the default when no collaborator is wired.
#[derive(Default)]
pub struct LogTelemetrySink;

#[async_trait]
impl TelemetrySink for LogTelemetrySink {
    async fn record_view(&self, view: &str, display_name: &str) -> Result<(), TelemetryError> {
        tracing::info!(view = %view, display_name = %display_name, "view metric");
        Ok(())
    }
}
