use crate::domain::ports::FaultIndicator;
use crate::utils::error::NodeError;

/// Reports unrecoverable setup failures through the log.
///
/// On flight hardware this role is a blinking status LED; on a host the
/// structured error record is the equivalent signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFaultIndicator;

impl FaultIndicator for LogFaultIndicator {
    fn signal(&self, error: &NodeError) {
        tracing::error!(
            severity = ?error.severity(),
            "❌ Node initialization failed: {}",
            error
        );
        tracing::error!("💡 Suggestion: {}", error.recovery_suggestion());
    }
}
