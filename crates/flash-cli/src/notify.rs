//! Alert delivery.

use flash_engine::Alert;

/// Receives alerts raised after an analysis run.
pub(crate) trait Notifier {
    fn notify(&self, alert: &Alert, recipient: Option<&str>);
}

/// Logs the alert and echoes it to stderr.
#[derive(Debug, Default)]
pub(crate) struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, alert: &Alert, recipient: Option<&str>) {
        tracing::warn!(
            negative_pct = alert.negative_pct,
            urgency = alert.urgency,
            impact = alert.impact,
            recipient = recipient.unwrap_or("-"),
            "{}",
            alert.message
        );
        eprintln!("ALERT: {}", alert.message);
    }
}
