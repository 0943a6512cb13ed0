//! Terminal notifier
//!
//! Prints session outcome notifications through the active output formatter.

use codedepot_core::ports::{INotificationService, Notification};

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

pub struct TerminalNotifier {
    formatter: Box<dyn OutputFormatter>,
}

impl TerminalNotifier {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            formatter: get_formatter(format == OutputFormat::Json),
        }
    }
}

#[async_trait::async_trait]
impl INotificationService for TerminalNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        self.formatter.notification(notification);
        Ok(())
    }
}
