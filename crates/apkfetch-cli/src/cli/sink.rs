//! Log sink used by CLI commands.

use apkfetch_core::logging::LogTarget;
use apkfetch_core::report::{LogSink, TracingSink};

/// Records through tracing. When tracing writes to the log file, the message
/// is also echoed to stderr so the user sees it.
pub struct CliSink {
    echo: bool,
}

impl CliSink {
    pub fn for_target(target: &LogTarget) -> Self {
        Self {
            echo: !target.is_stderr(),
        }
    }

    fn echo_line(message: &str) -> String {
        format!("apkfetch: {}", message)
    }
}

impl LogSink for CliSink {
    fn record(&self, message: &str) {
        TracingSink.record(message);
        if self.echo {
            eprintln!("{}", Self::echo_line(message));
        }
    }
}
