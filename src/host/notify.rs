//! Toast output for terminal hosts.

use log::{debug, warn};
use std::io::{self, Write};
use std::time::Duration;

use super::Notifier;

/// Writes one toast line to any Write.
pub(crate) fn write_toast<W: Write>(text: &str, output: &mut W) -> io::Result<()> {
    writeln!(output, "[notice] {}", text)?;
    output.flush()
}

/// Prints toasts to stderr.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_toast(&self, text: &str, duration: Duration) {
        debug!("Toast for {}ms: {}", duration.as_millis(), text);
        if let Err(e) = write_toast(text, &mut io::stderr().lock()) {
            warn!("Failed to print toast: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_write_toast_prefixes_notice() -> Result<()> {
        let mut output = Vec::new();
        write_toast("requested resource does not exist", &mut output)?;
        assert_eq!(String::from_utf8(output)?, "[notice] requested resource does not exist\n");
        Ok(())
    }

    #[test]
    fn test_write_toast_one_line_per_toast() -> Result<()> {
        let mut output = Vec::new();
        write_toast("first", &mut output)?;
        write_toast("second", &mut output)?;
        assert_eq!(String::from_utf8(output)?.lines().collect::<Vec<_>>(), ["[notice] first", "[notice] second"]);
        Ok(())
    }

    #[test]
    fn test_console_notifier_shows_toast_through_trait() {
        let notifier: &dyn Notifier = &ConsoleNotifier;
        notifier.show_toast("login expired, please log in again", Duration::from_secs(1));
    }
}
