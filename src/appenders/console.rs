//! Stdout sink

use crate::core::{Appender, FormattedEntry, Result};
#[cfg(feature = "stdout")]
use colored::Colorize;
use std::io::Write;

pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "stdout"),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Render the line, highlighting the `%^ ... %$` range in the level color
    fn render(&self, record: &FormattedEntry<'_>) -> String {
        match (&record.color_range, self.use_colors) {
            #[cfg(feature = "stdout")]
            (Some(range), true) => {
                let line = record.line;
                match (line.get(..range.start), line.get(range.clone()), line.get(range.end..)) {
                    (Some(head), Some(marked), Some(tail)) => format!(
                        "{}{}{}",
                        head,
                        marked.color(record.entry.level.color_code()),
                        tail
                    ),
                    _ => line.to_string(),
                }
            }
            _ => record.line.to_string(),
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &FormattedEntry<'_>) -> Result<()> {
        let output = self.render(record);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", output)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}
