use colored::{Color, Colorize};

use crate::git::DiffStats;

/// Terminal status-line writer.
///
/// Owns the color switch so call sites do not thread a `colored` flag
/// through every function. One instance per session.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    colored: bool,
}

impl Console {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Glyph-prefixed status line, colored as one unit.
    fn status(&self, glyph: &str, msg: &str, color: Color) -> String {
        if self.colored {
            format!("{} {}", glyph.color(color).bold(), msg.color(color))
        } else {
            format!("{} {}", glyph, msg)
        }
    }

    /// Green ✓ line.
    pub fn success(&self, msg: &str) {
        println!("{}", self.status("✓", msg, Color::Green));
    }

    /// Red ✗ line, to stderr.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.status("✗", msg, Color::Red));
    }

    /// Yellow ⚠ line.
    pub fn warning(&self, msg: &str) {
        println!("{}", self.status("⚠", msg, Color::Yellow));
    }

    /// Blue ℹ line.
    pub fn info(&self, msg: &str) {
        println!("{}", self.status("ℹ", msg, Color::Blue));
    }

    /// Dim `[tag] message` progress line.
    pub fn step(&self, tag: &str, msg: &str) {
        if self.colored {
            println!(
                "{} {}",
                format!("[{}]", tag).bright_black().bold(),
                msg.bright_black()
            );
        } else {
            println!("[{}] {}", tag, msg);
        }
    }

    /// Emphasized free-form text (used for the draft message body).
    pub fn highlight(&self, text: &str) -> String {
        if self.colored {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    /// Summary line for detected changes.
    pub fn diff_stats(&self, stats: &DiffStats) -> String {
        let files = match stats.files_changed.len() {
            1 => "1 file".to_string(),
            n => format!("{} files", n),
        };
        let insertions = match stats.insertions {
            1 => "1 insertion(+)".to_string(),
            n => format!("{} insertions(+)", n),
        };
        let deletions = match stats.deletions {
            1 => "1 deletion(-)".to_string(),
            n => format!("{} deletions(-)", n),
        };

        if self.colored {
            format!(
                "{} changed, {}, {}",
                files.bold(),
                insertions.green(),
                deletions.red()
            )
        } else {
            format!("{} changed, {}, {}", files, insertions, deletions)
        }
    }
}
