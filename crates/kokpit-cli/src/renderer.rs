//! Terminal rendering module for rich markdown output
//!
//! Uses termimad for styled markdown, with a plain-text fallback that prints
//! the markdown verbatim.

use anyhow::Result;
use kokpit_core::{Notice, NoticeLevel};
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            // Headers keep their hash marks
            for line in markdown.lines() {
                if line.starts_with('#') {
                    println!("\x1b[34m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Print a notice; failures go to stderr.
    pub fn render_notice(&self, notice: &Notice) {
        let text = notice.to_string();
        match (notice.level, self.rich_enabled) {
            (NoticeLevel::Success, true) => println!("\x1b[32m{}\x1b[0m", text.trim_end()),
            (NoticeLevel::Success, false) => print!("{text}"),
            (NoticeLevel::Failure, true) => eprintln!("\x1b[31m{}\x1b[0m", text.trim_end()),
            (NoticeLevel::Failure, false) => eprint!("{text}"),
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
