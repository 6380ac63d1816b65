//! Who a command runs on behalf of, and where its replies go.

use crate::messages::theme;

pub trait CommandSender {
    fn name(&self) -> &str;
    fn permission_level(&self) -> u8;
    /// Deliver one line of `§`-coded text.
    fn send_message(&mut self, text: &str);
}

/// The server console: prints replies to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleSender {
    level: u8,
    color: bool,
}

impl ConsoleSender {
    pub fn new(level: u8, color: bool) -> Self {
        Self { level, color }
    }
}

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        "CONSOLE"
    }

    fn permission_level(&self) -> u8 {
        self.level
    }

    fn send_message(&mut self, text: &str) {
        println!("{}", theme::render(text, self.color));
    }
}

/// Collects replies as plain text. Useful for scripting and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySender {
    name: String,
    level: u8,
    lines: Vec<String>,
}

impl MemorySender {
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            level,
            lines: Vec::new(),
        }
    }

    /// Received lines with formatting codes stripped.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn transcript(&self) -> String {
        self.lines.join("\n")
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl CommandSender for MemorySender {
    fn name(&self) -> &str {
        &self.name
    }

    fn permission_level(&self) -> u8 {
        self.level
    }

    fn send_message(&mut self, text: &str) {
        self.lines.push(theme::strip(text));
    }
}
