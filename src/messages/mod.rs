//! # Messages
//!
//! User-facing text is addressed by key. Each [`Message`] carries a default
//! English template; a [`MessageCatalog`] can override any template from a
//! TOML file so servers can localize output without rebuilding.
//!
//! Templates use `{token}` theme markers (see [`theme`]) and `%s` positional
//! placeholders:
//!
//! ```toml
//! [command.import]
//! import_complete = "{success}Welt importiert!"
//! starting_import = "{please_wait}Importiere '%s'..."
//! ```

pub mod language;
pub mod theme;

use anyhow::{anyhow, Result};
use log::info;
use std::collections::HashMap;

use crate::command::sender::CommandSender;

/// A keyed message with its default template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub key: &'static str,
    pub template: &'static str,
}

impl Message {
    pub const fn new(key: &'static str, template: &'static str) -> Self {
        Self { key, template }
    }
}

/// Template overrides keyed by message key.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    overrides: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from a TOML file. Nested tables are flattened with `.`
    /// so `[command.import] import_failed = "..."` overrides
    /// `command.import.import_failed`.
    pub async fn load(path: &str) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read messages file {}: {}", path, e))?;
        Self::from_toml_str(&content).map_err(|e| anyhow!("Failed to parse messages file {}: {}", path, e))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let mut catalog = Self::new();
        flatten_into(&mut catalog.overrides, "", &table)?;
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// The active template for `msg`: the override if present, else the default.
    pub fn template<'a>(&'a self, msg: &'a Message) -> &'a str {
        self.overrides
            .get(msg.key)
            .map(String::as_str)
            .unwrap_or(msg.template)
    }

    /// Apply theme tokens and fill `%s` placeholders in order. Surplus
    /// placeholders are left as-is; surplus arguments are ignored.
    pub fn format(&self, msg: &Message, args: &[&str]) -> String {
        let themed = theme::apply(self.template(msg));
        let mut out = String::with_capacity(themed.len());
        let mut args = args.iter();
        let mut rest = themed.as_str();
        while let Some(pos) = rest.find("%s") {
            out.push_str(&rest[..pos]);
            match args.next() {
                Some(arg) => out.push_str(arg),
                None => out.push_str("%s"),
            }
            rest = &rest[pos + 2..];
        }
        out.push_str(rest);
        out
    }
}

fn flatten_into(out: &mut HashMap<String, String>, prefix: &str, table: &toml::Table) -> Result<()> {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::String(s) => {
                out.insert(full, s.clone());
            }
            toml::Value::Table(t) => flatten_into(out, &full, t)?,
            other => return Err(anyhow!("message '{}' must be a string, found {}", full, other.type_str())),
        }
    }
    Ok(())
}

/// Format a world list with alternating odd/even styling, each name followed
/// by a space. Empty input gives an empty string.
pub fn format_world_list(names: &[String]) -> String {
    let mut out = String::new();
    for (i, name) in names.iter().enumerate() {
        let token = if (i + 1) % 2 == 0 { "{list_even}" } else { "{list_odd}" };
        out.push_str(&theme::apply(token));
        out.push_str(name);
        out.push(' ');
    }
    out
}

/// Sends catalog messages to command senders.
#[derive(Debug, Clone, Default)]
pub struct Messenger {
    catalog: MessageCatalog,
}

impl Messenger {
    pub fn new(catalog: MessageCatalog) -> Self {
        Self { catalog }
    }

    pub fn message(&self, sender: &mut dyn CommandSender, msg: &Message, args: &[&str]) {
        let text = self.catalog.format(msg, args);
        for line in text.split('\n') {
            sender.send_message(line);
        }
    }

    /// Send to the sender and record the plain text in the log.
    pub fn message_and_log(&self, sender: &mut dyn CommandSender, msg: &Message, args: &[&str]) {
        let text = self.catalog.format(msg, args);
        info!("[{}] {}", sender.name(), theme::strip(&text));
        for line in text.split('\n') {
            sender.send_message(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING: Message = Message::new("test.greeting", "{success}Hello %s, from %s");

    #[test]
    fn formats_default_template() {
        let catalog = MessageCatalog::new();
        assert_eq!(catalog.format(&GREETING, &["alex", "spawn"]), "§aHello alex, from spawn");
    }

    #[test]
    fn missing_arguments_leave_placeholder() {
        let catalog = MessageCatalog::new();
        assert_eq!(theme::strip(&catalog.format(&GREETING, &["alex"])), "Hello alex, from %s");
    }

    #[test]
    fn nested_toml_overrides_are_flattened() {
        let catalog = MessageCatalog::from_toml_str(
            r#"
            [test]
            greeting = "{failure}Hallo %s"
            "#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.format(&GREETING, &["alex"]), "§cHallo alex");
    }

    #[test]
    fn dotted_keys_work_too() {
        let catalog = MessageCatalog::from_toml_str(r#""test.greeting" = "Hi %s""#).unwrap();
        assert_eq!(catalog.format(&GREETING, &["sam"]), "Hi sam");
    }

    #[test]
    fn empty_file_has_no_overrides() {
        let catalog = MessageCatalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.format(&GREETING, &["alex", "spawn"]), "§aHello alex, from spawn");
    }

    #[test]
    fn non_string_values_are_rejected() {
        assert!(MessageCatalog::from_toml_str("[test]\ngreeting = 3").is_err());
    }

    #[test]
    fn world_list_alternates_styles() {
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(format_world_list(&names), "§fa §eb §fc ");
        assert_eq!(format_world_list(&[]), "");
    }
}
