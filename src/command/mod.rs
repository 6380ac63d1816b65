//! # Command Framework
//!
//! A small command layer in the style of server plugin frameworks:
//!
//! - [`CommandInfo`] - static metadata (aliases, usage, flag spec, arity)
//! - [`tokenize`] - split a typed line, honouring `"double quotes"`
//! - [`CommandContext`] - positional arguments and flags parsed per [`CommandInfo`]
//! - [`Dispatcher`] - alias lookup, permission check, help on bad arity
//! - [`sender`] - [`CommandSender`](sender::CommandSender) implementations
//! - [`perms`] - permission levels and nodes
//! - [`import`] - the `import` command
//!
//! ## Flags
//!
//! The flag spec lists single-letter flags; a letter followed by `:` takes a
//! value (`"g:n"` declares value flag `-g` and switch `-n`). A token is read as
//! a flag group only when every letter in it is declared, so `-l` stays a
//! positional argument for commands that do not declare `l`. Tokens starting
//! with `--` are always positional, and a bare `--` ends flag parsing.
//!
//! ```text
//! /mv import "hell world" nether -n
//! /mv im space normal -g CleanroomGenerator:.
//! /mvimport --list
//! ```

pub mod import;
pub mod perms;
pub mod sender;

use log::{debug, warn};
use std::collections::HashMap;
use thiserror::Error;

use crate::logutil::escape_log;
use crate::messages::{language, Message, Messenger};
use crate::world::WorldManager;
use perms::{level_name, Perm, PermissionPolicy};
use sender::CommandSender;

/// Prefix shared by the `/mv <alias>` and `/mv<alias>` forms.
pub const COMMAND_PREFIX: &str = "mv";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unterminated quote in command line")]
    UnterminatedQuote,

    #[error("flag -{0} requires a value")]
    MissingFlagValue(char),

    #[error("expected {min} to {max} arguments, got {found}")]
    Arity { min: usize, max: usize, found: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub primary_alias: &'static str,
    /// Extra aliases usable as `/mv <alias>`.
    pub prefixed_aliases: &'static [&'static str],
    /// Aliases usable as `/mv<alias>`.
    pub directly_prefixed_aliases: &'static [&'static str],
    pub desc: &'static str,
    pub usage: &'static str,
    pub flags: &'static str,
    pub min: usize,
    pub max: usize,
}

impl CommandInfo {
    /// Whether `label` names this command. `label` is the word after `/mv `,
    /// or the whole word when the caller typed a bare alias.
    pub fn matches(&self, label: &str) -> bool {
        label.eq_ignore_ascii_case(self.primary_alias)
            || self.prefixed_aliases.iter().any(|a| label.eq_ignore_ascii_case(a))
    }

    /// Whether `word` is one of the `/mv<alias>` forms.
    pub fn matches_direct(&self, word: &str) -> bool {
        let lower = word.to_ascii_lowercase();
        match lower.strip_prefix(COMMAND_PREFIX) {
            Some(rest) => self.directly_prefixed_aliases.iter().any(|a| rest.eq_ignore_ascii_case(a)),
            None => false,
        }
    }

    fn flag_kinds(&self) -> HashMap<char, bool> {
        let mut kinds = HashMap::new();
        let mut chars = self.flags.chars().peekable();
        while let Some(c) = chars.next() {
            let takes_value = chars.peek() == Some(&':');
            if takes_value {
                chars.next();
            }
            kinds.insert(c, takes_value);
        }
        kinds
    }
}

/// Split a command line on whitespace. Double quotes group words and may
/// produce an empty argument (`""`).
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Positional arguments and flags of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandContext {
    args: Vec<String>,
    flags: HashMap<char, Option<String>>,
}

impl CommandContext {
    pub fn parse(info: &CommandInfo, tokens: &[String]) -> Result<Self, CommandError> {
        let kinds = info.flag_kinds();
        let mut ctx = CommandContext::default();
        let mut iter = tokens.iter();
        let mut flags_done = false;

        while let Some(token) = iter.next() {
            if !flags_done && token == "--" {
                flags_done = true;
                continue;
            }

            let group = token
                .strip_prefix('-')
                .filter(|rest| !flags_done && !rest.is_empty() && !rest.starts_with('-'))
                .filter(|rest| rest.chars().all(|c| kinds.contains_key(&c)));

            let Some(letters) = group else {
                ctx.args.push(token.clone());
                continue;
            };

            for letter in letters.chars() {
                if kinds[&letter] {
                    let value = iter.next().ok_or(CommandError::MissingFlagValue(letter))?;
                    ctx.flags.insert(letter, Some(value.clone()));
                } else {
                    ctx.flags.insert(letter, None);
                }
            }
        }

        let found = ctx.args.len();
        if found < info.min || found > info.max {
            return Err(CommandError::Arity {
                min: info.min,
                max: info.max,
                found,
            });
        }
        Ok(ctx)
    }

    pub fn args_len(&self) -> usize {
        self.args.len()
    }

    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains_key(&flag)
    }

    /// Value of a value flag; `None` for absent flags and switches.
    pub fn get_flag(&self, flag: char) -> Option<&str> {
        self.flags.get(&flag).and_then(|v| v.as_deref())
    }
}

/// Borrowed state a command runs against.
pub struct CommandEnv<'a> {
    pub worlds: &'a mut dyn WorldManager,
    pub messenger: &'a Messenger,
}

pub trait Command {
    fn info(&self) -> &CommandInfo;
    fn perm(&self) -> Perm;
    fn help(&self) -> &Message;
    /// Run the command. Returning `false` asks the dispatcher to show help.
    fn run(&self, env: &mut CommandEnv<'_>, sender: &mut dyn CommandSender, ctx: &CommandContext) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    Ran,
    ShowedHelp,
    Denied,
    BadArguments,
    Unknown,
}

pub struct Dispatcher {
    commands: Vec<Box<dyn Command>>,
    messenger: Messenger,
    policy: PermissionPolicy,
}

impl Dispatcher {
    pub fn new(messenger: Messenger, policy: PermissionPolicy) -> Self {
        Self {
            commands: Vec::new(),
            messenger,
            policy,
        }
    }

    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    fn find(&self, label: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.info().matches(label))
            .map(|c| c.as_ref())
    }

    fn find_direct(&self, word: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.info().matches_direct(word))
            .map(|c| c.as_ref())
    }

    /// Dispatch a typed line such as `/mv import "hell world" nether`.
    pub fn dispatch_line(
        &self,
        worlds: &mut dyn WorldManager,
        sender: &mut dyn CommandSender,
        line: &str,
    ) -> DispatchResult {
        let tokens = match tokenize(line.trim().trim_start_matches('/')) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.messenger.message(sender, &language::BAD_ARGUMENTS, &[e.to_string().as_str()]);
                return DispatchResult::BadArguments;
            }
        };
        let Some((first, rest)) = tokens.split_first() else {
            self.messenger.message(sender, &language::UNKNOWN_COMMAND, &[""]);
            return DispatchResult::Unknown;
        };

        if first.eq_ignore_ascii_case(COMMAND_PREFIX) {
            match rest.split_first() {
                Some((label, args)) => self.dispatch(worlds, sender, label, args),
                None => {
                    self.messenger.message(sender, &language::UNKNOWN_COMMAND, &[first.as_str()]);
                    DispatchResult::Unknown
                }
            }
        } else if let Some(command) = self.find_direct(first) {
            self.execute(command, worlds, sender, rest)
        } else {
            self.dispatch(worlds, sender, first, rest)
        }
    }

    /// Dispatch an already split invocation: `label` is the alias, `args`
    /// everything after it.
    pub fn dispatch(
        &self,
        worlds: &mut dyn WorldManager,
        sender: &mut dyn CommandSender,
        label: &str,
        args: &[String],
    ) -> DispatchResult {
        match self.find(label) {
            Some(command) => self.execute(command, worlds, sender, args),
            None => {
                debug!("unknown command '{}' from {}", escape_log(label), sender.name());
                self.messenger.message(sender, &language::UNKNOWN_COMMAND, &[label]);
                DispatchResult::Unknown
            }
        }
    }

    fn execute(
        &self,
        command: &dyn Command,
        worlds: &mut dyn WorldManager,
        sender: &mut dyn CommandSender,
        args: &[String],
    ) -> DispatchResult {
        let info = command.info();
        let perm = command.perm();
        if !self.policy.allows(sender.permission_level(), &perm) {
            let required = level_name(self.policy.required_level(&perm));
            warn!(
                "{} (level {}) denied /{}: requires {}",
                sender.name(),
                sender.permission_level(),
                info.primary_alias,
                perm.node
            );
            self.messenger.message(sender, &language::NO_PERMISSION, &[info.primary_alias, required]);
            return DispatchResult::Denied;
        }

        let ctx = match CommandContext::parse(info, args) {
            Ok(ctx) => ctx,
            Err(CommandError::Arity { .. }) => {
                self.show_help(command, sender);
                return DispatchResult::ShowedHelp;
            }
            Err(e) => {
                self.messenger.message(sender, &language::BAD_ARGUMENTS, &[e.to_string().as_str()]);
                self.show_usage(command, sender);
                return DispatchResult::BadArguments;
            }
        };

        debug!(
            "{} issued /{} {}",
            sender.name(),
            info.primary_alias,
            escape_log(&args.join(" "))
        );
        let mut env = CommandEnv {
            worlds,
            messenger: &self.messenger,
        };
        if command.run(&mut env, sender, &ctx) {
            DispatchResult::Ran
        } else {
            self.show_help(command, sender);
            DispatchResult::ShowedHelp
        }
    }

    fn show_usage(&self, command: &dyn Command, sender: &mut dyn CommandSender) {
        let info = command.info();
        let label = format!("{} {}", COMMAND_PREFIX, info.primary_alias);
        self.messenger.message(sender, &language::USAGE, &[label.as_str(), info.usage]);
    }

    fn show_help(&self, command: &dyn Command, sender: &mut dyn CommandSender) {
        self.show_usage(command, sender);
        self.messenger.message(sender, command.help(), &[]);
    }
}
