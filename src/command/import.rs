//! `/mv import`: register an existing world folder as a managed world.

use log::warn;

use super::perms::{self, Perm};
use super::sender::CommandSender;
use super::{Command, CommandContext, CommandEnv, CommandInfo};
use crate::logutil::escape_log;
use crate::messages::{format_world_list, language, Message};
use crate::world::{ImportArgs, ImportOutcome, ImportValidator, WorldEnvironment};

pub const INFO: CommandInfo = CommandInfo {
    primary_alias: "import",
    prefixed_aliases: &["im"],
    directly_prefixed_aliases: &["import"],
    desc: "Imports an existing world.",
    usage: "{NAME} {ENVIRONMENT}",
    flags: "g:n",
    min: 1,
    max: 2,
};

pub const IMPORT_HELP: Message = Message::new(
    "command.import.help",
    "{help}Imports a world into the server from a folder with the given name.\n\
     {help}The folder must exist in the location where worlds are normally located and must contain Minecraft world data.\n\
     {help}You must specify a world environment such as {world_normal}NORMAL {help}or {world_nether}NETHER{help}.\n\
     {help}You may also specify a generator to use along with an optional generator ID.\n\
     {help}The generator name is case sensitive!\n\
     {help}Flags:\n\
     {cmd_flag}  -g {req_arg}{GENERATOR{opt_arg}[:ID]{req_arg}}{help} Specify a generator.\n\
     {cmd_flag}  -n {help}Do not adjust spawn\n\
     {help}Examples:\n  \
     {cmd_usage}/mv import {req_arg}gargamel {world_normal}normal\n  \
     {cmd_usage}/mv import {req_arg}\"hell world\" {world_nether}nether\n  \
     {cmd_usage}/mv import {req_arg}space {world_normal}normal {cmd_flag}-g {req_arg}CleanroomGenerator{opt_arg}:.",
);

pub const POTENTIAL_WORLD_LIST: Message = Message::new(
    "command.import.potential_world_list",
    "{info}====[ These look like worlds ]====\n%s",
);

pub const NO_POTENTIAL_WORLDS: Message = Message::new(
    "command.import.no_potential_worlds",
    "{sorry}No potential worlds found. Sorry!",
);

pub const STARTING_IMPORT: Message = Message::new(
    "command.import.starting_import",
    "{please_wait}Starting import of world '%s'...",
);

pub const IMPORT_COMPLETE: Message = Message::new("command.import.import_complete", "{success}Import complete!");

pub const IMPORT_FAILED: Message = Message::new("command.import.import_failed", "{failure}Import failed!");

pub const NON_EXISTENT_FOLDER: Message = Message::new(
    "command.import.non_existent_folder",
    "{failure}That world folder does not exist. {info}These look like worlds to me:\n%s",
);

/// The import command, bound to the server's world container.
pub struct ImportCommand {
    validator: ImportValidator,
}

impl ImportCommand {
    pub fn new(validator: ImportValidator) -> Self {
        Self { validator }
    }

    /// Evaluate `args`, register the world when everything checks out, and
    /// report every step to `sender`. Returns the final outcome:
    /// `ReadyToImport` never escapes, it becomes `ImportSucceeded` or
    /// `ImportFailed`.
    pub fn execute(
        &self,
        env: &mut CommandEnv<'_>,
        sender: &mut dyn CommandSender,
        args: &ImportArgs,
    ) -> ImportOutcome {
        let messenger = env.messenger;
        let outcome = self.validator.evaluate(&*env.worlds, args);

        match &outcome {
            ImportOutcome::ListCandidates(candidates) => {
                if candidates.is_empty() {
                    messenger.message(sender, &NO_POTENTIAL_WORLDS, &[]);
                } else {
                    messenger.message(sender, &POTENTIAL_WORLD_LIST, &[format_world_list(candidates).as_str()]);
                }
            }
            ImportOutcome::UsageError => {}
            ImportOutcome::AlreadyManaged(name) => {
                messenger.message(sender, &language::WORLD_ALREADY_EXISTS, &[name.as_str()]);
            }
            ImportOutcome::InvalidEnvironment(token) => {
                let valid = WorldEnvironment::all().map(|e| e.as_str()).join(", ");
                messenger.message(sender, &IMPORT_FAILED, &[]);
                messenger.message(sender, &language::INVALID_ENVIRONMENT, &[token.as_str()]);
                messenger.message(sender, &language::VALID_ENVIRONMENTS, &[valid.as_str()]);
            }
            ImportOutcome::NonExistentFolder(candidates) => {
                messenger.message(sender, &IMPORT_FAILED, &[]);
                messenger.message(sender, &NON_EXISTENT_FOLDER, &[format_world_list(candidates).as_str()]);
            }
            ImportOutcome::ReadyToImport(request) => {
                messenger.message_and_log(sender, &STARTING_IMPORT, &[request.world_name.as_str()]);
                let result = self.validator.complete(&mut *env.worlds, request);
                match &result {
                    ImportOutcome::ImportSucceeded(_) => {
                        messenger.message_and_log(sender, &IMPORT_COMPLETE, &[]);
                    }
                    ImportOutcome::ImportFailed(cause) => {
                        warn!(
                            "Import of '{}' failed: {}",
                            escape_log(&request.world_name),
                            cause
                        );
                        messenger.message(sender, &IMPORT_FAILED, &[]);
                        messenger.message(sender, &language::CREATION_FAILED, &[cause.to_string().as_str()]);
                    }
                    _ => {}
                }
                return result;
            }
            ImportOutcome::ImportSucceeded(_) | ImportOutcome::ImportFailed(_) => {}
        }
        outcome
    }
}

impl From<&CommandContext> for ImportArgs {
    fn from(ctx: &CommandContext) -> Self {
        ImportArgs {
            world_name: ctx.get_string(0).unwrap_or_default().to_string(),
            environment: ctx.get_string(1).map(str::to_string),
            generator: ctx.get_flag('g').map(str::to_string),
            no_spawn_adjust: ctx.has_flag('n'),
        }
    }
}

impl Command for ImportCommand {
    fn info(&self) -> &CommandInfo {
        &INFO
    }

    fn perm(&self) -> Perm {
        perms::CMD_IMPORT
    }

    fn help(&self) -> &Message {
        &IMPORT_HELP
    }

    fn run(&self, env: &mut CommandEnv<'_>, sender: &mut dyn CommandSender, ctx: &CommandContext) -> bool {
        let args = ImportArgs::from(ctx);
        !matches!(self.execute(env, sender, &args), ImportOutcome::UsageError)
    }
}
