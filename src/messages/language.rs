//! Messages shared by more than one command.

use super::Message;

pub const WORLD_ALREADY_EXISTS: Message = Message::new(
    "world.already_exists",
    "{failure}A world named '%s' is already managed.",
);

pub const INVALID_ENVIRONMENT: Message = Message::new(
    "world.invalid_environment",
    "{failure}'%s' is not a valid environment.",
);

pub const VALID_ENVIRONMENTS: Message = Message::new(
    "world.valid_environments",
    "{info}Valid environments are: %s",
);

pub const CREATION_FAILED: Message = Message::new("world.creation_failed", "{failure}%s");

pub const NO_PERMISSION: Message = Message::new(
    "command.no_permission",
    "{failure}You do not have permission to use '%s' (requires %s).",
);

pub const UNKNOWN_COMMAND: Message = Message::new(
    "command.unknown",
    "{failure}Unknown command '%s'.",
);

pub const USAGE: Message = Message::new("command.usage", "{cmd_usage}Usage: /%s %s");

pub const BAD_ARGUMENTS: Message = Message::new("command.bad_arguments", "{failure}%s");
