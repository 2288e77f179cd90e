//! The ten secplus_gdo command actions
//!
//! An action is a command kind bound to a resolved root. Playing it calls the
//! matching zero-argument entry point of a [`GdoCommands`] implementation,
//! the boundary to the protocol engine that actually talks to the opener.

use crate::error::{ResolveError, ResolveResult};
use crate::pass::ResolutionPass;
use crate::schema::ClosedSet;
use gdo_core::{ComponentId, DOMAIN};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Command kinds understood by the opener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Sync,
    Resync,
    RestartComms,
    ResetTravelTimings,
    DoorOpen,
    DoorClose,
    DoorStop,
    DoorToggle,
    LightToggle,
    LockToggle,
}

impl ClosedSet for Command {
    const ALL: &'static [Self] = &[
        Command::Sync,
        Command::Resync,
        Command::RestartComms,
        Command::ResetTravelTimings,
        Command::DoorOpen,
        Command::DoorClose,
        Command::DoorStop,
        Command::DoorToggle,
        Command::LightToggle,
        Command::LockToggle,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Command::Sync => "sync",
            Command::Resync => "resync",
            Command::RestartComms => "restart_comms",
            Command::ResetTravelTimings => "reset_travel_timings",
            Command::DoorOpen => "door_open",
            Command::DoorClose => "door_close",
            Command::DoorStop => "door_stop",
            Command::DoorToggle => "door_toggle",
            Command::LightToggle => "light_toggle",
            Command::LockToggle => "lock_toggle",
        }
    }
}

impl Command {
    /// Action name as written in automations, e.g. `secplus_gdo.door_open`
    pub fn action_name(self) -> String {
        format!("{}.{}", DOMAIN, self.as_str())
    }

    /// Parse a full action name; `None` for actions of other domains
    pub fn from_action_name(name: &str) -> Option<Result<Self, &str>> {
        let command = name.strip_prefix(DOMAIN)?.strip_prefix('.')?;
        Some(Self::lookup(command).ok_or(command))
    }

    /// Invoke the matching entry point on the driver
    pub fn invoke(self, driver: &mut dyn GdoCommands) -> CommandResult {
        match self {
            Command::Sync => driver.sync(),
            Command::Resync => driver.resync(),
            Command::RestartComms => driver.restart_comms(),
            Command::ResetTravelTimings => driver.reset_travel_timings(),
            Command::DoorOpen => driver.door_open(),
            Command::DoorClose => driver.door_close(),
            Command::DoorStop => driver.door_stop(),
            Command::DoorToggle => driver.door_toggle(),
            Command::LightToggle => driver.light_toggle(),
            Command::LockToggle => driver.lock_toggle(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("opener communication has not been started")]
    NotStarted,

    #[error("command '{command}' was rejected: {reason}")]
    Rejected {
        command: &'static str,
        reason: String,
    },
}

pub type CommandResult = Result<(), CommandError>;

/// Command entry points of the garage door opener driver
pub trait GdoCommands {
    fn sync(&mut self) -> CommandResult;
    fn resync(&mut self) -> CommandResult;
    fn restart_comms(&mut self) -> CommandResult;
    fn reset_travel_timings(&mut self) -> CommandResult;
    fn door_open(&mut self) -> CommandResult;
    fn door_close(&mut self) -> CommandResult;
    fn door_stop(&mut self) -> CommandResult;
    fn door_toggle(&mut self) -> CommandResult;
    fn light_toggle(&mut self) -> CommandResult;
    fn lock_toggle(&mut self) -> CommandResult;
}

/// A command bound to a resolved root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundAction {
    pub command: Command,
    pub target: ComponentId,
}

impl BoundAction {
    /// Run the command against the target's driver
    pub fn play(&self, driver: &mut dyn GdoCommands) -> CommandResult {
        debug!("Playing {} on {}", self.command.action_name(), self.target);
        self.command.invoke(driver)
    }
}

/// Bind a command to a root that has already been resolved
pub fn bind_action(
    pass: &ResolutionPass,
    command: Command,
    target: &ComponentId,
) -> ResolveResult<BoundAction> {
    if !pass.has_root(target) {
        return Err(ResolveError::unknown_root(target.as_str()));
    }
    debug!("Bound {} to {}", command.action_name(), target);
    Ok(BoundAction {
        command,
        target: target.clone(),
    })
}
