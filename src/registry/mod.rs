//! Builds the prompt command tree from configuration.
//!
//! Every `[commands.<group>.<command>]` entry becomes a [`PromptCommand`]
//! holding its own copies of the group name, command name and system prompt.
//! All commands share one action, [`PromptCommand::execute`], which receives
//! the leaf data and the user's text explicitly.
//!
//! Building never fails. Misconfigured entries are logged and still listed so
//! `--help` can show them; they fail when invoked.

use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{info, warn};

use crate::config::PromptDefinition;
use crate::error::PromptError;
use crate::output::Renderer;
use crate::relay::StreamRelay;
use crate::transport::CompletionTransport;

/// Group → command → prompt, as read from configuration.
pub type CommandTree = BTreeMap<String, BTreeMap<String, PromptDefinition>>;

/// A runnable `<group> <command>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCommand {
    pub group: String,
    pub name: String,
    /// Sent as the system message. Doubles as help text.
    pub system_prompt: String,
}

/// A top-level command grouping related prompt commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandGroup {
    pub name: String,
    pub usage: String,
    pub commands: Vec<PromptCommand>,
}

impl CommandGroup {
    pub fn command(&self, name: &str) -> Option<&PromptCommand> {
        self.commands.iter().find(|c| c.name == name)
    }
}

/// The built command tree plus the relay its commands stream through.
pub struct CommandRegistry {
    groups: Vec<CommandGroup>,
    relay: Option<StreamRelay>,
}

impl CommandRegistry {
    /// Builds one group per configured group and one command per entry.
    ///
    /// Groups and commands come out sorted by name. Without a transport the
    /// registry is empty: only built-in commands will be available.
    pub fn build(tree: &CommandTree, transport: Option<Rc<dyn CompletionTransport>>) -> Self {
        let Some(transport) = transport else {
            warn!("Completion client is not initialized");
            return Self::empty();
        };

        if tree.is_empty() {
            warn!("No commands found in configuration");
        }

        let groups = tree
            .iter()
            .map(|(group, entries)| {
                if entries.is_empty() {
                    warn!("No subcommands found for main command '{group}'");
                }
                let commands = entries
                    .iter()
                    .map(|(name, definition)| {
                        if definition.system_prompt.is_empty() {
                            warn!("System prompt is empty for {group}/{name}");
                        }
                        PromptCommand {
                            group: group.clone(),
                            name: name.clone(),
                            system_prompt: definition.system_prompt.clone(),
                        }
                    })
                    .collect();
                CommandGroup {
                    name: group.clone(),
                    usage: format!("Run {group} prompts"),
                    commands,
                }
            })
            .collect();

        Self {
            groups,
            relay: Some(StreamRelay::new(transport)),
        }
    }

    /// A registry with no prompt commands.
    pub fn empty() -> Self {
        Self {
            groups: Vec::new(),
            relay: None,
        }
    }

    /// Applies an idle timeout to every command's stream.
    pub fn with_idle_timeout(mut self, timeout: Option<std::time::Duration>) -> Self {
        self.relay = self.relay.map(|r| r.with_idle_timeout(timeout));
        self
    }

    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn find(&self, group: &str, command: &str) -> Option<&PromptCommand> {
        self.groups
            .iter()
            .find(|g| g.name == group)
            .and_then(|g| g.command(command))
    }

    /// Runs `<group> <command>` with the user's text.
    ///
    /// Returns `None` when no such command exists.
    pub async fn invoke(
        &self,
        group: &str,
        command: &str,
        user_input: Option<&str>,
        renderer: &mut dyn Renderer,
    ) -> Option<Result<(), PromptError>> {
        let relay = self.relay.as_ref()?;
        let command = self.find(group, command)?;
        Some(command.execute(relay, user_input, renderer).await)
    }
}

impl PromptCommand {
    /// Validates the command and the user's text, then streams the response.
    ///
    /// Validation failures return before the transport is contacted.
    pub async fn execute(
        &self,
        relay: &StreamRelay,
        user_input: Option<&str>,
        renderer: &mut dyn Renderer,
    ) -> Result<(), PromptError> {
        info!("Running command: {}/{}", self.group, self.name);

        if self.system_prompt.is_empty() {
            warn!("No prompt text provided for {}/{}", self.group, self.name);
            return Err(PromptError::MisconfiguredCommand {
                group: self.group.clone(),
                command: self.name.clone(),
            });
        }

        let Some(user_prompt) = user_input.map(str::trim).filter(|s| !s.is_empty()) else {
            warn!("No user prompt provided for {}/{}", self.group, self.name);
            renderer.render_usage(&self.group, &self.name);
            return Err(PromptError::MissingUserInput {
                group: self.group.clone(),
                command: self.name.clone(),
            });
        };

        renderer.render_system_prompt(&self.system_prompt);
        let result = relay
            .relay(&self.system_prompt, user_prompt, renderer)
            .await;
        renderer.render_separator();

        result.map_err(|err| {
            info!("Error from completion client: {err}");
            PromptError::from(err)
        })
    }
}

#[cfg(test)]
mod tests;
