// Copyright (c) 2026 Search-Immediate Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command registration and the "Search Immediate" command itself.

use log::{debug, error, info, warn};

use crate::config::SearchSettings;
use crate::error::Result;
use crate::immediate::parse_immediate;
use crate::report::SearchReport;
use crate::search::lookup_for_immediate;
use crate::view::{BinaryView, Interaction};

pub const COMMAND_NAME: &str = "Search Immediate";
pub const COMMAND_DESCRIPTION: &str = "Search for the specific value in the instruction operands.";

pub const PROMPT: &str = "Value to search";

pub trait Command {
    fn action(&self, view: &dyn BinaryView) -> Result<()>;

    fn valid(&self, view: &dyn BinaryView) -> bool;
}

pub struct RegisteredCommand {
    pub name: String,
    pub description: String,
    command: Box<dyn Command>,
}

/// Commands known to the host, looked up by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering a name twice replaces the earlier command.
    pub fn register<C: Command + 'static>(&mut self, name: &str, description: &str, command: C) {
        if let Some(pos) = self.commands.iter().position(|c| c.name == name) {
            warn!("Replacing already registered command {:?}", name);
            self.commands.remove(pos);
        }
        debug!("Registering command {:?}", name);
        self.commands.push(RegisteredCommand {
            name: name.to_string(),
            description: description.to_string(),
            command: Box::new(command),
        });
    }

    pub fn commands(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.commands.iter()
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Run the named command against `view`. `Ok(false)` when the command is
    /// unknown or not valid for this view; a failing command passes its error up.
    pub fn execute(&self, name: &str, view: &dyn BinaryView) -> Result<bool> {
        let Some(entry) = self.get(name) else {
            error!("Unknown command: {:?}", name);
            return Ok(false);
        };
        if !entry.command.valid(view) {
            warn!("Command {:?} is not valid for this view", name);
            return Ok(false);
        }
        entry.command.action(view)?;
        Ok(true)
    }
}

pub struct SearchImmediate<I> {
    interaction: I,
    settings: SearchSettings,
}

impl<I: Interaction> SearchImmediate<I> {
    pub fn new(interaction: I, settings: SearchSettings) -> Self {
        Self {
            interaction,
            settings,
        }
    }

    /// Prompt, search and display. `Ok(None)` means the analyst cancelled.
    pub fn run(&self, view: &dyn BinaryView) -> Result<Option<SearchReport>> {
        let Some(input) = self.interaction.get_text_line_input(PROMPT, COMMAND_NAME) else {
            debug!("Search cancelled");
            return Ok(None);
        };
        let value = parse_immediate(&input)?;

        let results = lookup_for_immediate(view, value, self.settings.policy);
        info!("Found {} instructions using 0x{:x}", results.len(), value);

        let report = SearchReport::new(value, results);
        view.show_report(&report)?;
        Ok(Some(report))
    }
}

impl<I: Interaction> Command for SearchImmediate<I> {
    /// The analyst sees the failure in a message box; the caller still gets it.
    fn action(&self, view: &dyn BinaryView) -> Result<()> {
        self.run(view).map(|_| ()).map_err(|e| {
            error!("{}: {}", COMMAND_NAME, e);
            self.interaction.show_message_box(COMMAND_NAME, &e.to_string());
            e
        })
    }

    fn valid(&self, _view: &dyn BinaryView) -> bool {
        true
    }
}

/// Register every command this crate provides.
pub fn register_commands<I: Interaction + 'static>(
    registry: &mut CommandRegistry,
    interaction: I,
    settings: SearchSettings,
) {
    registry.register(
        COMMAND_NAME,
        COMMAND_DESCRIPTION,
        SearchImmediate::new(interaction, settings),
    );
}
