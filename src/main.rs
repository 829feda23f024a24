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

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::debug;

use search_immediate::config::Args;
use search_immediate::host::{ConsoleInteraction, ReportSink, StandaloneView};
use search_immediate::plugin::COMMAND_NAME;
use search_immediate::{logging, register_commands, CommandRegistry};

fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = logging::init(args.debug).context("Failed to start logger")?;

    let sink = ReportSink {
        html_path: args.output.clone(),
        print_plaintext: !args.json,
        print_json: args.json,
    };
    let view = StandaloneView::open(&args.binary, sink)
        .with_context(|| format!("Failed to load {}", args.binary.display()))?;
    let interaction = ConsoleInteraction::new(args.value.clone());

    let mut registry = CommandRegistry::new();
    register_commands(&mut registry, interaction, args.search_settings());
    for command in registry.commands() {
        debug!("{}: {}", command.name, command.description);
    }
    if !registry.execute(COMMAND_NAME, &view)? {
        bail!("Command {:?} could not be run", COMMAND_NAME);
    }
    Ok(())
}
