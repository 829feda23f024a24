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

//! The host side of the plugin boundary: an analysed binary and the
//! analyst-facing dialogs. Anything that can hand out disassembled functions
//! and display a report can run the search command.

use crate::error::Result;
use crate::report::SearchReport;
use crate::token::InstructionTextToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub address: u64,
    pub tokens: Vec<InstructionTextToken>,
}

impl Instruction {
    pub fn new(address: u64, tokens: Vec<InstructionTextToken>) -> Self {
        Self { address, tokens }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub start: u64,
    pub instructions: Vec<Instruction>,
}

impl Function {
    pub fn new(name: String, start: u64) -> Self {
        Self {
            name,
            start,
            instructions: Vec::new(),
        }
    }

    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }
}

/// An analysed binary, as seen by a plugin command.
pub trait BinaryView {
    /// All functions the host has disassembled, in host order.
    fn functions(&self) -> &[Function];

    fn show_html_report(&self, title: &str, html: &str, plaintext: &str) -> Result<()>;

    /// Display a finished search. Hosts that can do more than show HTML
    /// (structured output, for instance) override this.
    fn show_report(&self, report: &SearchReport) -> Result<()> {
        self.show_html_report(&report.title, &report.html, &report.plaintext)
    }
}

/// Dialogs the host offers to commands.
pub trait Interaction {
    /// Returns `None` when the analyst cancels the prompt.
    fn get_text_line_input(&self, prompt: &str, title: &str) -> Option<String>;

    fn show_message_box(&self, title: &str, text: &str);
}
