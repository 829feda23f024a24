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

//! A minimal host that plays the disassembler's role from the command line.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::host::loader::{load_binary, LoadedBinary};
use crate::report::SearchReport;
use crate::view::{BinaryView, Function, Interaction};

/// Where a report goes. `print_json` replaces the plaintext table on stdout
/// with the JSON document.
#[derive(Debug, Clone, Default)]
pub struct ReportSink {
    pub html_path: Option<PathBuf>,
    pub print_plaintext: bool,
    pub print_json: bool,
}

pub struct StandaloneView {
    binary: LoadedBinary,
    sink: ReportSink,
}

impl StandaloneView {
    pub fn open(path: &Path, sink: ReportSink) -> Result<Self> {
        Ok(Self::new(load_binary(path)?, sink))
    }

    pub fn new(binary: LoadedBinary, sink: ReportSink) -> Self {
        Self { binary, sink }
    }

    pub fn binary(&self) -> &LoadedBinary {
        &self.binary
    }
}

impl BinaryView for StandaloneView {
    fn functions(&self) -> &[Function] {
        &self.binary.functions
    }

    fn show_html_report(&self, title: &str, html: &str, plaintext: &str) -> Result<()> {
        if let Some(path) = &self.sink.html_path {
            fs::write(path, html)?;
            info!("{}: report written to {}", title, path.display());
        }
        if self.sink.print_plaintext {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            writeln!(w, "{}\n", title)?;
            w.write_all(plaintext.as_bytes())?;
            w.flush()?;
        }
        Ok(())
    }

    fn show_report(&self, report: &SearchReport) -> Result<()> {
        if !self.sink.print_json {
            return self.show_html_report(&report.title, &report.html, &report.plaintext);
        }
        if let Some(path) = &self.sink.html_path {
            fs::write(path, &report.html)?;
            info!("{}: report written to {}", report.title, path.display());
        }
        let doc = serde_json::to_string_pretty(&report.to_json())?;
        let stdout = io::stdout();
        let mut w = stdout.lock();
        writeln!(w, "{}", doc)?;
        w.flush()?;
        Ok(())
    }
}

/// Answers prompts from a preset value, or from stdin when there is none.
#[derive(Debug, Clone, Default)]
pub struct ConsoleInteraction {
    preset: Option<String>,
}

impl ConsoleInteraction {
    pub fn new(preset: Option<String>) -> Self {
        Self { preset }
    }
}

impl Interaction for ConsoleInteraction {
    fn get_text_line_input(&self, prompt: &str, title: &str) -> Option<String> {
        if let Some(value) = &self.preset {
            return Some(value.clone());
        }
        eprint!("{} - {}: ", title, prompt);
        io::stderr().flush().ok();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            // EOF counts as cancel
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn show_message_box(&self, title: &str, text: &str) {
        eprintln!("{}: {}", title, text);
    }
}
