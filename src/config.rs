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

use std::path::PathBuf;

use clap::Parser;

use crate::search::MatchPolicy;

#[derive(Parser, Debug)]
#[command(name = "search-immediate")]
#[command(about = "Search for a specific value in the instruction operands of a binary", long_about = None)]
pub struct Args {
    /// Path to the binary to analyse
    pub binary: PathBuf,

    /// Value to search for (decimal or 0x-prefixed hex). Prompted for when omitted
    #[arg(short = 'v', long = "value", allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Write the HTML report to this file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Print the matches as JSON instead of a text table
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,

    /// Only match operands that look like addresses in the binary
    #[arg(long = "addresses-only", default_value_t = false)]
    pub addresses_only: bool,

    /// Enable debug output
    #[arg(short = 'd', long = "debug", default_value_t = false)]
    pub debug: bool,
}

/// Knobs of the search command that do not come from the analyst prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSettings {
    pub policy: MatchPolicy,
}

impl Args {
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            policy: if self.addresses_only {
                MatchPolicy::AddressesOnly
            } else {
                MatchPolicy::Immediates
            },
        }
    }
}
