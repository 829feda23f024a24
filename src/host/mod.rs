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

//! Standalone host: loads a binary itself and offers the analysed view and
//! dialogs the search command expects from a disassembler.

pub mod disasm;
pub mod lexer;
pub mod loader;
pub mod standalone;

pub use loader::{load_binary, LoadedBinary};
pub use standalone::{ConsoleInteraction, ReportSink, StandaloneView};
