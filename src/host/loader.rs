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

//! Builds the function/instruction index the search runs over: map the file,
//! take sized text symbols as functions, disassemble each one and lex the
//! result into tokens.

use std::collections::BTreeMap;
use std::fs::File;
use std::ops::Range;
use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use memmap2::Mmap;
use object::{Architecture, Object, ObjectSection, ObjectSymbol, SectionIndex, SymbolKind};

use crate::error::Result;
use crate::host::disasm::Disassembler;
use crate::host::lexer::OperandLexer;
use crate::view::{Function, Instruction};

pub struct LoadedBinary {
    pub architecture: Architecture,
    pub sections: Vec<Range<u64>>,
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone)]
struct FunctionSymbol {
    name: String,
    address: u64,
    size: u64,
    section: SectionIndex,
    thumb: bool,
}

pub fn load_binary(path: &Path) -> Result<LoadedBinary> {
    let now = Instant::now();
    let file = File::open(path)?;
    // SAFETY: the mapping is read-only and dropped before this function returns
    let mmap = unsafe { Mmap::map(&file)? };
    let loaded = load_from_bytes(&mmap)?;
    info!(
        "Loaded {}: {:?}, {} functions, {} instructions in {:.2?}",
        path.display(),
        loaded.architecture,
        loaded.functions.len(),
        loaded
            .functions
            .iter()
            .map(Function::instruction_count)
            .sum::<usize>(),
        now.elapsed()
    );
    Ok(loaded)
}

pub fn load_from_bytes(data: &[u8]) -> Result<LoadedBinary> {
    let obj_file = object::File::parse(data)?;
    let architecture = obj_file.architecture();
    let disassembler = Disassembler::for_architecture(architecture)?;

    let sections: Vec<Range<u64>> = obj_file
        .sections()
        .filter(|s| s.address() != 0 && s.size() > 0)
        .map(|s| s.address()..s.address() + s.size())
        .collect();
    let lexer = OperandLexer::new(sections.clone());

    let symbols = collect_function_symbols(&obj_file, disassembler.has_thumb());
    debug!("{} function symbols", symbols.len());

    let mut functions = Vec::with_capacity(symbols.len());
    for symbol in symbols.into_values() {
        let section = obj_file.section_by_index(symbol.section)?;
        let Some(code) = section.data_range(symbol.address, symbol.size)? else {
            warn!(
                "No data for {} at 0x{:x}+0x{:x}, skipping",
                symbol.name, symbol.address, symbol.size
            );
            continue;
        };

        let insns = match disassembler.disassemble_block(code, symbol.address, symbol.thumb) {
            Ok(insns) => insns,
            Err(e) => {
                warn!("Failed to disassemble {}: {}", symbol.name, e);
                continue;
            }
        };
        let decoded: u64 = insns.iter().map(|i| i.size as u64).sum();
        if decoded < symbol.size {
            debug!(
                "{}: decoded 0x{:x} of 0x{:x} bytes",
                symbol.name, decoded, symbol.size
            );
        }

        let mut function = Function::new(symbol.name, symbol.address);
        function.instructions = insns
            .iter()
            .map(|i| Instruction::new(i.address, lexer.tokenize(&i.mnemonic, &i.op_str)))
            .collect();
        functions.push(function);
    }

    Ok(LoadedBinary {
        architecture,
        sections,
        functions,
    })
}

/// Sized, defined text symbols keyed (and therefore ordered) by address. The
/// static symbol table wins over the dynamic one for the name of an address.
fn collect_function_symbols(
    obj_file: &object::File,
    has_thumb: bool,
) -> BTreeMap<u64, FunctionSymbol> {
    let mut by_addr = BTreeMap::new();

    for sym in obj_file.symbols().chain(obj_file.dynamic_symbols()) {
        if sym.kind() != SymbolKind::Text || sym.size() == 0 || !sym.is_definition() {
            continue;
        }
        let Some(section) = sym.section_index() else {
            continue;
        };
        let Ok(raw_name) = sym.name() else {
            continue;
        };

        let mut address = sym.address();
        let thumb = has_thumb && address & 1 == 1;
        if thumb {
            address &= !1;
        }

        by_addr.entry(address).or_insert_with(|| FunctionSymbol {
            name: demangle_name(raw_name),
            address,
            size: sym.size(),
            section,
            thumb,
        });
    }

    by_addr
}

pub fn demangle_name(raw: &str) -> String {
    if let Ok(demangled) = rustc_demangle::try_demangle(raw) {
        // Alternate form drops the trailing hash
        return format!("{:#}", demangled);
    }
    if let Ok(symbol) = cpp_demangle::Symbol::new(raw) {
        if let Ok(demangled) = symbol.demangle() {
            if !demangled.is_empty() {
                return demangled;
            }
        }
    }
    raw.to_string()
}
