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

use capstone::prelude::*;
use object::Architecture;

use crate::error::{Error, Result};

/// Capstone front end for the architectures the standalone host can load.
pub struct Disassembler {
    cs: Capstone,
    // ARM images mix ARM and Thumb functions
    thumb: Option<Capstone>,
}

impl Disassembler {
    pub fn for_architecture(architecture: Architecture) -> Result<Self> {
        let disassembler = match architecture {
            Architecture::X86_64 => Self {
                cs: Capstone::new()
                    .x86()
                    .mode(arch::x86::ArchMode::Mode64)
                    .syntax(arch::x86::ArchSyntax::Intel)
                    .detail(false)
                    .build()?,
                thumb: None,
            },
            Architecture::I386 => Self {
                cs: Capstone::new()
                    .x86()
                    .mode(arch::x86::ArchMode::Mode32)
                    .syntax(arch::x86::ArchSyntax::Intel)
                    .detail(false)
                    .build()?,
                thumb: None,
            },
            Architecture::Arm => Self {
                cs: Capstone::new()
                    .arm()
                    .mode(arch::arm::ArchMode::Arm)
                    .detail(false)
                    .build()?,
                thumb: Some(
                    Capstone::new()
                        .arm()
                        .mode(arch::arm::ArchMode::Thumb)
                        .detail(false)
                        .build()?,
                ),
            },
            other => return Err(Error::UnsupportedArchitecture(format!("{:?}", other))),
        };
        Ok(disassembler)
    }

    pub fn has_thumb(&self) -> bool {
        self.thumb.is_some()
    }

    /// Disassembles a block of memory. Decoding stops at the first byte
    /// sequence that is not a valid instruction.
    pub fn disassemble_block(
        &self,
        code: &[u8],
        address: u64,
        thumb: bool,
    ) -> Result<Vec<InstructionData>> {
        let cs = match (&self.thumb, thumb) {
            (Some(thumb_cs), true) => thumb_cs,
            _ => &self.cs,
        };
        let insns = cs.disasm_all(code, address)?;

        let mut results = Vec::with_capacity(insns.len());
        for i in insns.iter() {
            results.push(InstructionData {
                address: i.address(),
                size: i.bytes().len() as u8,
                mnemonic: i.mnemonic().unwrap_or("").to_string(),
                op_str: i.op_str().unwrap_or("").to_string(),
            });
        }

        Ok(results)
    }
}

#[derive(Debug, Clone)]
pub struct InstructionData {
    pub address: u64,
    pub size: u8,
    pub mnemonic: String,
    pub op_str: String,
}
