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

//! Instruction text tokens, the unit the host uses to describe a disassembled
//! instruction. Each token carries its display text and, for numeric operands,
//! the value it denotes.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,
    Instruction,
    OperandSeparator,
    Register,
    Keyword,
    Integer,
    PossibleAddress,
    BeginMemoryOperand,
    EndMemoryOperand,
    Brace,
}

impl TokenKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::PossibleAddress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionTextToken {
    pub kind: TokenKind,
    pub text: String,
    // Only meaningful for numeric tokens; negative literals are two's complement
    pub value: u64,
}

impl InstructionTextToken {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            value: 0,
        }
    }

    pub fn with_value(kind: TokenKind, text: impl Into<String>, value: u64) -> Self {
        Self {
            kind,
            text: text.into(),
            value,
        }
    }
}

/// Render a token list as one line of text: every token's text is stripped of
/// surrounding whitespace and the pieces are joined with single spaces.
pub fn tokens_to_string(tokens: &[InstructionTextToken]) -> String {
    tokens
        .iter()
        .map(|token| token.text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}
