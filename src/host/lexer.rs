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

//! Turns capstone's `mnemonic` / `op_str` pair into instruction text tokens,
//! classifying integers that land inside a mapped section as possible
//! addresses.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::immediate::parse_immediate;
use crate::token::{InstructionTextToken, TokenKind};

const KEYWORDS: &[&str] = &[
    "byte", "word", "dword", "qword", "tbyte", "xword", "xmmword", "ymmword", "zmmword", "ptr",
    "lsl", "lsr", "asr", "ror", "rrx",
];

fn operand_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"(?P<sep>,)",
            r"|(?P<mem_open>\[)",
            r"|(?P<mem_close>\]!?)",
            r"|(?P<brace>[{}])",
            r"|(?P<int>#?-?(?:0[xX][0-9a-fA-F]+|[0-9]+))",
            r"|(?P<word>[A-Za-z_.$][A-Za-z0-9_.$]*)",
            r"|(?P<other>\S)",
        ))
        .expect("operand pattern is valid")
    })
}

pub struct OperandLexer {
    mapped: Vec<Range<u64>>,
}

impl OperandLexer {
    /// `mapped` holds the address ranges of the binary's loaded sections.
    pub fn new(mapped: Vec<Range<u64>>) -> Self {
        Self { mapped }
    }

    fn is_mapped(&self, value: u64) -> bool {
        value != 0 && self.mapped.iter().any(|r| r.contains(&value))
    }

    pub fn tokenize(&self, mnemonic: &str, op_str: &str) -> Vec<InstructionTextToken> {
        let mut tokens = vec![InstructionTextToken::new(TokenKind::Instruction, mnemonic)];

        for caps in operand_pattern().captures_iter(op_str) {
            let token = if let Some(m) = caps.name("sep") {
                InstructionTextToken::new(TokenKind::OperandSeparator, m.as_str())
            } else if let Some(m) = caps.name("mem_open") {
                InstructionTextToken::new(TokenKind::BeginMemoryOperand, m.as_str())
            } else if let Some(m) = caps.name("mem_close") {
                InstructionTextToken::new(TokenKind::EndMemoryOperand, m.as_str())
            } else if let Some(m) = caps.name("brace") {
                InstructionTextToken::new(TokenKind::Brace, m.as_str())
            } else if let Some(m) = caps.name("int") {
                self.integer_token(m.as_str())
            } else if let Some(m) = caps.name("word") {
                let kind = if KEYWORDS.contains(&m.as_str().to_ascii_lowercase().as_str()) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Register
                };
                InstructionTextToken::new(kind, m.as_str())
            } else if let Some(m) = caps.name("other") {
                InstructionTextToken::new(TokenKind::Text, m.as_str())
            } else {
                continue;
            };
            tokens.push(token);
        }

        tokens
    }

    fn integer_token(&self, text: &str) -> InstructionTextToken {
        match parse_immediate(text.trim_start_matches('#')) {
            Ok(value) => {
                let kind = if self.is_mapped(value) {
                    TokenKind::PossibleAddress
                } else {
                    TokenKind::Integer
                };
                InstructionTextToken::with_value(kind, text, value)
            }
            // Wider than 64 bits
            Err(_) => InstructionTextToken::new(TokenKind::Text, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokens_to_string;

    fn kinds(tokens: &[InstructionTextToken]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn x86_register_and_immediate() {
        let lexer = OperandLexer::new(vec![]);
        let tokens = lexer.tokenize("mov", "eax, 0x2a");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Instruction,
                TokenKind::Register,
                TokenKind::OperandSeparator,
                TokenKind::Integer,
            ]
        );
        assert_eq!(tokens[3].value, 0x2a);
        assert_eq!(tokens_to_string(&tokens), "mov eax , 0x2a");
    }

    #[test]
    fn x86_memory_operand() {
        let lexer = OperandLexer::new(vec![]);
        let tokens = lexer.tokenize("mov", "qword ptr [rbp - 8], 0");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Instruction,
                TokenKind::Keyword,
                TokenKind::Keyword,
                TokenKind::BeginMemoryOperand,
                TokenKind::Register,
                TokenKind::Text,
                TokenKind::Integer,
                TokenKind::EndMemoryOperand,
                TokenKind::OperandSeparator,
                TokenKind::Integer,
            ]
        );
        assert_eq!(tokens[6].value, 8);
        assert_eq!(tokens[9].value, 0);
        assert_eq!(tokens_to_string(&tokens), "mov qword ptr [ rbp - 8 ] , 0");
    }

    #[test]
    fn possible_address_inside_mapped_section() {
        let lexer = OperandLexer::new(vec![0x401000..0x402000]);
        let tokens = lexer.tokenize("call", "0x401020");
        assert_eq!(tokens[1].kind, TokenKind::PossibleAddress);
        assert_eq!(tokens[1].value, 0x401020);

        let outside = lexer.tokenize("call", "0x402000");
        assert_eq!(outside[1].kind, TokenKind::Integer);
    }

    #[test]
    fn zero_is_never_an_address() {
        let lexer = OperandLexer::new(vec![0..0x1000]);
        let tokens = lexer.tokenize("mov", "eax, 0");
        assert_eq!(tokens[3].kind, TokenKind::Integer);
    }

    #[test]
    fn arm_immediates_and_register_lists() {
        let lexer = OperandLexer::new(vec![]);
        let tokens = lexer.tokenize("ldr", "r0, [r1, #-0x10]!");
        assert_eq!(tokens[4].kind, TokenKind::Register);
        assert_eq!(tokens[6].kind, TokenKind::Integer);
        assert_eq!(tokens[6].text, "#-0x10");
        assert_eq!(tokens[6].value, (-16i64) as u64);
        assert_eq!(tokens[7].kind, TokenKind::EndMemoryOperand);
        assert_eq!(tokens[7].text, "]!");

        let push = lexer.tokenize("push", "{r4, r5, lr}");
        assert_eq!(push[1].kind, TokenKind::Brace);
        assert_eq!(push.last().unwrap().kind, TokenKind::Brace);
        assert_eq!(tokens_to_string(&push), "push { r4 , r5 , lr }");

        let shift = lexer.tokenize("add", "r0, r1, r2, lsl #2");
        assert_eq!(shift[7].kind, TokenKind::Keyword);
        assert_eq!(shift[8].value, 2);
    }

    #[test]
    fn no_operands() {
        let lexer = OperandLexer::new(vec![]);
        let tokens = lexer.tokenize("ret", "");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Instruction);
    }

    #[test]
    fn oversized_literal_becomes_text() {
        let lexer = OperandLexer::new(vec![]);
        let tokens = lexer.tokenize("dq", "0x123456789abcdef01");
        assert_eq!(tokens[1].kind, TokenKind::Text);
    }
}
