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

use log::debug;
use serde::Serialize;

use crate::token::{tokens_to_string, InstructionTextToken, TokenKind};
use crate::view::BinaryView;

/// Which operand tokens take part in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Plain integers and integers that look like addresses.
    #[default]
    Immediates,
    /// Only integers the host classified as possible addresses.
    AddressesOnly,
}

impl MatchPolicy {
    pub fn accepts(self, kind: TokenKind) -> bool {
        match self {
            MatchPolicy::Immediates => kind.is_numeric(),
            MatchPolicy::AddressesOnly => kind == TokenKind::PossibleAddress,
        }
    }

    fn matches(self, tokens: &[InstructionTextToken], value: u64) -> bool {
        tokens
            .iter()
            .any(|token| self.accepts(token.kind) && token.value == value)
    }
}

/// One matching instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    #[serde(serialize_with = "serialize_hex")]
    pub address: u64,
    pub function: String,
    pub instruction: String,
}

fn serialize_hex<S: serde::Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{:x}", value))
}

/// Walk every instruction of every function and collect the ones with an
/// operand equal to `value`. Results keep host order; an instruction is
/// reported once no matter how many of its operands match.
pub fn lookup_for_immediate(
    view: &dyn BinaryView,
    value: u64,
    policy: MatchPolicy,
) -> Vec<SearchResult> {
    let mut results = Vec::new();
    let mut scanned = 0usize;

    for function in view.functions() {
        for instruction in &function.instructions {
            scanned += 1;
            if policy.matches(&instruction.tokens, value) {
                results.push(SearchResult {
                    address: instruction.address,
                    function: function.name.clone(),
                    instruction: tokens_to_string(&instruction.tokens),
                });
            }
        }
    }

    debug!(
        "Scanned {} instructions in {} functions, {} match 0x{:x}",
        scanned,
        view.functions().len(),
        results.len(),
        value
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::view::{Function, Instruction};

    struct MockView {
        functions: Vec<Function>,
    }

    impl BinaryView for MockView {
        fn functions(&self) -> &[Function] {
            &self.functions
        }

        fn show_html_report(&self, _title: &str, _html: &str, _plaintext: &str) -> Result<()> {
            Ok(())
        }
    }

    fn insn(address: u64, mnemonic: &str, operands: Vec<InstructionTextToken>) -> Instruction {
        let mut tokens = vec![InstructionTextToken::new(TokenKind::Instruction, mnemonic)];
        tokens.extend(operands);
        Instruction::new(address, tokens)
    }

    fn reg(name: &str) -> InstructionTextToken {
        InstructionTextToken::new(TokenKind::Register, name)
    }

    fn sep() -> InstructionTextToken {
        InstructionTextToken::new(TokenKind::OperandSeparator, ",")
    }

    fn int(value: u64) -> InstructionTextToken {
        InstructionTextToken::with_value(TokenKind::Integer, format!("0x{:x}", value), value)
    }

    fn addr(value: u64) -> InstructionTextToken {
        InstructionTextToken::with_value(TokenKind::PossibleAddress, format!("0x{:x}", value), value)
    }

    fn sample_view() -> MockView {
        let mut main = Function::new("main".to_string(), 0x1000);
        main.instructions = vec![
            insn(0x1000, "push", vec![reg("rbp")]),
            insn(0x1001, "mov", vec![reg("eax"), sep(), int(0x10)]),
            insn(0x1006, "call", vec![addr(0x2000)]),
        ];
        let mut helper = Function::new("helper".to_string(), 0x2000);
        helper.instructions = vec![
            insn(0x2000, "add", vec![reg("ecx"), sep(), int(0x10)]),
            insn(0x2003, "lea", vec![reg("rdi"), sep(), addr(0x10)]),
        ];
        let empty = Function::new("stub".to_string(), 0x3000);
        MockView {
            functions: vec![main, helper, empty],
        }
    }

    #[test]
    fn finds_integers_across_functions_in_order() {
        let results = lookup_for_immediate(&sample_view(), 0x10, MatchPolicy::Immediates);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].address, 0x1001);
        assert_eq!(results[0].function, "main");
        assert_eq!(results[0].instruction, "mov eax , 0x10");
        assert_eq!(results[1].address, 0x2000);
        assert_eq!(results[1].function, "helper");
        assert_eq!(results[2].address, 0x2003);
    }

    #[test]
    fn addresses_only_policy_skips_plain_integers() {
        let results = lookup_for_immediate(&sample_view(), 0x10, MatchPolicy::AddressesOnly);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].address, 0x2003);

        let calls = lookup_for_immediate(&sample_view(), 0x2000, MatchPolicy::AddressesOnly);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].instruction, "call 0x2000");
    }

    #[test]
    fn instruction_reported_once_for_several_matching_operands() {
        let mut f = Function::new("f".to_string(), 0);
        f.instructions = vec![insn(0, "imul", vec![reg("eax"), sep(), int(3), sep(), int(3)])];
        let view = MockView { functions: vec![f] };
        assert_eq!(lookup_for_immediate(&view, 3, MatchPolicy::default()).len(), 1);
    }

    #[test]
    fn non_numeric_tokens_never_match() {
        let mut f = Function::new("f".to_string(), 0);
        // A register token keeps value 0, searching for 0 must not hit it
        f.instructions = vec![insn(0, "push", vec![reg("rbp")])];
        let view = MockView { functions: vec![f] };
        assert!(lookup_for_immediate(&view, 0, MatchPolicy::Immediates).is_empty());
    }

    #[test]
    fn no_match_and_empty_view() {
        assert!(lookup_for_immediate(&sample_view(), 0x1234, MatchPolicy::Immediates).is_empty());
        let view = MockView { functions: vec![] };
        assert!(lookup_for_immediate(&view, 0x10, MatchPolicy::Immediates).is_empty());
    }

    #[test]
    fn result_serializes_address_as_hex() {
        let result = SearchResult {
            address: 0x401000,
            function: "main".to_string(),
            instruction: "ret".to_string(),
        };
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["address"], "0x401000");
        assert_eq!(v["function"], "main");
    }
}
