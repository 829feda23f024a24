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

use crate::error::{Error, Result};

/// Parse the value typed by the analyst.
///
/// `0x`-prefixed input is hexadecimal, anything else is decimal. Surrounding
/// whitespace, `_` digit separators and one leading `+` are accepted. A
/// leading `-` yields the 64-bit two's complement, which is how negative
/// operands are stored in instruction tokens.
pub fn parse_immediate(input: &str) -> Result<u64> {
    let invalid = |reason: &str| Error::InvalidImmediate {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let text = input.trim();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(rest) => (16, rest),
        None => (10, text),
    };

    if digits.is_empty() {
        return Err(invalid("no digits"));
    }
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(invalid("misplaced digit separator"));
    }
    if digits.starts_with(['+', '-']) {
        return Err(invalid("unexpected sign"));
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    let magnitude = u64::from_str_radix(&cleaned, radix).map_err(|e| invalid(&e.to_string()))?;

    if !negative {
        return Ok(magnitude);
    }
    if magnitude > 1u64 << 63 {
        return Err(invalid("number too small to fit in target type"));
    }
    Ok(magnitude.wrapping_neg())
}
