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

use std::fmt::Write;

use serde_json::{json, Value};

use crate::search::SearchResult;

/// Everything the host needs to display one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub value: u64,
    pub results: Vec<SearchResult>,
    pub title: String,
    pub html: String,
    pub plaintext: String,
}

impl SearchReport {
    pub fn new(value: u64, results: Vec<SearchResult>) -> Self {
        Self {
            value,
            title: report_title(value),
            html: render_html(&results),
            plaintext: render_plaintext(&results),
            results,
        }
    }

    /// Format:
    /// {
    ///   "value": "0x...",
    ///   "count": <number of matches>,
    ///   "results": [ {"address": "0x...", "function": ..., "instruction": ...}, ... ]
    /// }
    pub fn to_json(&self) -> Value {
        json!({
            "value": format!("0x{:x}", self.value),
            "count": self.results.len(),
            "results": self.results,
        })
    }
}

pub fn report_title(value: u64) -> String {
    format!("Search immediate - 0x{:X}", value)
}

/// Static HTML table: address, function and instruction text per match.
pub fn render_html(results: &[SearchResult]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html>\n\t<body>\n");
    html.push_str("\t\t<table>\n");
    html.push_str("\t\t\t<tr>\n");
    html.push_str("\t\t\t\t<th width=\"150\">Address</th>\n");
    html.push_str("\t\t\t\t<th width=\"150\">Function</th>\n");
    html.push_str("\t\t\t\t<th>Instruction</th>\n");
    html.push_str("\t\t\t</tr>\n");
    for item in results {
        html.push_str("\t\t\t<tr>\n");
        // Writing into a String cannot fail
        let _ = writeln!(html, "\t\t\t\t<td><pre>0x{:016X}</pre></td>", item.address);
        let _ = writeln!(html, "\t\t\t\t<td><pre>{}</pre></td>", escape_html(&item.function));
        let _ = writeln!(html, "\t\t\t\t<td><pre>{}</pre></td>", escape_html(&item.instruction));
        html.push_str("\t\t\t</tr>\n");
    }
    html.push_str("\t\t</table>\n");
    html.push_str("\t</body>\n</html>");
    html
}

/// Fixed-width text version of the table for hosts without an HTML viewer.
pub fn render_plaintext(results: &[SearchResult]) -> String {
    let name_width = results
        .iter()
        .map(|r| r.function.chars().count())
        .max()
        .unwrap_or(0)
        .max("Function".len());

    let mut text = String::new();
    let _ = writeln!(
        text,
        "{:<18}  {:<name_width$}  Instruction",
        "Address", "Function"
    );
    for item in results {
        let _ = writeln!(
            text,
            "0x{:016X}  {:<name_width$}  {}",
            item.address, item.function, item.instruction
        );
    }
    text
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
