// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Trivial templating engine.
//!
//! Templates are plain strings, typically HTML files embedded in the binary via `include_str!`,
//! and are rendered by substituting named placeholders with caller-provided values.  Values are
//! inserted verbatim, so any user-provided content must go through `escape` first.

/// Looks up the value for `key` in `replacements`.
///
/// Panics if the key is missing or appears more than once because templates are static and these
/// are programming errors.
fn lookup<'a>(key: &str, replacements: &[(&str, &'a str)]) -> &'a str {
    let mut matches = replacements.iter().filter(|(candidate, _)| *candidate == key);
    let value = match matches.next() {
        Some((_, value)) => *value,
        None => panic!("No replacement for {} but it must have been defined", key),
    };
    assert!(matches.next().is_none(), "Found two values for replacement {}", key);
    value
}

/// Performs various named string replacements in `input` based on `replacements`.
///
/// The `input` string can have `%key%` strings in it where `key` must appear in `replacements` and
/// which will be replaced by its corresponding value.  Raw `%` characters can be escaped via `%%`
/// and nested expansions are not supported.
pub fn apply(input: &str, replacements: &[(&str, &str)]) -> String {
    assert!(input.matches('%').count() % 2 == 0, "Unterminated replacement in template");

    let mut output = String::with_capacity(input.len());
    for (i, chunk) in input.split('%').enumerate() {
        if i % 2 == 0 {
            output.push_str(chunk);
        } else if chunk.is_empty() {
            output.push('%');
        } else {
            output.push_str(lookup(chunk, replacements));
        }
    }
    output
}

/// Escapes `input` so that it can be safely embedded in HTML text or in a quoted attribute.
pub fn escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            ch => output.push(ch),
        }
    }
    output
}
