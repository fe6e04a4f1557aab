// Copyright (c) 2025-2026 Corpus Contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! `lines=`/`tag[s]=` filtering of included content (§4.7).
//!
//! Tag regions are delimited by circumfix comments, `// tag::name[]` and
//! `// end::name[]` (or `#` for shell-style comments); the markers
//! themselves are always stripped from the output.

use regex::Regex;
use std::sync::LazyLock;

use crate::diagnostic::{Diagnostic, Logger, Severity};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// A single `lines=` range, one-based and inclusive; `None` on either end
/// means "to the start" / "to the end" of the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    /// First line included, or `None` for the start of the file.
    pub start: Option<u32>,
    /// Last line included, or `None` for the end of the file.
    pub end: Option<u32>,
}

/// A single `tag=`/`tags=` selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagSelector {
    /// Tag name, or `"*"` (top-level tags) / `"**"` (all tags, any depth).
    pub name: String,
    /// Whether matching tags are included (`true`) or excluded (`!name`).
    pub include: bool,
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Parses a `tag=`/`tags=` attribute value into an ordered selector list.
///
/// A bare `name` selects it; `!name` deselects it. Selectors are applied in
/// order, so a later selector overrides an earlier one for the same tag.
pub fn parse_tag_selectors(value: &str) -> Vec<TagSelector> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|token| match token.strip_prefix('!') {
            Some(name) => TagSelector { name: name.to_string(), include: false },
            None => TagSelector { name: token.to_string(), include: true },
        })
        .collect()
}

/// Parses a `lines=` attribute value (e.g. `"1..10,15,20..-1"`) into ranges.
///
/// `-1` as an end marks "to the end of the file".
pub fn parse_line_ranges(value: &str) -> Vec<LineRange> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|token| match token.split_once("..") {
            Some((start, end)) => LineRange {
                start: start.trim().parse().ok(),
                end: match end.trim() {
                    "-1" | "" => None,
                    n => n.parse().ok(),
                },
            },
            None => {
                let n = token.parse().ok();
                LineRange { start: n, end: n }
            }
        })
        .collect()
}

/// Returns the lines of `content` selected by `ranges`, joined back with
/// `\n`.
pub fn select_lines(content: &str, ranges: &[LineRange]) -> String {
    if ranges.is_empty() {
        return content.to_string();
    }
    content
        .lines()
        .enumerate()
        .filter(|(i, _)| {
            let line = (i + 1) as u32;
            ranges.iter().any(|r| {
                r.start.is_none_or(|start| line >= start) && r.end.is_none_or(|end| line <= end)
            })
        })
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

static TAG_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(?://|#)[ \t]*(tag|end)::([\w][\w.$-]*)\[\][ \t]*$").unwrap()
});

/// Returns the lines of `content` selected by `selectors`, stripping tag
/// marker lines from the output, and logs a diagnostic for every
/// `UnclosedTag`, `MismatchedEndTag` and `UnexpectedEndTag` condition found
/// (§7).
pub fn select_tags(
    content: &str, selectors: &[TagSelector], path: &str, logger: &mut dyn Logger,
) -> String {
    let mut stack: Vec<String> = Vec::new();
    let mut out = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line_no = (i + 1) as u32;
        if let Some(caps) = TAG_DIRECTIVE.captures(line) {
            let directive = &caps[1];
            let name = caps[2].to_string();
            match directive {
                "tag" => stack.push(name),
                "end" => match stack.last() {
                    Some(top) if *top == name => {
                        stack.pop();
                    }
                    _ if stack.iter().any(|t| *t == name) => {
                        logger.log(
                            Diagnostic::new(
                                Severity::Warn,
                                "mismatched-end-tag",
                                format!("end::{name}[] does not match the innermost open tag"),
                            )
                            .at(path.to_string(), Some(line_no)),
                        );
                    }
                    _ => {
                        logger.log(
                            Diagnostic::new(
                                Severity::Warn,
                                "unexpected-end-tag",
                                format!("end::{name}[] has no matching tag::{name}[]"),
                            )
                            .at(path.to_string(), Some(line_no)),
                        );
                    }
                },
                _ => unreachable!("regex only matches tag|end"),
            }
            continue;
        }

        let included = stack
            .iter()
            .enumerate()
            .all(|(depth, name)| tag_included(name, depth + 1, selectors));
        if included {
            out.push(line);
        }
    }

    for name in &stack {
        logger.log(
            Diagnostic::new(
                Severity::Warn,
                "unclosed-tag",
                format!("tag::{name}[] was never closed with a matching end::{name}[]"),
            )
            .at(path.to_string(), None),
        );
    }

    out.join("\n")
}

fn tag_included(name: &str, depth: usize, selectors: &[TagSelector]) -> bool {
    let mut decision = false;
    for selector in selectors {
        let matches = match selector.name.as_str() {
            "**" => true,
            "*" => depth == 1,
            other => other == name,
        };
        if matches {
            decision = selector.include;
        }
    }
    decision
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::VecLogger;

    const SOURCE: &str = "before\n// tag::outer[]\nouter-start\n// tag::inner[]\ninner\n// end::inner[]\nouter-end\n// end::outer[]\nafter";

    #[test]
    fn untagged_content_passes_through_by_default() {
        let mut logger = VecLogger::default();
        let selectors = parse_tag_selectors("outer");
        let result = select_tags(SOURCE, &selectors, "f.adoc", &mut logger);
        assert!(result.contains("before"));
        assert!(result.contains("after"));
    }

    #[test]
    fn selecting_an_outer_tag_without_wildcard_excludes_nested_tags() {
        let mut logger = VecLogger::default();
        let selectors = parse_tag_selectors("outer");
        let result = select_tags(SOURCE, &selectors, "f.adoc", &mut logger);
        assert!(result.contains("outer-start"));
        assert!(result.contains("outer-end"));
        assert!(!result.contains("inner"));
    }

    #[test]
    fn double_star_includes_nested_tags_too() {
        let mut logger = VecLogger::default();
        let selectors = parse_tag_selectors("**");
        let result = select_tags(SOURCE, &selectors, "f.adoc", &mut logger);
        assert!(result.contains("inner"));
    }

    #[test]
    fn negation_excludes_a_specific_tag_even_under_double_star() {
        let mut logger = VecLogger::default();
        let selectors = parse_tag_selectors("**,!inner");
        let result = select_tags(SOURCE, &selectors, "f.adoc", &mut logger);
        assert!(result.contains("outer-start"));
        assert!(!result.contains("inner"));
    }

    #[test]
    fn unclosed_tag_is_reported() {
        let mut logger = VecLogger::default();
        let selectors = parse_tag_selectors("**");
        select_tags("// tag::a[]\ncontent", &selectors, "f.adoc", &mut logger);
        assert_eq!(logger.diagnostics()[0].code, "unclosed-tag");
    }

    #[test]
    fn unexpected_end_tag_is_reported() {
        let mut logger = VecLogger::default();
        select_tags("// end::a[]\n", &[], "f.adoc", &mut logger);
        assert_eq!(logger.diagnostics()[0].code, "unexpected-end-tag");
    }

    #[test]
    fn line_ranges_select_inclusive_spans() {
        let content = "1\n2\n3\n4\n5";
        let ranges = parse_line_ranges("1..2,4");
        assert_eq!(select_lines(content, &ranges), "1\n2\n4");
    }

    #[test]
    fn open_ended_line_range_runs_to_end_of_file() {
        let content = "1\n2\n3";
        let ranges = parse_line_ranges("2..-1");
        assert_eq!(select_lines(content, &ranges), "2\n3");
    }
}
