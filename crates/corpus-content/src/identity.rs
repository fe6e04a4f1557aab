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

//! Resource identity and the user-facing resource ID grammar.
//!
//! A resource coordinate is `(component, version, module, family, relative)`.
//! This module only deals with the canonical internal key, the user-facing
//! spec string, and the grammar that turns one into the other. Defaulting
//! coordinates from a current-page context is the Resource Resolver's job
//! (`crate::resolver`), not this module's.

use std::fmt;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Name of the implicit root module/component.
pub const ROOT: &str = "ROOT";

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// The family a file belongs to (§3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// A publishable document.
    Page,
    /// An included fragment, not published on its own.
    Partial,
    /// Source code or other text meant to be included verbatim.
    Example,
    /// A publishable image.
    Image,
    /// A publishable binary attachment.
    Attachment,
    /// A navigation list file.
    Nav,
    /// A redirect to another file.
    Alias,
}

// ----------------------------------------------------------------------------

impl Family {
    /// All known families, in the order they appear in §3.
    pub const ALL: [Family; 7] = [
        Family::Page,
        Family::Partial,
        Family::Example,
        Family::Image,
        Family::Attachment,
        Family::Nav,
        Family::Alias,
    ];

    /// Returns the name used in resource specs and catalog diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Family::Page => "page",
            Family::Partial => "partial",
            Family::Example => "example",
            Family::Image => "image",
            Family::Attachment => "attachment",
            Family::Nav => "nav",
            Family::Alias => "alias",
        }
    }

    /// Parses a family name, restricted to the given permitted set if any.
    ///
    /// Per §4.1, a `<family>$` prefix is only recognized when the token
    /// exactly names a family in the permitted set (or any known family, if
    /// no set is given) — otherwise the `$` is not a delimiter at all.
    pub fn parse(name: &str, permitted: Option<&[Family]>) -> Option<Family> {
        let candidates = permitted.unwrap_or(&Family::ALL);
        candidates.iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ----------------------------------------------------------------------------

/// A closed set of families a macro or resolver call permits as a match
/// (§E.2 item 1) — shared by the Resource Resolver (`xref`, `include`) and
/// the Markup Adapter (`image:`/`image::`) instead of each hand-rolling its
/// own family check.
#[derive(Clone, Copy, Debug)]
pub struct PermittedFamilies(pub &'static [Family]);

impl PermittedFamilies {
    /// Families an `xref:` macro may resolve to.
    pub const XREF: PermittedFamilies = PermittedFamilies(&[Family::Page]);
    /// Families an `include::` directive may resolve to.
    pub const INCLUDE: PermittedFamilies =
        PermittedFamilies(&[Family::Partial, Family::Example, Family::Page]);
    /// Families an `image:`/`image::` macro may resolve to.
    pub const IMAGE: PermittedFamilies = PermittedFamilies(&[Family::Image]);

    /// Whether `family` is in this set.
    pub fn contains(&self, family: Family) -> bool {
        self.0.contains(&family)
    }

    /// The underlying family slice, for passing to [`parse`].
    pub fn as_slice(&self) -> &'static [Family] {
        self.0
    }
}

impl Family {
    /// Whether `permitted` allows this family.
    pub fn permits(self, permitted: PermittedFamilies) -> bool {
        permitted.contains(self)
    }
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// A fully-resolved resource coordinate.
///
/// Every [`crate::catalog::file::File`] owns one of these (embedded in its
/// `src`); this is also the unit `generate_key`/`generate_resource_spec`
/// operate on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Component name.
    pub component: String,
    /// Component version.
    pub version: String,
    /// Module name (`ROOT` for the default module).
    pub module: String,
    /// Family.
    pub family: Family,
    /// Module-relative path.
    pub relative: String,
}

// ----------------------------------------------------------------------------

/// The result of parsing a spec with [`parse`].
///
/// Coordinates left unspecified in the text are `None`; filling them from a
/// current-page context is the Resource Resolver's job (§4.6 step 2).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedId {
    /// Component, if given explicitly.
    pub component: Option<String>,
    /// Version, if given explicitly.
    pub version: Option<String>,
    /// Module, if given explicitly.
    pub module: Option<String>,
    /// Family, if given explicitly.
    pub family: Option<Family>,
    /// Module-relative path (always present; may contain `/`).
    pub relative: String,
    /// Fragment identifier (`#id`), if any.
    pub fragment: Option<String>,
}

/// The outcome of parsing a resource spec (§4.1, §7 `InvalidResourceSyntax`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedSpec {
    /// The spec parsed successfully.
    Id(ParsedId),
    /// The spec's syntax is structurally invalid (double `$`, empty
    /// `relative`, an unterminated component/module prefix, ...).
    Invalid,
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Generates the canonical internal catalog key for a coordinate.
///
/// Family is deliberately excluded (§3): a page and a partial sharing the
/// other four coordinates are still distinct because they can never coexist
/// at the same relative path (partials live under a different module
/// sub-directory).
pub fn generate_key(src: &Coordinate) -> String {
    format!("{}@{}:{}:{}", src.version, src.component, src.module, src.relative)
}

/// Generates the user-facing resource spec for a coordinate.
///
/// `shorthand` controls whether `ROOT` module is omitted (`component::rel`)
/// or spelled out (`component:ROOT:rel`).
pub fn generate_resource_spec(src: &Coordinate, shorthand: bool) -> String {
    let module = if src.module == ROOT && shorthand { "" } else { &src.module };
    let family_prefix = match src.family {
        Family::Page | Family::Alias => String::new(),
        other => format!("{other}$"),
    };
    format!(
        "{}@{}:{}:{}{}",
        src.version, src.component, module, family_prefix, src.relative
    )
}

// ----------------------------------------------------------------------------

/// Parses a user-facing resource spec (§4.1, §6 grammar).
///
/// `permitted` restricts which family tokens are recognized before a `$`;
/// pass `None` to recognize any family name.
pub fn parse(spec: &str, permitted: Option<&[Family]>) -> ParsedSpec {
    if spec.is_empty() {
        return ParsedSpec::Invalid;
    }

    // Split off the fragment first - it is always the tail of the spec.
    let (body, fragment) = match spec.find('#') {
        Some(i) => (&spec[..i], Some(spec[i + 1..].to_string())),
        None => (spec, None),
    };
    if body.is_empty() {
        return ParsedSpec::Invalid;
    }

    // Version heuristic (§4.1, §9): a leading `token@rest` is only treated as
    // a version prefix when `rest` either contains a component/module/family
    // delimiter, or its relative path carries a recognizable extension.
    // Otherwise the `@` is left as a literal character in `relative`.
    let (version, rest) = match body.find('@') {
        Some(i) => {
            let left = &body[..i];
            let right = &body[i + 1..];
            let left_is_plain_token =
                !left.is_empty() && !left.contains([':', '$', '@']);
            if left_is_plain_token && version_split_confirmed(right) {
                (Some(left.to_string()), right)
            } else {
                (None, body)
            }
        }
        None => (None, body),
    };

    // Component/module prefix, restricted to the region before any `$`.
    let prefix_region = match rest.find('$') {
        Some(i) => &rest[..i],
        None => rest,
    };

    let (component, module, after_prefix) =
        if let Some(i) = prefix_region.find("::") {
            (Some(rest[..i].to_string()), Some(ROOT.to_string()), &rest[i + 2..])
        } else if let Some(i1) = prefix_region.find(':') {
            match prefix_region[i1 + 1..].find(':') {
                Some(rel2) => {
                    let i2 = i1 + 1 + rel2;
                    let component = &rest[..i1];
                    let module = &rest[i1 + 1..i2];
                    (
                        (!component.is_empty()).then(|| component.to_string()),
                        (!module.is_empty()).then(|| module.to_string()),
                        &rest[i2 + 1..],
                    )
                }
                // A single colon with no matching second colon is not part
                // of the grammar - this is a structurally invalid spec.
                None => return ParsedSpec::Invalid,
            }
        } else {
            (None, None, rest)
        };

    // Family prefix, recognized only against the permitted set.
    let (family, after_family) = match after_prefix.find('$') {
        Some(i) => {
            let token = &after_prefix[..i];
            match Family::parse(token, permitted) {
                Some(family) => (Some(family), &after_prefix[i + 1..]),
                // Token before `$` isn't a recognized family: the `$` is not
                // a delimiter, it's a literal character in `relative`.
                None => (None, after_prefix),
            }
        }
        None => (None, after_prefix),
    };

    // A second, unconsumed `$` anywhere in what remains is a syntax error.
    if after_family.contains('$') {
        return ParsedSpec::Invalid;
    }
    if after_family.is_empty() {
        return ParsedSpec::Invalid;
    }

    ParsedSpec::Id(ParsedId {
        component,
        version,
        module,
        family,
        relative: after_family.to_string(),
        fragment,
    })
}

/// Returns whether `rest` (the text following a candidate `version@`) confirms
/// the `@` split, per the §9 ambiguity note.
fn version_split_confirmed(rest: &str) -> bool {
    let prefix_region = match rest.find('$') {
        Some(i) => &rest[..i],
        None => rest,
    };
    let has_delimiter = prefix_region.contains(':') || rest.contains('$');
    has_delimiter || has_extension(rest)
}

/// Returns whether the final path segment of `s` carries a dotted extension.
fn has_extension(s: &str) -> bool {
    let last_segment = s.rsplit('/').next().unwrap_or(s);
    matches!(last_segment.rfind('.'), Some(i) if i > 0)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
