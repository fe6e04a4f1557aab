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

//! Descending version comparator (§4.2).
//!
//! Component versions are free-form strings, not necessarily semver: a
//! component can mix `"5.8.0"`, `"6.0.0-SNAPSHOT"` and `"edge"` in the same
//! version list. The comparator tokenizes the dotted core of each version and
//! falls back to plain string comparison wherever a segment isn't numeric, so
//! arbitrary tags still sort (consistently, if not meaningfully) against
//! numeric ones.

use std::cmp::Ordering;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// A parsed version, retaining the original string for display and lookup.
#[derive(Clone, Debug)]
pub struct Version<'a> {
    raw: &'a str,
    core: Vec<Segment<'a>>,
    prerelease: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment<'a> {
    Number(u64),
    Text(&'a str),
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> Version<'a> {
    /// Parses a version string.
    ///
    /// The core is everything before the first `-`; anything after is the
    /// prerelease tag. The core is split on `.` and each segment is parsed as
    /// a number when possible.
    pub fn parse(raw: &'a str) -> Self {
        let (core_str, prerelease) = match raw.find('-') {
            Some(i) => (&raw[..i], Some(&raw[i + 1..])),
            None => (raw, None),
        };
        let core = core_str
            .split('.')
            .map(|segment| match segment.parse::<u64>() {
                Ok(n) => Segment::Number(n),
                Err(_) => Segment::Text(segment),
            })
            .collect();
        Version { raw, core, prerelease }
    }

    /// The original version string.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Whether this version carries a prerelease tag (e.g. `-SNAPSHOT`).
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Compares two versions, ascending (release order, oldest first).
    ///
    /// Numeric core segments compare numerically; a non-numeric segment
    /// always outranks a numeric one at the same position (§4.2: non-semantic
    /// tokens sort above all semantic ones). A shorter core is treated as
    /// though padded with zero segments, matching the usual `1.2` == `1.2.0`
    /// rule. When cores are equal, a release (no prerelease tag) outranks a
    /// prerelease of the same core; among two prereleases, the tag text is
    /// compared lexically as a tiebreaker.
    pub fn compare_ascending(&self, other: &Self) -> Ordering {
        let len = self.core.len().max(other.core.len());
        for i in 0..len {
            let a = self.core.get(i);
            let b = other.core.get(i);
            let ord = match (a, b) {
                (Some(Segment::Number(x)), Some(Segment::Number(y))) => x.cmp(y),
                (Some(Segment::Number(_)), Some(Segment::Text(_))) => Ordering::Less,
                (Some(Segment::Text(_)), Some(Segment::Number(_))) => Ordering::Greater,
                (Some(Segment::Text(x)), Some(Segment::Text(y))) => x.cmp(y),
                (Some(Segment::Number(x)), None) => x.cmp(&0),
                (None, Some(Segment::Number(y))) => 0.cmp(y),
                (Some(Segment::Text(_)), None) => Ordering::Greater,
                (None, Some(Segment::Text(_))) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        match (self.prerelease, other.prerelease) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => x.cmp(y),
        }
    }

    /// Compares two versions, descending (the catalog's canonical order —
    /// newest first).
    pub fn compare_descending(&self, other: &Self) -> Ordering {
        self.compare_ascending(other).reverse()
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Sorts version strings in descending (newest-first) order, the catalog's
/// canonical order for a component's version list.
pub fn sort_descending(versions: &mut [String]) {
    versions.sort_by(|a, b| Version::parse(a).compare_descending(&Version::parse(b)));
}

/// Finds the index at which `new` should be inserted into `versions`, which
/// must already be sorted descending, preserving that order.
///
/// Used by `Catalog::register_component_version` so adding one version to an
/// existing component doesn't require re-sorting the whole list.
pub fn insertion_point(versions: &[String], new: &str) -> usize {
    let new_version = Version::parse(new);
    versions
        .partition_point(|existing| Version::parse(existing).compare_descending(&new_version) != Ordering::Greater)
}

/// Inserts `new` into `versions` (sorted descending), preserving order.
pub fn insert_sorted(versions: &mut Vec<String>, new: String) {
    let at = insertion_point(versions, &new);
    versions.insert(at, new);
}

/// Returns the latest *release* version (excluding prereleases), if any.
pub fn latest<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .filter(|v| !Version::parse(v).is_prerelease())
        .max_by(|a, b| Version::parse(a).compare_ascending(&Version::parse(b)))
}

/// Returns the latest version including prereleases, if any.
pub fn latest_prerelease<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .max_by(|a, b| Version::parse(a).compare_ascending(&Version::parse(b)))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
