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

//! Component and component-version records (§3).

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeMap;
use crate::version;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Whether, and how, a component version identifies as a prerelease.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prerelease {
    /// Not a prerelease.
    #[default]
    No,
    /// A prerelease, displayed with no extra label.
    Yes,
    /// A prerelease, displayed with the given label (e.g. `"Beta"`).
    Label(String),
}

impl Prerelease {
    /// Whether this marks the version as a prerelease at all.
    pub fn is_prerelease(&self) -> bool {
        !matches!(self, Prerelease::No)
    }
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// A single version of a component (§3).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentVersion {
    /// Version identifier, e.g. `"2.0"`.
    pub version: String,
    /// Human-facing title for this component version.
    pub title: Option<String>,
    /// Display label shown instead of `version` in version selectors.
    pub display_version: Option<String>,
    /// Prerelease status.
    pub prerelease: Prerelease,
    /// Catalog key of this version's start page, if registered.
    pub start_page: Option<String>,
    /// Catalog keys of this version's nav files, in navigation order.
    pub nav: Vec<String>,
    /// Component-version-scoped AsciiDoc attribute defaults.
    pub attributes: AttributeMap,
    /// Segment this version contributes to its own output path, when it
    /// differs from `version` itself (`latestVersionSegment`, §4.3/§4.4).
    pub version_segment: Option<String>,
    /// Public URL of this version's start page, once resolved (§4.4).
    pub url: Option<String>,
    /// Origins (e.g. git repository URLs) that contributed files to this
    /// version.
    pub origins: Vec<crate::catalog::file::Origin>,
}

impl ComponentVersion {
    /// Whether this version counts as a prerelease for sorting and for
    /// [`Component::latest`] (§4.2: "a prerelease flag overrides suffix
    /// heuristics"; absent an explicit flag, a `-suffix` on the version
    /// string itself still marks it a prerelease).
    pub fn is_effectively_prerelease(&self) -> bool {
        self.prerelease.is_prerelease() || version::Version::parse(&self.version).is_prerelease()
    }

    /// The segment this version actually contributes to output paths:
    /// `version_segment` when set by the version-segment strategy,
    /// otherwise `version` itself.
    pub fn active_version_segment(&self) -> &str {
        self.version_segment.as_deref().unwrap_or(&self.version)
    }
}

/// A component: a named, versioned unit of content (§3).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Component name.
    pub name: String,
    /// Title shown in version/component selectors; defaults to `name`.
    pub title: Option<String>,
    /// Versions, kept sorted descending (§4.2) as they are registered.
    pub versions: Vec<ComponentVersion>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Component {
    /// Returns the version record for `version`, if registered.
    pub fn get(&self, version: &str) -> Option<&ComponentVersion> {
        self.versions.iter().find(|v| v.version == version)
    }

    /// Returns the version record for `version`, if registered, mutably.
    pub fn get_mut(&mut self, version: &str) -> Option<&mut ComponentVersion> {
        self.versions.iter_mut().find(|v| v.version == version)
    }

    /// Inserts `version` at its sorted position, or returns the existing
    /// record if already registered.
    pub fn get_or_insert(&mut self, version: &str) -> &mut ComponentVersion {
        if self.get(version).is_none() {
            let versions: Vec<String> =
                self.versions.iter().map(|v| v.version.clone()).collect();
            let at = version::insertion_point(&versions, version);
            self.versions.insert(
                at,
                ComponentVersion { version: version.to_string(), ..Default::default() },
            );
        }
        self.get_mut(version).expect("just inserted")
    }

    /// Latest release version, computed live from the sorted version list
    /// rather than cached, per §9's design note against redundant state.
    pub fn latest(&self) -> Option<&ComponentVersion> {
        self.versions.iter().find(|v| !v.is_effectively_prerelease()).or_else(|| self.versions.first())
    }

    /// Latest version including prereleases, computed live.
    pub fn latest_prerelease(&self) -> Option<&ComponentVersion> {
        self.versions.first()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn version(v: &str) -> ComponentVersion {
        ComponentVersion { version: v.to_string(), ..Default::default() }
    }

    #[test]
    fn latest_skips_versions_with_a_prerelease_suffix() {
        let mut component = Component { name: "comp".to_string(), ..Default::default() };
        for v in ["6.0.0-SNAPSHOT", "5.8.1-SNAPSHOT", "5.8.0", "5.7.2-SNAPSHOT"] {
            component.get_or_insert(v);
        }
        assert_eq!(component.latest().unwrap().version, "5.8.0");
    }

    #[test]
    fn latest_skips_an_explicit_prerelease_flag_even_without_a_suffix() {
        let mut component = Component { name: "comp".to_string(), ..Default::default() };
        component.get_or_insert("2.0");
        component.get_or_insert("1.0");
        component.get_mut("2.0").unwrap().prerelease = Prerelease::Yes;
        assert_eq!(component.latest().unwrap().version, "1.0");
    }

    #[test]
    fn latest_falls_back_to_the_first_version_when_all_are_prereleases() {
        let mut component = Component { name: "comp".to_string(), ..Default::default() };
        component.get_or_insert("2.0-beta");
        component.get_or_insert("1.0-beta");
        assert_eq!(component.latest().unwrap().version, "2.0-beta");
    }

    #[test]
    fn is_effectively_prerelease_ors_the_flag_with_the_suffix_heuristic() {
        assert!(version("1.0-SNAPSHOT").is_effectively_prerelease());
        let mut flagged = version("1.0");
        flagged.prerelease = Prerelease::Yes;
        assert!(flagged.is_effectively_prerelease());
        assert!(!version("1.0").is_effectively_prerelease());
    }
}
