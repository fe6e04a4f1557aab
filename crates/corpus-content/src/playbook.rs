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

//! The slice of playbook configuration this crate consumes (§6).
//!
//! Playbook *schema validation* and everything else a playbook document
//! carries (sources, UI bundle, output, runtime) are out of scope; an
//! embedding CLI hands this crate only the fields below, already parsed.

use serde::{Deserialize, Serialize};

use crate::diagnostic::Severity;
use crate::path::ExtensionStyle;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// How a latest-version splat alias redirect is implemented (§6
/// `urls.redirect_facility`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedirectFacility {
    /// Redirect pages are written as static HTML files.
    #[default]
    Static,
    /// Redirects are left for a host web server to serve (e.g. an nginx
    /// rewrite map); this crate only records the mapping.
    Nginx,
}

/// Which version a `latestVersionSegment`-style alias should track (§6
/// `urls.latest_version_segment_strategy`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionSegmentStrategy {
    /// Replace the version segment of the latest release version's URLs.
    #[default]
    ReplaceVersion,
    /// Redirect from the segment to the latest release version.
    RedirectToLatest,
    /// Redirect from the latest release version to the segment.
    RedirectFromLatest,
}

/// What to substitute when an `{attribute}` reference cannot be resolved
/// (§4.5 step 1, §6 `asciidoc.attributes.attribute_missing`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeMissing {
    /// Leave a placeholder marker in place of the reference.
    #[default]
    Skip,
    /// Drop the reference, leaving nothing.
    Drop,
    /// Drop the entire line the reference appeared on.
    DropLine,
    /// Substitute the literal text `"drop"`.
    Warn,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// The playbook fields this crate's operations read (§6).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab_case", default)]
pub struct Playbook {
    /// How a page's `.html` extension is reflected in its public URL.
    pub html_url_extension_style: ExtensionStyle,
    /// How a latest-version redirect is implemented.
    pub redirect_facility: RedirectFacility,
    /// URL segment standing in for the latest release version, if any
    /// (e.g. `"latest"`).
    pub latest_version_segment: Option<String>,
    /// URL segment standing in for the latest version including
    /// prereleases, if any.
    pub latest_prerelease_version_segment: Option<String>,
    /// Which version a `latest_version_segment`-style alias tracks.
    pub latest_version_segment_strategy: VersionSegmentStrategy,
    /// Whether cross-reference URLs in converted HTML are written relative
    /// to the referencing page rather than site-root-absolute.
    pub relativize_resource_refs: bool,
    /// Whether original AsciiDoc source files are also published alongside
    /// their converted HTML.
    pub keep_source: bool,
    /// Maximum include nesting depth before `MaxIncludeDepthExceeded` (§7).
    pub max_include_depth: u32,
    /// What to substitute for an unresolved `{attribute}` reference.
    pub attribute_missing: AttributeMissing,
    /// Severity at and above which a run is considered failed.
    pub failure_level: Severity,
}

impl Default for Playbook {
    fn default() -> Self {
        Playbook {
            html_url_extension_style: ExtensionStyle::default(),
            redirect_facility: RedirectFacility::default(),
            latest_version_segment: None,
            latest_prerelease_version_segment: None,
            latest_version_segment_strategy: VersionSegmentStrategy::default(),
            relativize_resource_refs: false,
            keep_source: false,
            max_include_depth: 64,
            attribute_missing: AttributeMissing::default(),
            failure_level: Severity::Error,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
