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

//! The catalog's file record (§3).

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeMap;
use crate::identity::Coordinate;
use crate::path::{Out, Pub};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Where a file originated: a git worktree, or nothing (a synthetic file).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Repository URL the file's content came from.
    pub url: Option<String>,
    /// Start path within the repository the component version was aggregated
    /// from.
    pub start_path: Option<String>,
    /// Repository ref (branch or tag) the content was read from.
    pub refname: Option<String>,
}

/// The resource coordinate of a file, plus the path pieces derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Src {
    /// Resource coordinate (component/version/module/family/relative).
    pub coordinate: Coordinate,
    /// File name, last path segment of `relative`.
    pub basename: String,
    /// `basename` without its extension.
    pub stem: String,
    /// `basename`'s extension, including the leading dot (may be empty).
    pub extname: String,
    /// Guessed media type, from `extname`.
    pub media_type: String,
    /// Path from this file back up to the module root, e.g. `"../../"`.
    pub module_root_path: String,
    /// Where the file's content came from; `None` for synthetic files.
    pub origin: Option<Origin>,
    /// Absolute file system path content was read from, if applicable.
    pub abspath: Option<String>,
}

/// A page's extracted AsciiDoc front matter (§4.8).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsciiDocMeta {
    /// Document attributes, merged from component-version defaults and the
    /// page's own header.
    pub attributes: AttributeMap,
    /// Document title, extracted from the converted document.
    pub doctitle: Option<String>,
}

/// A nav file's position within its component version's navigation list
/// (§4.5 step 7); only set on files with `family == Family::Nav`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavAssignment {
    /// Zero-based position among the component version's nav files, in
    /// registration order.
    pub order: u32,
}

/// A file in the content catalog (§3).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Virtual path used to address the file in its content source.
    pub path: String,
    /// Raw file content.
    pub contents: Vec<u8>,
    /// Resource identity and derived path pieces.
    pub src: Src,
    /// Where the file is written in the generated site, if it is ever
    /// written there at all (partials and examples never are).
    pub out: Option<Out>,
    /// Public URL, if the file is directly publishable.
    pub publish: Option<Pub>,
    /// For an `alias` family file, the key of the file it redirects to.
    pub alias_target: Option<String>,
    /// Whether this alias is a splat alias (matches any relative path under
    /// its module rather than one fixed path). Splat aliases are the one
    /// case where an alias may point at another alias (§3).
    pub is_splat: bool,
    /// Whether the pipeline synthesized this file (a start-page alias, a
    /// generated 404 page) rather than reading it from a content source.
    pub synthetic: bool,
    /// Nav-file ordering; only set when `src.coordinate.family` is `Nav`.
    pub nav: Option<NavAssignment>,
    /// Extracted AsciiDoc metadata; only set on converted `page` files.
    pub asciidoc: Option<AsciiDocMeta>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl File {
    /// The file's canonical catalog key.
    pub fn key(&self) -> String {
        crate::identity::generate_key(&self.src.coordinate)
    }

    /// Returns the file's text content as UTF-8, lossily if it isn't valid.
    pub fn contents_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.contents)
    }
}
