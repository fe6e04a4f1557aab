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

//! URL relativization for resolved cross-references (§4.7,
//! `relativize_resource_refs`).

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Computes `to_url` relative to `from_url`, both site-root-absolute URLs.
///
/// Splits off a `#fragment` before computing the path, then re-attaches it -
/// when the computed relative path collapses to nothing (linking a page to
/// itself, fragment only), the result is just `#fragment`.
pub fn relative_url(from_url: &str, to_url: &str) -> String {
    let (to_path, to_fragment) = match to_url.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (to_url, None),
    };

    let mut rel_path = relative_path(from_url, to_path);

    if let Some(fragment) = to_fragment {
        if rel_path.is_empty() {
            return format!("#{fragment}");
        }
        rel_path.push('#');
        rel_path.push_str(fragment);
    }

    rel_path
}

/// Computes the path from `from_url` to `to_path`, both absolute
/// (leading-slash) URLs with no fragment.
///
/// `from_url` is treated as a page address: its last segment is the page
/// itself, not a directory, so the walk starts from its parent directory -
/// matching ordinary browser-relative-link resolution.
fn relative_path(from_url: &str, to_path: &str) -> String {
    let from_segments: Vec<&str> = from_url.trim_start_matches('/').split('/').collect();
    let from_dir = &from_segments[..from_segments.len().saturating_sub(1)];
    let to_segments: Vec<&str> =
        to_path.trim_start_matches('/').split('/').filter(|s| !s.is_empty()).collect();

    let common = from_dir.iter().zip(to_segments.iter()).take_while(|(a, b)| a == b).count();

    let up = from_dir.len() - common;
    let mut parts: Vec<&str> = std::iter::repeat("..").take(up).collect();
    parts.extend(&to_segments[common..]);

    if parts.is_empty() {
        String::new()
    } else {
        parts.join("/")
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
