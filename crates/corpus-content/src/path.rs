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

//! Output path and public URL computation (§4.3).

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::identity::{Coordinate, Family, ROOT};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Characters percent-encoded in a public URL beyond the control set - a
/// space is the one character a content repository routinely puts in a file
/// name that isn't already URL-safe.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ');

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// How a page's `.html` extension is reflected in its public URL (§6
/// `html_url_extension_style`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionStyle {
    /// The URL keeps the `.html` suffix (`/page.html`).
    #[default]
    Default,
    /// The output file keeps `.html`, but the URL hides it (`/page`).
    Drop,
    /// The page is output as `page/index.html`, so the URL is a clean
    /// directory (`/page/`).
    Indexify,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Where a file is written in the generated site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Out {
    /// Site-relative output path, no leading slash.
    pub path: String,
    /// Output file's base name (last path segment).
    pub base_name: String,
    /// Path from the output file back up to the site root, e.g. `"../../"`.
    pub module_root_path: String,
}

/// A file's public URL, if it is directly publishable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pub {
    /// Site-relative URL, leading slash, percent-encoded.
    pub url: String,
    /// Path from the URL back up to the site root.
    pub root_path: String,
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Computes the output path for a coordinate plus its relative file's stem
/// and extension.
///
/// Only `page` files have their extension rewritten per `style`; every other
/// publishable family (`image`, `attachment`) keeps its original file name.
pub fn compute_out(src: &Coordinate, stem: &str, extname: &str, style: ExtensionStyle) -> Out {
    let mut segments = path_prefix_segments(src);
    if let Some(marker) = family_marker_segment(src.family) {
        segments.push(marker.to_string());
    }
    let (dir, _) = split_relative(&src.relative);
    if !dir.is_empty() {
        segments.push(dir.to_string());
    }

    let base_name = match src.family {
        Family::Page => match style {
            ExtensionStyle::Default | ExtensionStyle::Drop => format!("{stem}.html"),
            ExtensionStyle::Indexify => {
                if stem == "index" {
                    "index.html".to_string()
                } else {
                    segments.push(stem.to_string());
                    "index.html".to_string()
                }
            }
        },
        _ => format!("{stem}{extname}"),
    };

    segments.push(base_name.clone());
    let path = segments.join("/");
    let module_root_path = "../".repeat(segments.len().saturating_sub(1));

    Out { path, base_name, module_root_path }
}

/// Computes the public URL for an output path produced by [`compute_out`],
/// if the family is directly publishable.
///
/// `page`, `image` and `attachment` files publish their own output path
/// (§3). A `nav` file has no output of its own but still publishes the
/// directory URL of the module it belongs to, and a splat alias publishes
/// the directory URL of the version or component it redirects into (§4.3).
/// `partial` and `example` files are only ever referenced through an
/// include and have no `pub` at all.
pub fn compute_pub(out: &Out, family: Family, style: ExtensionStyle) -> Option<Pub> {
    if matches!(family, Family::Nav | Family::Alias) {
        let dir = out.path.strip_suffix(out.base_name.as_str()).unwrap_or(&out.path);
        let url = percent_encode_path(&format!("/{dir}"));
        return Some(Pub { url, root_path: out.module_root_path.clone() });
    }

    if !matches!(family, Family::Page | Family::Image | Family::Attachment) {
        return None;
    }

    let mut url = format!("/{}", out.path);
    let root_path = out.module_root_path.clone();

    if family == Family::Page {
        match style {
            ExtensionStyle::Default => {}
            ExtensionStyle::Drop => {
                url = url.strip_suffix(".html").unwrap_or(&url).to_string();
            }
            ExtensionStyle::Indexify => {
                if let Some(stripped) = url.strip_suffix("index.html") {
                    url = stripped.to_string();
                }
            }
        }
    }

    let url = percent_encode_path(&url);
    Some(Pub { url, root_path })
}

// ----------------------------------------------------------------------------

/// The literal path segment inserted between the module prefix and a
/// relative dirname for families that live under a reserved asset
/// directory in the published site (§4.3).
fn family_marker_segment(family: Family) -> Option<&'static str> {
    match family {
        Family::Image => Some("_images"),
        Family::Attachment => Some("_attachments"),
        _ => None,
    }
}

/// The `component/version[/module]` path prefix shared by output and key
/// computation. `ROOT` is omitted, matching `generate_resource_spec`'s
/// shorthand.
fn path_prefix_segments(src: &Coordinate) -> Vec<String> {
    let mut segments = vec![src.component.clone(), src.version.clone()];
    if src.module != ROOT {
        segments.push(src.module.clone());
    }
    segments
}

/// Splits a relative path into its directory portion (no trailing slash, may
/// be empty) and its file name.
fn split_relative(relative: &str) -> (&str, &str) {
    match relative.rfind('/') {
        Some(i) => (&relative[..i], &relative[i + 1..]),
        None => ("", relative),
    }
}

fn percent_encode_path(url: &str) -> String {
    url.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(module: &str, family: Family, relative: &str) -> Coordinate {
        Coordinate {
            component: "the-component".to_string(),
            version: "1.0".to_string(),
            module: module.to_string(),
            family,
            relative: relative.to_string(),
        }
    }

    #[test]
    fn root_module_is_omitted_from_path() {
        let src = coord(ROOT, Family::Page, "the-page.adoc");
        let out = compute_out(&src, "the-page", ".adoc", ExtensionStyle::Default);
        assert_eq!(out.path, "the-component/1.0/the-page.html");
    }

    #[test]
    fn non_root_module_is_included() {
        let src = coord("module-a", Family::Page, "topic/the-page.adoc");
        let out = compute_out(&src, "the-page", ".adoc", ExtensionStyle::Default);
        assert_eq!(out.path, "the-component/1.0/module-a/topic/the-page.html");
    }

    #[test]
    fn default_style_keeps_html_in_url() {
        let src = coord(ROOT, Family::Page, "the-page.adoc");
        let out = compute_out(&src, "the-page", ".adoc", ExtensionStyle::Default);
        let publ = compute_pub(&out, Family::Page, ExtensionStyle::Default).unwrap();
        assert_eq!(publ.url, "/the-component/1.0/the-page.html");
    }

    #[test]
    fn drop_style_hides_html_from_url_but_not_out_path() {
        let src = coord(ROOT, Family::Page, "the-page.adoc");
        let out = compute_out(&src, "the-page", ".adoc", ExtensionStyle::Drop);
        assert_eq!(out.path, "the-component/1.0/the-page.html");
        let publ = compute_pub(&out, Family::Page, ExtensionStyle::Drop).unwrap();
        assert_eq!(publ.url, "/the-component/1.0/the-page");
    }

    #[test]
    fn indexify_style_makes_a_directory_index() {
        let src = coord(ROOT, Family::Page, "the-page.adoc");
        let out = compute_out(&src, "the-page", ".adoc", ExtensionStyle::Indexify);
        assert_eq!(out.path, "the-component/1.0/the-page/index.html");
        let publ = compute_pub(&out, Family::Page, ExtensionStyle::Indexify).unwrap();
        assert_eq!(publ.url, "/the-component/1.0/the-page/");
    }

    #[test]
    fn indexify_style_leaves_an_already_named_index_page_alone() {
        let src = coord(ROOT, Family::Page, "index.adoc");
        let out = compute_out(&src, "index", ".adoc", ExtensionStyle::Indexify);
        assert_eq!(out.path, "the-component/1.0/index.html");
        let publ = compute_pub(&out, Family::Page, ExtensionStyle::Indexify).unwrap();
        assert_eq!(publ.url, "/the-component/1.0/");
    }

    #[test]
    fn partial_and_example_families_are_not_publishable() {
        let src = coord(ROOT, Family::Partial, "snippet.adoc");
        let out = compute_out(&src, "snippet", ".adoc", ExtensionStyle::Default);
        assert_eq!(compute_pub(&out, Family::Partial, ExtensionStyle::Default), None);
    }

    #[test]
    fn images_and_attachments_keep_their_extension_unchanged() {
        let src = coord(ROOT, Family::Image, "diagram.png");
        let out = compute_out(&src, "diagram", ".png", ExtensionStyle::Indexify);
        assert_eq!(out.path, "the-component/1.0/_images/diagram.png");
        let publ = compute_pub(&out, Family::Image, ExtensionStyle::Indexify).unwrap();
        assert_eq!(publ.url, "/the-component/1.0/_images/diagram.png");
    }

    #[test]
    fn attachments_get_the_attachments_marker_segment() {
        let src = coord(ROOT, Family::Attachment, "archive.zip");
        let out = compute_out(&src, "archive", ".zip", ExtensionStyle::Default);
        assert_eq!(out.path, "the-component/1.0/_attachments/archive.zip");
    }

    #[test]
    fn nav_publishes_the_directory_url_of_its_module() {
        let src = coord(ROOT, Family::Nav, "nav.adoc");
        let out = compute_out(&src, "nav", ".adoc", ExtensionStyle::Default);
        let publ = compute_pub(&out, Family::Nav, ExtensionStyle::Default).unwrap();
        assert_eq!(publ.url, "/the-component/1.0/");
    }

    #[test]
    fn spaces_in_relative_paths_are_percent_encoded() {
        let src = coord(ROOT, Family::Attachment, "my file.pdf");
        let out = compute_out(&src, "my file", ".pdf", ExtensionStyle::Default);
        let publ = compute_pub(&out, Family::Attachment, ExtensionStyle::Default).unwrap();
        assert_eq!(publ.url, "/the-component/1.0/my%20file.pdf");
    }
}
