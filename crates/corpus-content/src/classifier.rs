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

//! The Classifier (§4.5): turns an aggregated bucket of raw files into
//! catalog entries, by module/family path shape.

use ahash::AHashMap;

use crate::attribute::AttributeMap;
use crate::catalog::error::Result as CatalogResult;
use crate::catalog::file::{File, Origin, Src};
use crate::catalog::Catalog;
use crate::diagnostic::{Diagnostic, Logger, Severity};
use crate::identity::{Coordinate, Family, PermittedFamilies, ROOT};
use crate::path::{self, ExtensionStyle};
use crate::resolver::{self, Context, Resolved};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// One raw file as handed over by aggregation, before classification.
#[derive(Clone, Debug)]
pub struct AggregateFile {
    /// Path relative to the bucket's content root.
    pub path: String,
    /// Raw file content.
    pub contents: Vec<u8>,
    /// Where this bucket's content came from.
    pub origin: Option<Origin>,
    /// File system path content was read from, if applicable.
    pub abspath: Option<String>,
}

/// All the files aggregated for one component version.
#[derive(Clone, Debug, Default)]
pub struct Bucket {
    /// Component name.
    pub component: String,
    /// Component version.
    pub version: String,
    /// Files belonging to this component version.
    pub files: Vec<AggregateFile>,
    /// Resource specs of this version's nav files, in navigation order
    /// (the component descriptor's own `nav` list, §4.5 step 6).
    pub nav: Vec<String>,
    /// Resource spec of this version's start page, if declared (§4.4,
    /// §4.5 step 6).
    pub start_page: Option<String>,
    /// Component-version-scoped AsciiDoc attribute defaults, merged over
    /// the site-wide defaults (§4.5 step 1).
    pub asciidoc: AttributeMap,
    /// Content origins contributing files to this version.
    pub origins: Vec<Origin>,
}

/// Tracks, per content origin, whether bare top-level `pages/`,
/// `partials/`, etc. directories (with no `modules/` prefix) are still
/// treated as belonging to the implicit `ROOT` module.
///
/// A bucket whose origin this registry has already seen a `modules/ROOT/`
/// path for loses implicit-root treatment permanently (§4.5 step 3: "for all
/// buckets sharing it"), since multiple component versions routinely share
/// one repository origin.
#[derive(Debug, Default)]
pub struct ImplicitRootRegistry(AHashMap<String, bool>);

impl ImplicitRootRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Classifies every file in `bucket` and inserts it into `catalog`.
///
/// `site_asciidoc` is the site-wide AsciiDoc attribute defaults; the
/// bucket's own `asciidoc` map is merged on top, component-version
/// attributes winning over site ones (§4.5 step 1). After every file is
/// classified, the bucket's declared start page and nav entries are
/// resolved and registered (§4.5 step 6/7).
pub fn classify(
    catalog: &mut Catalog, bucket: Bucket, registry: &mut ImplicitRootRegistry,
    style: ExtensionStyle, site_asciidoc: &AttributeMap, logger: &mut dyn Logger,
) -> CatalogResult<()> {
    {
        let cv = catalog.register_component_version(&bucket.component, &bucket.version);
        for (k, v) in site_asciidoc {
            cv.attributes.entry(k.clone()).or_insert_with(|| v.clone());
        }
        for (k, v) in &bucket.asciidoc {
            cv.attributes.insert(k.clone(), v.clone());
        }
        cv.origins.extend(bucket.origins.iter().cloned());
    }

    let origin_key = bucket.files.first().map(|f| origin_key(&f.origin)).unwrap_or_default();
    let has_explicit_root =
        bucket.files.iter().any(|f| module_segment(&f.path).map(|(m, _)| m) == Some("ROOT"));
    if has_explicit_root {
        registry.0.insert(origin_key.clone(), false);
    }
    let implicit_allowed = !has_explicit_root && *registry.0.entry(origin_key).or_insert(true);

    for file in bucket.files {
        let Some((module, family, relative)) = classify_path(&file.path, implicit_allowed) else {
            logger.log(
                Diagnostic::new(
                    Severity::Warn,
                    "unrecognized-file-shape",
                    format!("file does not match any recognized module layout: {}", file.path),
                )
                .at(file.path.clone(), None),
            );
            continue;
        };

        if family == Family::Nav && relative.contains('/') {
            logger.log(
                Diagnostic::new(
                    Severity::Warn,
                    "nested-nav-file",
                    "nav files nested under a subdirectory are unconventional",
                )
                .at(file.path.clone(), None),
            );
        }

        let coordinate = Coordinate {
            component: bucket.component.clone(),
            version: bucket.version.clone(),
            module: module.to_string(),
            family,
            relative: relative.to_string(),
        };

        let (basename, stem, extname) = split_basename(&relative);
        let out = path::compute_out(&coordinate, &stem, &extname, style);
        let publish = path::compute_pub(&out, family, style);

        catalog.add_file(File {
            path: file.path,
            contents: file.contents,
            src: Src {
                coordinate,
                basename,
                stem,
                extname: extname.clone(),
                media_type: media_type_for(&extname).to_string(),
                module_root_path: out.module_root_path.clone(),
                origin: file.origin,
                abspath: file.abspath,
            },
            out: Some(out),
            publish,
            alias_target: None,
            is_splat: false,
            synthetic: false,
            nav: None,
            asciidoc: None,
        })?;
    }

    if let Some(spec) = &bucket.start_page {
        catalog.register_component_version_start_page(&bucket.component, &bucket.version, spec, logger);
    }

    if !bucket.nav.is_empty() {
        let ctx = Context::new(
            Coordinate {
                component: bucket.component.clone(),
                version: bucket.version.clone(),
                module: ROOT.to_string(),
                family: Family::Nav,
                relative: String::new(),
            },
            String::new(),
        );
        for spec in &bucket.nav {
            let resolved = resolver::resolve(catalog, spec, &ctx, Family::Nav, PermittedFamilies(&[Family::Nav]));
            if !matches!(resolved, Resolved::Found(_)) {
                logger.log(Diagnostic::new(
                    Severity::Warn,
                    "unmatched-nav-entry",
                    format!("nav entry does not resolve to a registered file: {spec}"),
                ));
            }
        }
    }

    Ok(())
}

// ----------------------------------------------------------------------------

fn origin_key(origin: &Option<Origin>) -> String {
    origin
        .as_ref()
        .and_then(|o| o.url.clone())
        .or_else(|| origin.as_ref().and_then(|o| o.start_path.clone()))
        .unwrap_or_default()
}

/// Splits a `modules/<name>/...` prefix off `path`, returning the module
/// name and the remainder (which may be empty).
fn module_segment(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix("modules/")?;
    match rest.find('/') {
        Some(i) => Some((&rest[..i], &rest[i + 1..])),
        None => Some((rest, "")),
    }
}

/// Classifies a raw path into `(module, family, relative)`, per the family
/// directory layout (§6): `pages/`, `partials/`, `examples/`, `images/`,
/// `attachments/` under a module, plus a module-root `nav.adoc`.
fn classify_path(path: &str, implicit_allowed: bool) -> Option<(&str, Family, &str)> {
    if let Some((module, rest)) = module_segment(path) {
        classify_family_shaped(rest).map(|(family, relative)| (module, family, relative))
    } else if implicit_allowed {
        classify_family_shaped(path).map(|(family, relative)| (ROOT, family, relative))
    } else {
        None
    }
}

fn classify_family_shaped(rest: &str) -> Option<(Family, &str)> {
    if rest == "nav.adoc" {
        return Some((Family::Nav, rest));
    }

    // Deprecated/legacy locations (§6) are checked ahead of the general
    // shapes below, since they'd otherwise be swallowed by the `pages/`
    // and `assets/` prefixes with the wrong family.
    if let Some(relative) = rest.strip_prefix("pages/_partials/") {
        if !relative.is_empty() {
            return Some((Family::Partial, relative));
        }
    }
    if let Some(relative) = rest.strip_prefix("assets/images/") {
        if !relative.is_empty() {
            return Some((Family::Image, relative));
        }
    }
    if let Some(relative) = rest.strip_prefix("assets/attachments/") {
        if !relative.is_empty() {
            return Some((Family::Attachment, relative));
        }
    }

    for (prefix, family) in [
        ("pages/", Family::Page),
        ("partials/", Family::Partial),
        ("examples/", Family::Example),
        ("images/", Family::Image),
        ("attachments/", Family::Attachment),
    ] {
        if let Some(relative) = rest.strip_prefix(prefix) {
            if relative.is_empty() {
                return None;
            }
            // A non-.adoc file under pages/ isn't a page at all (§4.5).
            if family == Family::Page && !(relative.ends_with(".adoc") || relative.ends_with(".asciidoc")) {
                return None;
            }
            return Some((family, relative));
        }
    }
    None
}

fn split_basename(relative: &str) -> (String, String, String) {
    let basename = relative.rsplit('/').next().unwrap_or(relative).to_string();
    match basename.rfind('.') {
        Some(i) if i > 0 => (basename.clone(), basename[..i].to_string(), basename[i..].to_string()),
        _ => (basename.clone(), basename, String::new()),
    }
}

fn media_type_for(extname: &str) -> &'static str {
    match extname {
        ".adoc" | ".asciidoc" => "text/asciidoc",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".svg" => "image/svg+xml",
        ".pdf" => "application/pdf",
        ".txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
