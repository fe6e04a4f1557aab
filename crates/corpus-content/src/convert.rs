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

//! The Document Converter driver (§4.8): walks every publishable page once,
//! forward, converting AsciiDoc sources to embeddable HTML through a
//! [`MarkupEngine`].

use crate::catalog::error::Result;
use crate::catalog::file::AsciiDocMeta;
use crate::catalog::Catalog;
use crate::identity::{self, Coordinate, Family, ParsedSpec};
use crate::markup::{MarkupAdapter, MarkupEngine};
use crate::playbook::Playbook;
use crate::diagnostic::Logger;

const ASCIIDOC_MEDIA_TYPE: &str = "text/asciidoc";
const HTML_MEDIA_TYPE: &str = "text/html";

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Converts every `text/asciidoc` page in `catalog`, in key order (§5: "a
/// strict forward walk through `getPages()` so that a page can only include
/// pages converted earlier in the same walk").
///
/// Non-AsciiDoc pages are left untouched (§4.8 step 3). Source bytes are
/// dropped from each page after conversion unless `playbook.keep_source` is
/// set (§4.8 step 4).
pub fn convert_all(
    catalog: &mut Catalog, playbook: &Playbook, engine: &dyn MarkupEngine, logger: &mut dyn Logger,
) -> Result<()> {
    let coordinates: Vec<Coordinate> =
        catalog.get_pages().iter().map(|f| f.src.coordinate.clone()).collect();

    for coordinate in coordinates {
        convert_one(catalog, playbook, engine, &coordinate, logger)?;
    }

    Ok(())
}

fn convert_one(
    catalog: &mut Catalog, playbook: &Playbook, engine: &dyn MarkupEngine, coordinate: &Coordinate,
    logger: &mut dyn Logger,
) -> Result<()> {
    let Some(page) = catalog.get_by_id(coordinate) else { return Ok(()) };
    if page.src.media_type != ASCIIDOC_MEDIA_TYPE {
        return Ok(());
    }
    let source = page.contents_str().into_owned();
    let page_key = page.key();
    let page_path = page.path.clone();

    let output = {
        let mut adapter = MarkupAdapter::new(catalog, playbook, coordinate.clone(), page_path, logger);
        engine.convert(&source, &mut adapter)
    };

    for spec in &output.page_aliases {
        if let Some(alias_coordinate) = alias_coordinate(coordinate, spec) {
            catalog.register_page_alias(alias_coordinate, page_key.clone())?;
        }
    }

    if let Some(page) = catalog.get_mut_by_id(coordinate) {
        page.asciidoc =
            Some(AsciiDocMeta { attributes: output.attributes, doctitle: output.doctitle });
        page.contents = output.html.into_bytes();
        page.src.media_type = HTML_MEDIA_TYPE.to_string();
    }

    Ok(())
}

/// Resolves one `page-aliases` resource spec against the converted page's
/// own coordinate, filling in unspecified component/version/module (§4.7:
/// aliases are "registered via `catalog.registerPageAlias`").
fn alias_coordinate(page: &Coordinate, spec: &str) -> Option<Coordinate> {
    match identity::parse(spec, Some(&[Family::Page])) {
        ParsedSpec::Invalid => None,
        ParsedSpec::Id(id) => Some(Coordinate {
            component: id.component.unwrap_or_else(|| page.component.clone()),
            version: id.version.unwrap_or_else(|| page.version.clone()),
            module: id.module.unwrap_or_else(|| page.module.clone()),
            family: Family::Page,
            relative: id.relative,
        }),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
