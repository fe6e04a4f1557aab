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

//! End-to-end pipeline scenarios: aggregation through the Classifier, the
//! Resource Resolver and the Document Converter, driven by a minimal
//! directive-recognizing stand-in for a real AsciiDoc engine (that engine
//! itself is out of scope - this only has to call back into the three
//! `MarkupAdapter` hooks the way a real one would).

use std::sync::LazyLock;

use regex::Regex;

use corpus_content::attribute::AttributeMap;
use corpus_content::catalog::component::Prerelease;
use corpus_content::catalog::Catalog;
use corpus_content::classifier::{self, AggregateFile, Bucket, ImplicitRootRegistry};
use corpus_content::convert;
use corpus_content::diagnostic::VecLogger;
use corpus_content::identity::{self, Coordinate, Family, ROOT};
use corpus_content::markup::tags::{parse_line_ranges, parse_tag_selectors};
use corpus_content::markup::{ConversionOutput, IncludeRequest, MarkupAdapter, MarkupEngine};
use corpus_content::path::ExtensionStyle;
use corpus_content::playbook::Playbook;

// ----------------------------------------------------------------------------
// A minimal stand-in AsciiDoc engine
// ----------------------------------------------------------------------------

static INCLUDE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"include::([^\[]+)\[([^\]]*)\]").unwrap());
static XREF_MACRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"xref:([^\[]+)\[([^\]]*)\]").unwrap());
static IMAGE_MACRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"image::([^\[]+)\[([^\]]*)\]").unwrap());

struct AdocEngine;

impl MarkupEngine for AdocEngine {
    fn convert(&self, source: &str, adapter: &mut MarkupAdapter<'_>) -> ConversionOutput {
        ConversionOutput {
            html: render(source, adapter),
            doctitle: extract_doctitle(source),
            attributes: Default::default(),
            page_aliases: extract_aliases(source),
        }
    }
}

fn render(source: &str, adapter: &mut MarkupAdapter<'_>) -> String {
    let mut out = String::new();
    for line in source.lines() {
        if let Some(caps) = INCLUDE_DIRECTIVE.captures(line) {
            if caps[0].trim() == line.trim() {
                let (lines, tags) = parse_directive_attrs(&caps[2]);
                let request = IncludeRequest {
                    target: caps[1].to_string(),
                    raw: caps[0].to_string(),
                    optional: caps[2].split(',').map(str::trim).any(|p| p == "opts=optional"),
                    lines: lines.map(|v| parse_line_ranges(&v)),
                    tags: tags.map(|v| parse_tag_selectors(&v)),
                };
                if let Some(resolution) = adapter.include(&request) {
                    let body = adapter.with_nested(&resolution, |nested| render(&resolution.content, nested));
                    out.push_str(&body);
                    out.push('\n');
                }
                continue;
            }
        }
        let with_xrefs = replace_xrefs(line, adapter);
        let with_images = replace_images(&with_xrefs, adapter);
        out.push_str(&with_images);
        out.push('\n');
    }
    out
}

fn replace_xrefs(line: &str, adapter: &mut MarkupAdapter<'_>) -> String {
    let mut out = String::new();
    let mut last = 0;
    for caps in XREF_MACRO.captures_iter(line) {
        let whole = caps.get(0).unwrap();
        out.push_str(&line[last..whole.start()]);
        let link = adapter.xref(&caps[1]);
        let text = if caps[2].is_empty() { link.text.unwrap_or_else(|| caps[1].to_string()) } else { caps[2].to_string() };
        out.push_str(&format!("<a href=\"{}\">{text}</a>", link.href));
        last = whole.end();
    }
    out.push_str(&line[last..]);
    out
}

fn replace_images(line: &str, adapter: &mut MarkupAdapter<'_>) -> String {
    let mut out = String::new();
    let mut last = 0;
    for caps in IMAGE_MACRO.captures_iter(line) {
        let whole = caps.get(0).unwrap();
        out.push_str(&line[last..whole.start()]);
        let link = adapter.image(&caps[1]);
        out.push_str(&format!("<img src=\"{}\" alt=\"{}\"/>", link.href, &caps[2]));
        last = whole.end();
    }
    out.push_str(&line[last..]);
    out
}

fn parse_directive_attrs(attrs: &str) -> (Option<String>, Option<String>) {
    let mut lines = None;
    let mut tags = None;
    for part in attrs.split(',').map(str::trim) {
        if let Some(v) = part.strip_prefix("lines=") {
            lines = Some(v.to_string());
        } else if let Some(v) = part.strip_prefix("tags=").or_else(|| part.strip_prefix("tag=")) {
            tags = Some(v.to_string());
        }
    }
    (lines, tags)
}

fn extract_doctitle(source: &str) -> Option<String> {
    source.lines().find_map(|l| l.strip_prefix("= ").map(str::trim).map(str::to_string))
}

fn extract_aliases(source: &str) -> Vec<String> {
    source
        .lines()
        .find_map(|l| l.strip_prefix(":page-aliases:"))
        .map(|v| v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default()
}

// ----------------------------------------------------------------------------
// Fixtures
// ----------------------------------------------------------------------------

fn aggregate(path: &str, contents: &str) -> AggregateFile {
    AggregateFile { path: path.to_string(), contents: contents.as_bytes().to_vec(), origin: None, abspath: None }
}

fn ingest(catalog: &mut Catalog, component: &str, version: &str, files: Vec<AggregateFile>) {
    let mut registry = ImplicitRootRegistry::new();
    let mut logger = VecLogger::default();
    let bucket =
        Bucket { component: component.to_string(), version: version.to_string(), files, ..Default::default() };
    classifier::classify(
        catalog,
        bucket,
        &mut registry,
        ExtensionStyle::Default,
        &AttributeMap::new(),
        &mut logger,
    )
    .unwrap();
    assert!(logger.diagnostics().is_empty(), "unexpected diagnostics: {:?}", logger.diagnostics());
}

fn page_coordinate(component: &str, version: &str, relative: &str) -> Coordinate {
    Coordinate {
        component: component.to_string(),
        version: version.to_string(),
        module: ROOT.to_string(),
        family: Family::Page,
        relative: relative.to_string(),
    }
}

// ----------------------------------------------------------------------------
// Scenario 1: classify, then link two pages by xref
// ----------------------------------------------------------------------------

#[test]
fn scenario_classify_and_link_resolves_an_xref_to_a_relative_url() {
    let mut catalog = Catalog::new();
    ingest(
        &mut catalog,
        "docs",
        "1.0",
        vec![
            aggregate("modules/ROOT/pages/a-target.adoc", "= Target Page\n\ncontent here.\n"),
            aggregate(
                "modules/ROOT/pages/b-index.adoc",
                "= Home\n\nSee xref:a-target.adoc[].\n",
            ),
        ],
    );

    let mut playbook = Playbook::default();
    playbook.relativize_resource_refs = true;
    let mut logger = VecLogger::default();
    convert::convert_all(&mut catalog, &playbook, &AdocEngine, &mut logger).unwrap();
    assert!(logger.diagnostics().is_empty());

    let index = catalog.get_by_id(&page_coordinate("docs", "1.0", "b-index.adoc")).unwrap();
    assert_eq!(index.contents_str().trim_end(), "= Home\n\nSee <a href=\"a-target.html\">Target Page</a>.");

    let target = catalog.get_by_id(&page_coordinate("docs", "1.0", "a-target.adoc")).unwrap();
    assert_eq!(target.publish.as_ref().unwrap().url, "/docs/1.0/a-target.html");
}

// ----------------------------------------------------------------------------
// Scenario 2: version sorting mixes semantic and prerelease tokens
// ----------------------------------------------------------------------------

#[test]
fn scenario_component_latest_skips_prerelease_noise() {
    let mut catalog = Catalog::new();
    for version in ["5.7.1", "5.8.1-SNAPSHOT", "5.8.0", "5.7.2-SNAPSHOT", "6.0.0-SNAPSHOT"] {
        ingest(&mut catalog, "runtime", version, vec![]);
    }

    let component = catalog.get_components().into_iter().find(|c| c.name == "runtime").unwrap();
    assert_eq!(component.latest().unwrap().version, "5.8.0");
    assert_eq!(component.latest_prerelease().unwrap().version, "6.0.0-SNAPSHOT");
    assert_eq!(component.versions.first().unwrap().version, "6.0.0-SNAPSHOT");
}

// ----------------------------------------------------------------------------
// Scenario 3: tag filtering through an include
// ----------------------------------------------------------------------------

#[test]
fn scenario_tag_filter_keeps_only_the_selected_region() {
    let mut catalog = Catalog::new();
    ingest(
        &mut catalog,
        "docs",
        "1.0",
        vec![
            aggregate(
                "modules/ROOT/partials/snippet.adoc",
                "// tag::keep[]\nkept line\n// end::keep[]\n// tag::drop[]\ndropped line\n// end::drop[]\n",
            ),
            aggregate(
                "modules/ROOT/pages/index.adoc",
                "= Home\n\ninclude::snippet.adoc[tag=keep]\n",
            ),
        ],
    );

    let playbook = Playbook::default();
    let mut logger = VecLogger::default();
    convert::convert_all(&mut catalog, &playbook, &AdocEngine, &mut logger).unwrap();
    assert!(logger.diagnostics().is_empty());

    let index = catalog.get_by_id(&page_coordinate("docs", "1.0", "index.adoc")).unwrap();
    let html = index.contents_str();
    assert!(html.contains("kept line"));
    assert!(!html.contains("dropped line"));
}

// ----------------------------------------------------------------------------
// Scenario 4: nested include across components switches the current context
// ----------------------------------------------------------------------------

#[test]
fn scenario_nested_include_across_components_resolves_relative_to_the_nested_file() {
    let mut catalog = Catalog::new();
    ingest(
        &mut catalog,
        "comp-b",
        "2.0",
        vec![
            aggregate(
                "modules/ROOT/partials/outer.adoc",
                "outer-start\ninclude::./deeply/nested.adoc[]\nouter-end\n",
            ),
            aggregate("modules/ROOT/partials/deeply/nested.adoc", "nested-content\n"),
        ],
    );
    ingest(
        &mut catalog,
        "comp-a",
        "1.0",
        vec![aggregate(
            "modules/ROOT/pages/index.adoc",
            "= Home\n\ninclude::comp-b::outer.adoc[]\n",
        )],
    );

    let playbook = Playbook::default();
    let mut logger = VecLogger::default();
    convert::convert_all(&mut catalog, &playbook, &AdocEngine, &mut logger).unwrap();
    assert!(logger.diagnostics().is_empty(), "unexpected diagnostics: {:?}", logger.diagnostics());

    let index = catalog.get_by_id(&page_coordinate("comp-a", "1.0", "index.adoc")).unwrap();
    let html = index.contents_str();
    assert!(html.contains("outer-start"));
    assert!(html.contains("nested-content"));
    assert!(html.contains("outer-end"));
}

// ----------------------------------------------------------------------------
// Scenario 5: start-page alias synthesis from a page-aliases attribute
// ----------------------------------------------------------------------------

#[test]
fn scenario_page_aliases_attribute_registers_a_redirect_after_conversion() {
    let mut catalog = Catalog::new();
    ingest(
        &mut catalog,
        "docs",
        "1.0",
        vec![aggregate(
            "modules/ROOT/pages/index.adoc",
            "= Home\n:page-aliases: old-name.adoc, other-old-name.adoc\n\ncontent\n",
        )],
    );

    let playbook = Playbook::default();
    let mut logger = VecLogger::default();
    convert::convert_all(&mut catalog, &playbook, &AdocEngine, &mut logger).unwrap();
    assert!(logger.diagnostics().is_empty());

    let page = catalog.get_by_id(&page_coordinate("docs", "1.0", "index.adoc")).unwrap();
    let page_key = page.key();

    for alias_relative in ["old-name.adoc", "other-old-name.adoc"] {
        let alias_coordinate = Coordinate {
            component: "docs".to_string(),
            version: "1.0".to_string(),
            module: ROOT.to_string(),
            family: Family::Alias,
            relative: alias_relative.to_string(),
        };
        let alias = catalog.get_by_id(&alias_coordinate).unwrap();
        assert_eq!(alias.alias_target.as_deref(), Some(page_key.as_str()));
    }
}

// ----------------------------------------------------------------------------
// Scenario 6: latest-version redirect splat alias
// ----------------------------------------------------------------------------

#[test]
fn scenario_latest_version_splat_alias_tracks_the_latest_release() {
    let mut catalog = Catalog::new();
    ingest(&mut catalog, "docs", "1.0", vec![]);
    ingest(
        &mut catalog,
        "docs",
        "2.0",
        vec![aggregate("modules/ROOT/pages/index.adoc", "= Home\n\ncontent\n")],
    );
    ingest(&mut catalog, "docs", "3.0-SNAPSHOT", vec![]);
    catalog.register_component_version("docs", "3.0-SNAPSHOT").prerelease = Prerelease::Yes;

    let latest_start_page = catalog.get_by_id(&page_coordinate("docs", "2.0", "index.adoc")).unwrap();
    let latest_key = latest_start_page.key();
    let mut logger = VecLogger::default();
    catalog.register_component_version_start_page("docs", "2.0", "index.adoc", &mut logger);
    assert!(logger.diagnostics().is_empty());

    let component = catalog.get_components().into_iter().find(|c| c.name == "docs").unwrap();
    let latest = component.latest().expect("a non-prerelease version exists");
    assert_eq!(latest.version, "2.0");
    assert_eq!(latest.start_page.as_deref(), Some(latest_key.as_str()));

    let segment_coordinate = Coordinate {
        component: "docs".to_string(),
        version: "latest".to_string(),
        module: ROOT.to_string(),
        family: Family::Alias,
        relative: String::new(),
    };
    catalog.add_splat_alias(segment_coordinate.clone(), latest_key.clone()).unwrap();

    let alias_key = identity::generate_key(&segment_coordinate);
    let alias = catalog.get_by_id(&Coordinate { family: Family::Alias, ..segment_coordinate }).unwrap();
    assert_eq!(alias.alias_target.as_deref(), Some(latest_key.as_str()));
    assert!(alias.is_splat);
    assert_eq!(identity::generate_key(&alias.src.coordinate), alias_key);
    assert_eq!(alias.publish.as_ref().unwrap().url, "/docs/latest/");
}
