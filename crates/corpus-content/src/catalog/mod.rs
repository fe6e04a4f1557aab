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

//! The content catalog (§4.4): the indexed store of every file the pipeline
//! knows about, keyed by resource identity.

pub mod component;
pub mod error;
pub mod file;

use ahash::AHashMap;
use serde::Serialize;
use slab::Slab;

use crate::diagnostic::{Diagnostic, Logger, Severity};
use crate::identity::{self, Coordinate, Family, PermittedFamilies, ROOT};
use crate::path::{self, ExtensionStyle};
use crate::resolver::{self, Context, Resolved};
use component::{Component, ComponentVersion};
use error::{Error, Result};
use file::File;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Sort key for [`Catalog::get_components_sorted_by`] (§E.2 item 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentSortKey {
    /// Sort by component name.
    Name,
    /// Sort by component title, falling back to name when title is unset.
    Title,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// A full snapshot of the catalog, suitable for handing off to a downstream
/// stage (navigation building, output publishing) that this crate does not
/// itself implement.
#[derive(Clone, Debug, Serialize)]
pub struct CatalogModel {
    /// Every file currently registered, in slab order.
    pub files: Vec<File>,
    /// Every component, in insertion order.
    pub components: Vec<Component>,
}

/// The content catalog.
///
/// Files are stored in a [`Slab`] and addressed everywhere else by index,
/// per §9's design note preferring an arena plus indices over owned
/// pointers. Family-scoped maps from catalog key to slab index give O(1)
/// lookup without duplicating file data.
#[derive(Debug, Default)]
pub struct Catalog {
    files: Slab<File>,
    by_family: AHashMap<Family, AHashMap<String, usize>>,
    by_path: AHashMap<String, usize>,
    components: AHashMap<String, Component>,
    component_order: Vec<String>,
    site_start_page: Option<usize>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    // -- component registration ------------------------------------------

    /// Registers a component version, creating the component if this is its
    /// first version. Returns a mutable reference for the caller to fill in
    /// title/display-version/prerelease/attributes.
    pub fn register_component_version(
        &mut self, component: &str, version: &str,
    ) -> &mut ComponentVersion {
        let entry = self.components.entry(component.to_string()).or_insert_with(|| {
            self.component_order.push(component.to_string());
            Component { name: component.to_string(), ..Default::default() }
        });
        entry.get_or_insert(version)
    }

    /// Resolves `spec` against the `component`@`version` component through
    /// the resource resolver and records the result as that version's start
    /// page (§4.4).
    ///
    /// When the resolved page isn't already at the canonical `ROOT/index`
    /// identity, a synthetic alias is created there so that a bare request
    /// for the component version's root still lands on it. A spec that
    /// fails to resolve falls back to the canonical index page, if one
    /// exists, logging a diagnostic either way.
    pub fn register_component_version_start_page(
        &mut self, component: &str, version: &str, spec: &str, logger: &mut dyn Logger,
    ) {
        let canonical = Coordinate {
            component: component.to_string(),
            version: version.to_string(),
            module: ROOT.to_string(),
            family: Family::Page,
            relative: "index.adoc".to_string(),
        };

        let target_key = {
            let ctx = Context::new(canonical.clone(), String::new());
            match resolver::resolve(self, spec, &ctx, Family::Page, PermittedFamilies::XREF) {
                Resolved::Found(file) => Some(file.key()),
                Resolved::NotFound => {
                    logger.log(Diagnostic::new(
                        Severity::Warn,
                        "start-page-not-found",
                        format!("start page not found for {component}@{version}: {spec}"),
                    ));
                    self.get_by_id(&canonical).map(|file| file.key())
                }
                Resolved::Invalid => {
                    logger.log(Diagnostic::new(
                        Severity::Warn,
                        "start-page-has-invalid-syntax",
                        format!("start page has invalid syntax for {component}@{version}: {spec}"),
                    ));
                    self.get_by_id(&canonical).map(|file| file.key())
                }
            }
        };

        let Some(target_key) = target_key else { return };

        if target_key != identity::generate_key(&canonical) && self.get_by_id(&canonical).is_none() {
            let _ = self.register_page_alias(canonical.clone(), target_key.clone());
        }

        if let Some(cv) = self.components.get_mut(component).and_then(|c| c.get_mut(version)) {
            cv.start_page = Some(target_key);
            cv.url = Some(format!("/{component}/{version}/"));
        }
    }

    /// Resolves `spec` (a fully-qualified `component[@version]:[module:]relative`
    /// spec) and records the result as the site's overall start page (§4.4).
    pub fn register_site_start_page(&mut self, spec: &str, logger: &mut dyn Logger) {
        let id = match identity::parse(spec, Some(PermittedFamilies::XREF.as_slice())) {
            identity::ParsedSpec::Id(id) => id,
            identity::ParsedSpec::Invalid => {
                logger.log(Diagnostic::new(
                    Severity::Warn,
                    "start-page-has-invalid-syntax",
                    format!("site start page has invalid syntax: {spec}"),
                ));
                return;
            }
        };

        let Some(component) = id.component else {
            logger.log(Diagnostic::new(
                Severity::Warn,
                "start-page-has-invalid-syntax",
                format!("site start page must name a component: {spec}"),
            ));
            return;
        };

        let version = id.version.unwrap_or_else(|| {
            self.components.get(&component).and_then(|c| c.latest()).map(|cv| cv.version.clone()).unwrap_or_default()
        });

        let coordinate = Coordinate {
            component,
            version,
            module: id.module.unwrap_or_else(|| ROOT.to_string()),
            family: Family::Page,
            relative: id.relative,
        };

        let key = identity::generate_key(&coordinate);
        self.site_start_page = self.by_family.get(&Family::Page).and_then(|m| m.get(&key)).copied();

        if self.site_start_page.is_none() {
            logger.log(Diagnostic::new(
                Severity::Warn,
                "start-page-not-found",
                format!("site start page not found: {spec}"),
            ));
        }
    }

    // -- file registration --------------------------------------------------

    /// Adds a file to the catalog.
    ///
    /// Errors with [`Error::DuplicateResource`] if a file with the same
    /// family and key is already registered (§7).
    pub fn add_file(&mut self, file: File) -> Result<usize> {
        let family = file.src.coordinate.family;
        let key = file.key();
        if let Some(&existing_idx) = self.by_family.get(&family).and_then(|m| m.get(&key)) {
            let existing = self.files[existing_idx].path.clone();
            return Err(Error::DuplicateResource {
                family,
                key,
                existing,
                incoming: file.path.clone(),
            });
        }

        let path = file.path.clone();
        let nav_order = if family == Family::Nav {
            let component = file.src.coordinate.component.clone();
            let version = file.src.coordinate.version.clone();
            self.components.get(&component).and_then(|c| c.get(&version)).map(|cv| cv.nav.len() as u32)
        } else {
            None
        };

        let mut file = file;
        if let Some(order) = nav_order {
            file.nav = Some(file::NavAssignment { order });
        }

        let idx = self.files.insert(file);
        self.by_family.entry(family).or_default().insert(key, idx);
        self.by_path.insert(path, idx);

        if family == Family::Nav {
            let src = &self.files[idx].src.coordinate;
            let (component, version) = (src.component.clone(), src.version.clone());
            let key = self.files[idx].key();
            if let Some(cv) = self.components.get_mut(&component).and_then(|c| c.get_mut(&version)) {
                cv.nav.push(key);
            }
        }

        Ok(idx)
    }

    /// Registers a page alias: a synthetic `alias` family file at `from`
    /// redirecting to the file at `to_key`.
    ///
    /// An `.adoc` extension is auto-inferred onto `from.relative` when it
    /// carries no extension at all - a deprecated inference inherited from
    /// this kind of system's original implementation (no removal is planned
    /// here; there is no compatibility window to gate it behind).
    pub fn register_page_alias(&mut self, mut from: Coordinate, to_key: String) -> Result<usize> {
        if !from.relative.contains('.') {
            from.relative.push_str(".adoc");
        }
        from.family = Family::Alias;

        if let Some(&target_idx) = self.by_family.get(&Family::Alias).and_then(|m| m.get(&to_key)) {
            let _ = target_idx;
            return Err(Error::AliasCollision { from: identity::generate_key(&from), to: to_key });
        }

        let key = identity::generate_key(&from);
        let path = format!("~{key}~"); // synthetic files have no real source path
        self.add_file(File {
            path,
            contents: Vec::new(),
            src: file::Src {
                coordinate: from,
                basename: String::new(),
                stem: String::new(),
                extname: String::new(),
                media_type: "text/asciidoc".to_string(),
                module_root_path: String::new(),
                origin: None,
                abspath: None,
            },
            out: None,
            publish: None,
            alias_target: Some(key),
            is_splat: false,
            synthetic: true,
            nav: None,
            asciidoc: None,
        })
    }

    /// Registers a splat alias: redirects every unmatched path under a
    /// module to `to_key` (e.g. the latest-version redirect of §8 scenario
    /// 6).
    ///
    /// Rejects a two-hop redirect cycle where `to_key` is itself a splat
    /// alias pointing back at `from` (§E.2 item 3).
    pub fn add_splat_alias(&mut self, from: Coordinate, to_key: String) -> Result<usize> {
        let from_key = identity::generate_key(&from);
        if let Some(&target_idx) = self.by_family.get(&Family::Alias).and_then(|m| m.get(&to_key)) {
            let target = &self.files[target_idx];
            if target.is_splat && target.alias_target.as_deref() == Some(from_key.as_str()) {
                return Err(Error::AliasCycle { from: from_key, to: to_key });
            }
        }

        let mut from = from;
        from.family = Family::Alias;
        let path = format!("~{from_key}~");
        let out = path::compute_out(&from, "", "", ExtensionStyle::Default);
        let publish = path::compute_pub(&out, Family::Alias, ExtensionStyle::Default);
        self.add_file(File {
            path,
            contents: Vec::new(),
            src: file::Src {
                coordinate: from,
                basename: String::new(),
                stem: String::new(),
                extname: String::new(),
                media_type: "text/asciidoc".to_string(),
                module_root_path: out.module_root_path.clone(),
                origin: None,
                abspath: None,
            },
            out: Some(out),
            publish,
            alias_target: Some(to_key),
            is_splat: true,
            synthetic: true,
            nav: None,
            asciidoc: None,
        })
    }

    // -- queries -------------------------------------------------------------

    /// Looks up a file by its exact resource coordinate.
    pub fn get_by_id(&self, coordinate: &Coordinate) -> Option<&File> {
        let key = identity::generate_key(coordinate);
        self.by_family.get(&coordinate.family)?.get(&key).map(|&idx| &self.files[idx])
    }

    /// Looks up a file by its original virtual path.
    pub fn get_by_path(&self, path: &str) -> Option<&File> {
        self.by_path.get(path).map(|&idx| &self.files[idx])
    }

    /// Looks up a file by its canonical key alone, searching every family.
    ///
    /// Used to follow an alias's `alias_target`, which is a bare key with no
    /// family attached (an alias can redirect to any family).
    pub fn get_by_key(&self, key: &str) -> Option<&File> {
        self.by_family.values().find_map(|m| m.get(key)).map(|&idx| &self.files[idx])
    }

    /// Returns every file registered under `component`@`version`, in
    /// catalog-key order.
    ///
    /// Computed live rather than cached on [`ComponentVersion`] (§9's design
    /// note against redundant state): the slab already owns every file, so a
    /// version's file list is a query, not a second copy of the same data.
    pub fn files_for(&self, component: &str, version: &str) -> Vec<&File> {
        let mut files: Vec<&File> = self
            .find_by(|f| f.src.coordinate.component == component && f.src.coordinate.version == version)
            .collect();
        files.sort_by_key(|f| f.key());
        files
    }

    /// Returns every file matching `predicate`.
    pub fn find_by<'a>(
        &'a self, predicate: impl Fn(&File) -> bool + 'a,
    ) -> impl Iterator<Item = &'a File> + 'a {
        self.files.iter().map(|(_, file)| file).filter(move |file| predicate(file))
    }

    /// Returns every `page` family file, sorted by catalog key for
    /// deterministic traversal (§5: conversion is a strict forward walk).
    pub fn get_pages(&self) -> Vec<&File> {
        let mut pages: Vec<&File> =
            self.find_by(|f| f.src.coordinate.family == Family::Page).collect();
        pages.sort_by_key(|f| f.key());
        pages
    }

    /// Returns every component, in registration order.
    pub fn get_components(&self) -> Vec<&Component> {
        self.component_order.iter().filter_map(|name| self.components.get(name)).collect()
    }

    /// Returns every component sorted by `key` (§E.2 item 2).
    pub fn get_components_sorted_by(&self, key: ComponentSortKey) -> Vec<&Component> {
        let mut components = self.get_components();
        match key {
            ComponentSortKey::Name => components.sort_by(|a, b| a.name.cmp(&b.name)),
            ComponentSortKey::Title => components.sort_by(|a, b| {
                a.title.as_deref().unwrap_or(&a.name).cmp(b.title.as_deref().unwrap_or(&b.name))
            }),
        }
        components
    }

    /// Returns the registered site start page, if any.
    pub fn get_site_start_page(&self) -> Option<&File> {
        self.site_start_page.map(|idx| &self.files[idx])
    }

    /// Returns a mutable reference to a file by slab index, for stages
    /// (classifier, convert) that need to fill in computed fields after
    /// insertion.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut File> {
        self.files.get_mut(idx)
    }

    /// Looks up a file by its exact resource coordinate, mutably.
    pub fn get_mut_by_id(&mut self, coordinate: &Coordinate) -> Option<&mut File> {
        let key = identity::generate_key(coordinate);
        let idx = *self.by_family.get(&coordinate.family)?.get(&key)?;
        self.files.get_mut(idx)
    }

    /// Exports a full snapshot of the catalog.
    pub fn export_to_model(&self) -> CatalogModel {
        CatalogModel {
            files: self.files.iter().map(|(_, file)| file.clone()).collect(),
            components: self.get_components().into_iter().cloned().collect(),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::file::Src;
    use crate::identity::ROOT;

    fn page(component: &str, version: &str, relative: &str) -> File {
        File {
            path: format!("{component}/{version}/{relative}"),
            contents: b"= Title\n".to_vec(),
            src: Src {
                coordinate: Coordinate {
                    component: component.to_string(),
                    version: version.to_string(),
                    module: ROOT.to_string(),
                    family: Family::Page,
                    relative: relative.to_string(),
                },
                basename: relative.to_string(),
                stem: relative.trim_end_matches(".adoc").to_string(),
                extname: ".adoc".to_string(),
                media_type: "text/asciidoc".to_string(),
                module_root_path: String::new(),
                origin: None,
                abspath: None,
            },
            out: None,
            publish: None,
            alias_target: None,
            is_splat: false,
            synthetic: false,
            nav: None,
            asciidoc: None,
        }
    }

    #[test]
    fn duplicate_resource_is_rejected() {
        let mut catalog = Catalog::new();
        catalog.add_file(page("comp", "1.0", "index.adoc")).unwrap();
        let err = catalog.add_file(page("comp", "1.0", "index.adoc")).unwrap_err();
        assert!(matches!(err, Error::DuplicateResource { .. }));
    }

    #[test]
    fn components_sorted_by_title_falls_back_to_name() {
        let mut catalog = Catalog::new();
        catalog.register_component_version("zeta", "1.0");
        catalog.register_component_version("alpha", "1.0").title =
            Some("Alpha Docs".to_string());
        let sorted = catalog.get_components_sorted_by(ComponentSortKey::Title);
        assert_eq!(sorted[0].name, "alpha");
        assert_eq!(sorted[1].name, "zeta");
    }

    #[test]
    fn splat_alias_two_hop_cycle_is_rejected() {
        let mut catalog = Catalog::new();
        let a = Coordinate {
            component: "comp".to_string(),
            version: "1.0".to_string(),
            module: ROOT.to_string(),
            family: Family::Alias,
            relative: String::new(),
        };
        let b = Coordinate {
            component: "comp".to_string(),
            version: "2.0".to_string(),
            module: ROOT.to_string(),
            family: Family::Alias,
            relative: String::new(),
        };
        let a_key = identity::generate_key(&a);
        let b_key = identity::generate_key(&b);
        catalog.add_splat_alias(a.clone(), b_key.clone()).unwrap();
        let err = catalog.add_splat_alias(b, a_key).unwrap_err();
        assert!(matches!(err, Error::AliasCycle { .. }));
    }

    #[test]
    fn get_pages_is_sorted_for_deterministic_traversal() {
        let mut catalog = Catalog::new();
        catalog.add_file(page("comp", "1.0", "zeta.adoc")).unwrap();
        catalog.add_file(page("comp", "1.0", "alpha.adoc")).unwrap();
        let keys: Vec<String> = catalog.get_pages().iter().map(|f| f.key()).collect();
        assert!(keys[0] < keys[1]);
    }

    #[test]
    fn component_version_start_page_resolves_and_sets_url() {
        let mut catalog = Catalog::new();
        catalog.register_component_version("comp", "1.0");
        catalog.add_file(page("comp", "1.0", "home.adoc")).unwrap();
        let mut logger = crate::diagnostic::VecLogger::default();
        catalog.register_component_version_start_page("comp", "1.0", "home.adoc", &mut logger);
        assert!(logger.diagnostics().is_empty());

        let home_key = catalog.get_by_path("comp/1.0/home.adoc").unwrap().key();
        let cv = catalog.get_components()[0].get("1.0").unwrap();
        assert_eq!(cv.start_page.as_deref(), Some(home_key.as_str()));
        assert_eq!(cv.url.as_deref(), Some("/comp/1.0/"));

        let canonical = Coordinate {
            component: "comp".to_string(),
            version: "1.0".to_string(),
            module: ROOT.to_string(),
            family: Family::Alias,
            relative: "index.adoc".to_string(),
        };
        let alias = catalog.get_by_id(&canonical).unwrap();
        assert_eq!(alias.alias_target.as_deref(), Some(home_key.as_str()));
    }

    #[test]
    fn component_version_start_page_falls_back_to_canonical_index_when_unresolved() {
        let mut catalog = Catalog::new();
        catalog.register_component_version("comp", "1.0");
        catalog.add_file(page("comp", "1.0", "index.adoc")).unwrap();
        let mut logger = crate::diagnostic::VecLogger::default();
        catalog.register_component_version_start_page("comp", "1.0", "missing.adoc", &mut logger);

        assert_eq!(logger.diagnostics()[0].code, "start-page-not-found");
        let index_key = catalog.get_by_path("comp/1.0/index.adoc").unwrap().key();
        let cv = catalog.get_components()[0].get("1.0").unwrap();
        assert_eq!(cv.start_page.as_deref(), Some(index_key.as_str()));
    }

    #[test]
    fn site_start_page_resolves_by_key() {
        let mut catalog = Catalog::new();
        catalog.register_component_version("comp", "1.0");
        catalog.add_file(page("comp", "1.0", "home.adoc")).unwrap();
        let mut logger = crate::diagnostic::VecLogger::default();
        catalog.register_site_start_page("comp::home.adoc", &mut logger);
        assert!(logger.diagnostics().is_empty());
        assert_eq!(catalog.get_site_start_page().unwrap().src.coordinate.relative, "home.adoc");
    }

    #[test]
    fn site_start_page_missing_component_is_invalid_syntax() {
        let mut catalog = Catalog::new();
        let mut logger = crate::diagnostic::VecLogger::default();
        catalog.register_site_start_page("home.adoc", &mut logger);
        assert_eq!(logger.diagnostics()[0].code, "start-page-has-invalid-syntax");
        assert!(catalog.get_site_start_page().is_none());
    }
}
