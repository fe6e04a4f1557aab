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

//! The Resource Resolver (§4.6): turns a parsed resource spec plus a
//! current-page context into a concrete catalog file, or a typed miss.

use crate::catalog::file::File;
use crate::catalog::Catalog;
use crate::identity::{self, Coordinate, Family, ParsedSpec, PermittedFamilies};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// The outcome of [`resolve`].
#[derive(Debug)]
pub enum Resolved<'a> {
    /// The spec resolved to a file in the catalog.
    Found(&'a File),
    /// The spec parsed but no matching file exists - an `UnresolvedReference`
    /// (§7).
    NotFound,
    /// The spec's syntax is structurally invalid - an `InvalidResourceSyntax`
    /// (§7).
    Invalid,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// The current-page context a relative or partial resource spec is resolved
/// against.
#[derive(Clone, Debug)]
pub struct Context {
    /// Coordinate of the file the reference appears in (or, for a nested
    /// include, the nested file - see [`Context::nested`]).
    pub src: Coordinate,
    /// Raw on-disk path of that same file, used to resolve a `./`-relative
    /// spec against the current file's own directory (§4.6 step 4).
    pub path: String,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Context {
    /// Builds a context rooted at `src`, found at `path`.
    pub fn new(src: Coordinate, path: String) -> Self {
        Context { src, path }
    }

    /// Returns the context to use while resolving references found inside a
    /// nested include.
    ///
    /// Per §4.6: "For nested includes, the current-file context is the
    /// nested file, not the top-level file."
    pub fn nested(&self, file: Coordinate, path: String) -> Context {
        Context { src: file, path }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Resolves `spec` against `ctx` (§4.6).
///
/// Coordinates left unspecified in `spec` are filled from `ctx` in order:
/// component, then version, then module, then family (defaulting to
/// `default_family`). A version left unspecified for an explicitly different
/// component defaults to that component's latest release, not `ctx`'s
/// version.
pub fn resolve<'a>(
    catalog: &'a Catalog, spec: &str, ctx: &Context, default_family: Family,
    permitted: PermittedFamilies,
) -> Resolved<'a> {
    let id = match identity::parse(spec, Some(permitted.as_slice())) {
        ParsedSpec::Invalid => return Resolved::Invalid,
        ParsedSpec::Id(id) => id,
    };

    // §4.6 step 4: a `./`-relative spec is resolved against the current
    // file's own directory, not its resource coordinate.
    if let Some(rest) = id.relative.strip_prefix("./") {
        let dir = match ctx.path.rfind('/') {
            Some(i) => &ctx.path[..i],
            None => "",
        };
        let full_path = if dir.is_empty() { rest.to_string() } else { format!("{dir}/{rest}") };
        return match catalog.get_by_path(&full_path) {
            Some(file) => Resolved::Found(file),
            None => Resolved::NotFound,
        };
    }

    let component = id.component.unwrap_or_else(|| ctx.src.component.clone());
    let version = id.version.unwrap_or_else(|| default_version(catalog, &ctx.src, &component));
    let module = id.module.unwrap_or_else(|| ctx.src.module.clone());
    let family = id.family.unwrap_or(default_family);

    let coordinate = Coordinate { component, version, module, family, relative: id.relative };
    match catalog.get_by_id(&coordinate) {
        Some(file) => Resolved::Found(file),
        None => {
            // §4.6 step 5: a `page` miss retries as an `alias`, following it
            // to the file it actually redirects to.
            if family == Family::Page {
                let alias_coordinate = Coordinate { family: Family::Alias, ..coordinate };
                if let Some(alias) = catalog.get_by_id(&alias_coordinate) {
                    if let Some(target) = alias.alias_target.as_deref().and_then(|k| catalog.get_by_key(k)) {
                        return Resolved::Found(target);
                    }
                }
            }
            Resolved::NotFound
        }
    }
}

/// The version to assume when a spec names a component but not a version.
///
/// If the named component is the context's own component, its version
/// carries over; otherwise the named component's latest release is used, if
/// the component is registered at all (otherwise the lookup below simply
/// misses).
fn default_version(catalog: &Catalog, ctx_src: &Coordinate, component: &str) -> String {
    if component == ctx_src.component {
        return ctx_src.version.clone();
    }
    catalog
        .get_components()
        .into_iter()
        .find(|c| c.name == component)
        .and_then(|c| c.latest())
        .map(|cv| cv.version.clone())
        .unwrap_or_default()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::file::Src;
    use crate::identity::ROOT;

    fn file(component: &str, version: &str, module: &str, relative: &str) -> File {
        File {
            path: format!("{component}/{version}/{module}/{relative}"),
            contents: Vec::new(),
            src: Src {
                coordinate: Coordinate {
                    component: component.to_string(),
                    version: version.to_string(),
                    module: module.to_string(),
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
    fn bare_relative_resolves_within_current_context() {
        let mut catalog = Catalog::new();
        catalog.add_file(file("comp", "1.0", ROOT, "other.adoc")).unwrap();
        let ctx = Context::new(
            Coordinate {
                component: "comp".to_string(),
                version: "1.0".to_string(),
                module: ROOT.to_string(),
                family: Family::Page,
                relative: "index.adoc".to_string(),
            },
            "comp/1.0/ROOT/index.adoc".to_string(),
        );
        let resolved = resolve(&catalog, "other.adoc", &ctx, Family::Page, PermittedFamilies::XREF);
        assert!(matches!(resolved, Resolved::Found(_)));
    }

    #[test]
    fn unresolved_reference_is_distinguished_from_invalid_syntax() {
        let catalog = Catalog::new();
        let ctx = Context::new(
            Coordinate {
                component: "comp".to_string(),
                version: "1.0".to_string(),
                module: ROOT.to_string(),
                family: Family::Page,
                relative: "index.adoc".to_string(),
            },
            "comp/1.0/ROOT/index.adoc".to_string(),
        );
        assert!(matches!(
            resolve(&catalog, "missing.adoc", &ctx, Family::Page, PermittedFamilies::XREF),
            Resolved::NotFound
        ));
        assert!(matches!(
            resolve(&catalog, "a:b.adoc", &ctx, Family::Page, PermittedFamilies::XREF),
            Resolved::Invalid
        ));
    }

    #[test]
    fn cross_component_reference_defaults_to_latest_release() {
        let mut catalog = Catalog::new();
        catalog.register_component_version("other", "1.0");
        catalog.register_component_version("other", "2.0");
        catalog.add_file(file("other", "2.0", ROOT, "page.adoc")).unwrap();
        let ctx = Context::new(
            Coordinate {
                component: "comp".to_string(),
                version: "1.0".to_string(),
                module: ROOT.to_string(),
                family: Family::Page,
                relative: "index.adoc".to_string(),
            },
            "comp/1.0/ROOT/index.adoc".to_string(),
        );
        let resolved =
            resolve(&catalog, "other::page.adoc", &ctx, Family::Page, PermittedFamilies::XREF);
        assert!(matches!(resolved, Resolved::Found(_)));
    }

    #[test]
    fn dot_slash_relative_resolves_against_the_current_files_directory() {
        let mut catalog = Catalog::new();
        let mut nested = file("comp", "1.0", ROOT, "deeply/nested.adoc");
        nested.path = "modules/ROOT/partials/deeply/nested.adoc".to_string();
        catalog.add_file(nested).unwrap();

        let ctx = Context::new(
            Coordinate {
                component: "comp".to_string(),
                version: "1.0".to_string(),
                module: ROOT.to_string(),
                family: Family::Partial,
                relative: "outer.adoc".to_string(),
            },
            "modules/ROOT/partials/outer.adoc".to_string(),
        );
        let resolved =
            resolve(&catalog, "./deeply/nested.adoc", &ctx, Family::Partial, PermittedFamilies::INCLUDE);
        let Resolved::Found(found) = resolved else { panic!("expected the dot-relative include to resolve") };
        assert_eq!(found.path, "modules/ROOT/partials/deeply/nested.adoc");
    }

    #[test]
    fn page_miss_retries_as_an_alias_and_follows_it() {
        let mut catalog = Catalog::new();
        catalog.add_file(file("comp", "1.0", ROOT, "real.adoc")).unwrap();
        let page_coordinate = Coordinate {
            component: "comp".to_string(),
            version: "1.0".to_string(),
            module: ROOT.to_string(),
            family: Family::Page,
            relative: "moved.adoc".to_string(),
        };
        let target_key = identity::generate_key(&Coordinate {
            relative: "real.adoc".to_string(),
            ..page_coordinate.clone()
        });
        catalog.register_page_alias(page_coordinate, target_key).unwrap();

        let ctx = Context::new(
            Coordinate {
                component: "comp".to_string(),
                version: "1.0".to_string(),
                module: ROOT.to_string(),
                family: Family::Page,
                relative: "index.adoc".to_string(),
            },
            "comp/1.0/ROOT/index.adoc".to_string(),
        );
        let resolved = resolve(&catalog, "moved.adoc", &ctx, Family::Page, PermittedFamilies::XREF);
        let Resolved::Found(file) = resolved else { panic!("expected the alias to be followed") };
        assert_eq!(file.src.coordinate.relative, "real.adoc");
    }
}
