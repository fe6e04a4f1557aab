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

//! `xref:`/`image:`/`image::` macro resolution (§4.7).

use crate::catalog::Catalog;
use crate::diagnostic::{Diagnostic, Logger, Severity};
use crate::identity::{Family, PermittedFamilies};
use crate::resolver::{self, Context, Resolved};

use super::relativize::relative_url;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// The resolved form of a link macro: an href and, when the target is a
/// page with a known title, suggested link text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// URL to use as the macro's target.
    pub href: String,
    /// The target page's title, if the target is a page and it has one -
    /// used as link text when the macro itself supplies none.
    pub text: Option<String>,
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Resolves an `xref:` macro target to a [`Link`].
pub fn resolve_xref(
    catalog: &Catalog, ctx: &Context, target: &str, relativize: bool, logger: &mut dyn Logger,
) -> Link {
    resolve_link(catalog, ctx, target, Family::Page, PermittedFamilies::XREF, relativize, logger)
}

/// Resolves an `image:`/`image::` macro target to a [`Link`] (`text` is
/// always `None` - images carry no title to fall back to).
pub fn resolve_image(
    catalog: &Catalog, ctx: &Context, target: &str, relativize: bool, logger: &mut dyn Logger,
) -> Link {
    resolve_link(catalog, ctx, target, Family::Image, PermittedFamilies::IMAGE, relativize, logger)
}

fn resolve_link(
    catalog: &Catalog, ctx: &Context, target: &str, default_family: Family,
    permitted: PermittedFamilies, relativize: bool, logger: &mut dyn Logger,
) -> Link {
    match resolver::resolve(catalog, target, ctx, default_family, permitted) {
        Resolved::Found(file) => {
            let Some(publish) = &file.publish else {
                return Link { href: format!("#{target}"), text: None };
            };
            let href = if relativize {
                catalog
                    .get_by_id(&ctx.src)
                    .and_then(|from| from.publish.as_ref())
                    .map(|from_publish| relative_url(&from_publish.url, &publish.url))
                    .unwrap_or_else(|| publish.url.clone())
            } else {
                publish.url.clone()
            };
            let text = file.asciidoc.as_ref().and_then(|meta| meta.doctitle.clone());
            Link { href, text }
        }
        Resolved::NotFound => {
            logger.log(Diagnostic::new(
                Severity::Error,
                "unresolved-reference",
                format!("unresolved reference to {target}"),
            ));
            Link { href: format!("#{target}"), text: None }
        }
        Resolved::Invalid => {
            logger.log(Diagnostic::new(
                Severity::Error,
                "invalid-resource-syntax",
                format!("invalid resource spec: {target}"),
            ));
            Link { href: format!("#{target}"), text: None }
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::file::{AsciiDocMeta, File, Src};
    use crate::identity::{Coordinate, ROOT};
    use crate::path::{Out, Pub};

    fn page(relative: &str, url: &str, doctitle: &str) -> File {
        File {
            path: format!("modules/ROOT/pages/{relative}"),
            contents: Vec::new(),
            src: Src {
                coordinate: Coordinate {
                    component: "comp".to_string(),
                    version: "1.0".to_string(),
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
            out: Some(Out {
                path: url.trim_start_matches('/').to_string(),
                base_name: relative.to_string(),
                module_root_path: String::new(),
            }),
            publish: Some(Pub { url: url.to_string(), root_path: String::new() }),
            alias_target: None,
            is_splat: false,
            synthetic: false,
            nav: None,
            asciidoc: Some(AsciiDocMeta { attributes: Default::default(), doctitle: Some(doctitle.to_string()) }),
        }
    }

    fn context() -> Context {
        Context::new(
            Coordinate {
                component: "comp".to_string(),
                version: "1.0".to_string(),
                module: ROOT.to_string(),
                family: Family::Page,
                relative: "index.adoc".to_string(),
            },
            "modules/ROOT/pages/index.adoc".to_string(),
        )
    }

    #[test]
    fn resolved_xref_carries_the_target_doctitle() {
        let mut catalog = Catalog::new();
        catalog.add_file(page("other.adoc", "/comp/1.0/other.html", "Other Page")).unwrap();
        let mut logger = crate::diagnostic::VecLogger::default();
        let link = resolve_xref(&catalog, &context(), "other.adoc", false, &mut logger);
        assert_eq!(link.href, "/comp/1.0/other.html");
        assert_eq!(link.text.as_deref(), Some("Other Page"));
    }

    #[test]
    fn unresolved_xref_falls_back_to_a_fragment_placeholder() {
        let catalog = Catalog::new();
        let mut logger = crate::diagnostic::VecLogger::default();
        let link = resolve_xref(&catalog, &context(), "missing.adoc", false, &mut logger);
        assert_eq!(link.href, "#missing.adoc");
        assert_eq!(logger.diagnostics().len(), 1);
    }

    #[test]
    fn relativize_computes_a_path_from_the_current_page() {
        let mut catalog = Catalog::new();
        catalog.add_file(page("index.adoc", "/comp/1.0/index.html", "Home")).unwrap();
        catalog.add_file(page("other.adoc", "/comp/1.0/sub/other.html", "Other")).unwrap();
        let mut logger = crate::diagnostic::VecLogger::default();
        let link = resolve_xref(&catalog, &context(), "other.adoc", true, &mut logger);
        assert_eq!(link.href, "sub/other.html");
    }
}
