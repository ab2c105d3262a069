//! Rewrites internal anchors to clean, base-path-aware URLs.
//!
//! Renderers call [`LinkRewriter::after_insert`] with every batch of nodes they
//! insert into the page. Processed anchors are tagged with `data-routed="true"`
//! so repeated passes over the same nodes leave them alone.

use log::debug;

use crate::dom::{Element, Node};
use crate::routing::BasePath;

/// Attribute marking an anchor that has already been normalized.
pub const ROUTED_ATTR: &str = "data-routed";

/// Root-absolute pages that are remapped under a sub-path deployment.
pub const KNOWN_PAGES: &[&str] = &["/", "/recipes", "/about", "/contact", "/recipe"];

const SKIPPED_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "tel:", "#"];

#[derive(Debug, Clone)]
pub struct LinkRewriter {
    base_path: BasePath,
}

/// Outcome of classifying a single `href`.
#[derive(Debug, PartialEq, Eq)]
enum Rewrite {
    /// Not an internal link we know how to handle; leave unmarked
    Skip,
    /// Mark as processed, replacing the href when a new value is given
    Mark(Option<String>),
}

impl LinkRewriter {
    pub fn new(base_path: BasePath) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    /// Normalize every anchor in `nodes`. Returns the number of hrefs changed.
    pub fn normalize(&self, nodes: &mut [Node]) -> usize {
        let mut changed = 0;
        for node in nodes.iter_mut() {
            node.walk_elements_mut(&mut |element: &mut Element| {
                if self.normalize_anchor(element) {
                    changed += 1;
                }
            });
        }
        changed
    }

    /// Hook for renderers: run one pass over a freshly inserted batch.
    pub fn after_insert(&self, inserted: &mut [Node]) {
        let changed = self.normalize(inserted);
        if changed > 0 {
            debug!(
                "Rewrote {} link(s) for base path {}",
                changed, self.base_path
            );
        }
    }

    fn normalize_anchor(&self, element: &mut Element) -> bool {
        if element.tag != "a" || element.get_attr(ROUTED_ATTR) == Some("true") {
            return false;
        }
        let Some(href) = element.get_attr("href").map(str::to_string) else {
            return false;
        };

        match self.classify(&href) {
            Rewrite::Skip => false,
            Rewrite::Mark(replacement) => {
                let changed = match replacement {
                    Some(new_href) if new_href != href => {
                        element.set_attr("href", new_href);
                        true
                    }
                    _ => false,
                };
                element.set_attr(ROUTED_ATTR, "true");
                changed
            }
        }
    }

    fn classify(&self, href: &str) -> Rewrite {
        if href.is_empty() || SKIPPED_PREFIXES.iter().any(|p| href.starts_with(p)) {
            return Rewrite::Skip;
        }

        let (path, suffix) = split_suffix(href);
        if path.starts_with("//") || has_scheme(path) {
            return Rewrite::Skip;
        }

        if path.ends_with(".html") {
            return Rewrite::Mark(Some(format!(
                "{}{}",
                self.base_path.to_clean_url(path),
                suffix
            )));
        }

        if !path.starts_with('/') {
            return Rewrite::Mark(None);
        }

        if !is_known_page(path) || !self.base_path.is_sub_path() {
            return Rewrite::Mark(None);
        }
        Rewrite::Mark(Some(format!(
            "{}{}",
            self.base_path.to_clean_url(path),
            suffix
        )))
    }
}

/// Split `href` into its path and any `?query` / `#fragment` tail.
fn split_suffix(href: &str) -> (&str, &str) {
    match href.find(['?', '#']) {
        Some(index) => href.split_at(index),
        None => (href, ""),
    }
}

/// True for `javascript:`, `data:` and other scheme-prefixed hrefs.
fn has_scheme(path: &str) -> bool {
    match path.find(':') {
        Some(colon) => !path[..colon].contains('/'),
        None => false,
    }
}

fn is_known_page(path: &str) -> bool {
    let page = path.strip_suffix(".html").unwrap_or(path);
    let page = page.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(page);
    KNOWN_PAGES.contains(&page) || page == "/index"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(href: &str) -> Node {
        Element::new("a").attr("href", href).text("link").into()
    }

    fn href_of(node: &Node) -> &str {
        node.as_element().and_then(|el| el.get_attr("href")).unwrap()
    }

    fn routed(node: &Node) -> bool {
        node.as_element().and_then(|el| el.get_attr(ROUTED_ATTR)) == Some("true")
    }

    fn rewrite(base: BasePath, href: &str) -> Node {
        let mut nodes = vec![anchor(href)];
        LinkRewriter::new(base).normalize(&mut nodes);
        nodes.remove(0)
    }

    #[test]
    fn test_external_and_fragment_links_untouched() {
        for href in [
            "https://youtube.com/watch?v=abc",
            "http://example.com/a.html",
            "mailto:hi@example.com",
            "tel:+123",
            "#top",
            "//cdn.example.com/x.html",
        ] {
            let node = rewrite(BasePath::sub_path("my-site"), href);
            assert_eq!(href_of(&node), href);
            assert!(!routed(&node), "{} should not be marked", href);
        }
    }

    #[test]
    fn test_html_links_become_clean_urls() {
        let node = rewrite(BasePath::root(), "recipes.html");
        assert_eq!(href_of(&node), "/recipes");
        assert!(routed(&node));

        let node = rewrite(BasePath::sub_path("my-site"), "index.html");
        assert_eq!(href_of(&node), "/my-site/");

        let node = rewrite(BasePath::sub_path("my-site"), "/about.html");
        assert_eq!(href_of(&node), "/my-site/about");
    }

    #[test]
    fn test_query_and_fragment_are_preserved() {
        let node = rewrite(BasePath::sub_path("my-site"), "recipe.html?id=dal-tadka");
        assert_eq!(href_of(&node), "/my-site/recipe?id=dal-tadka");

        let node = rewrite(BasePath::root(), "about.html#team");
        assert_eq!(href_of(&node), "/about#team");
    }

    #[test]
    fn test_relative_extensionless_links_marked_only() {
        let node = rewrite(BasePath::sub_path("my-site"), "recipes");
        assert_eq!(href_of(&node), "recipes");
        assert!(routed(&node));
    }

    #[test]
    fn test_root_absolute_known_pages() {
        let node = rewrite(BasePath::sub_path("my-site"), "/recipes");
        assert_eq!(href_of(&node), "/my-site/recipes");
        assert!(routed(&node));

        let node = rewrite(BasePath::sub_path("my-site"), "/");
        assert_eq!(href_of(&node), "/my-site/");

        // Root deployments keep absolute paths as they are
        let node = rewrite(BasePath::root(), "/recipes");
        assert_eq!(href_of(&node), "/recipes");
        assert!(routed(&node));
    }

    #[test]
    fn test_root_absolute_unknown_pages_left_alone() {
        let node = rewrite(BasePath::sub_path("my-site"), "/assets/menu.pdf");
        assert_eq!(href_of(&node), "/assets/menu.pdf");
        assert!(routed(&node));
    }

    #[test]
    fn test_known_pages_match_whole_paths_not_prefixes() {
        for href in ["/assets/x.jpg", "/recipes-archive", "/about/team", "/recipe/extra"] {
            let node = rewrite(BasePath::sub_path("my-site"), href);
            assert_eq!(href_of(&node), href);
            assert!(routed(&node));
        }
        for (href, expected) in [
            ("/about/", "/my-site/about/"),
            ("/index", "/my-site/"),
            ("/contact?ref=nav", "/my-site/contact?ref=nav"),
        ] {
            let node = rewrite(BasePath::sub_path("my-site"), href);
            assert_eq!(href_of(&node), expected);
        }
    }

    #[test]
    fn test_already_routed_links_are_skipped() {
        let mut nodes: Vec<Node> = vec![Element::new("a")
            .attr("href", "/recipes")
            .attr(ROUTED_ATTR, "true")
            .into()];
        let changed = LinkRewriter::new(BasePath::sub_path("my-site")).normalize(&mut nodes);
        assert_eq!(changed, 0);
        assert_eq!(href_of(&nodes[0]), "/recipes");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let rewriter = LinkRewriter::new(BasePath::sub_path("my-site"));
        let mut nodes: Vec<Node> = vec![Element::new("nav")
            .child(Element::new("a").attr("href", "index.html"))
            .child(Element::new("a").attr("href", "/recipes"))
            .child(Element::new("a").attr("href", "recipe.html?id=1"))
            .child(Element::new("a").attr("href", "https://example.com"))
            .into()];

        let first = rewriter.normalize(&mut nodes);
        assert_eq!(first, 3);
        let snapshot = nodes.clone();

        let second = rewriter.normalize(&mut nodes);
        assert_eq!(second, 0);
        assert_eq!(nodes, snapshot);
    }

    #[test]
    fn test_nested_anchors_in_parsed_html() {
        let mut nodes = Node::parse_fragment(
            r#"<div><p>See <a href="recipes.html">all recipes</a></p><a>no href</a></div>"#,
        );
        LinkRewriter::new(BasePath::sub_path("my-site")).after_insert(&mut nodes);
        let html = crate::dom::to_html(&nodes);
        assert!(html.contains(r#"<a href="/my-site/recipes" data-routed="true">all recipes</a>"#));
        assert!(html.contains("<a>no href</a>"));
    }
}
