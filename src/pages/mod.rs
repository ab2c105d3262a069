//! Page controllers wiring the store, filters, renderer and link rewriting.

mod detail;
mod listing;

pub use detail::{recipe_id, DetailPage};
pub use listing::ListingPage;

use reqwest::Url;

use crate::config::SiteConfig;
use crate::dom::{to_html, Element, Node};
use crate::error::SiteError;
use crate::links::LinkRewriter;
use crate::render::Renderer;
use crate::routing::BasePath;
use crate::seo::MetaTag;

/// Shared header present on every page before any script runs.
const SITE_HEADER: &str = r#"<header class="site-header"><nav class="navbar"><a href="index.html" class="logo">{site}</a><button class="mobile-menu-toggle" aria-label="Toggle menu"><span class="material-icons">menu</span></button><ul class="nav-links"><li><a href="index.html">Home</a></li><li><a href="recipes.html">Recipes</a></li><li><a href="about.html">About</a></li><li><a href="contact.html">Contact</a></li></ul></nav></header>"#;

/// Per-page context: configuration, current URL and the derived base path.
#[derive(Debug, Clone)]
pub struct Site {
    config: SiteConfig,
    url: Url,
    renderer: Renderer,
}

impl Site {
    pub fn new(config: SiteConfig, page_url: &str) -> Result<Self, SiteError> {
        let url = Url::parse(page_url).map_err(|e| SiteError::InvalidUrl(format!("{}: {}", page_url, e)))?;
        let base_path = BasePath::for_deployment(&config.deployment(), url.path());
        let renderer = Renderer::new(LinkRewriter::new(base_path), config.image_dir.clone());
        Ok(Self {
            config,
            url,
            renderer,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn base_path(&self) -> &BasePath {
        self.renderer.base_path()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Absolute URL of the recipe data file for this deployment.
    pub fn data_url(&self) -> Result<String, SiteError> {
        self.url
            .join(&self.base_path().asset(&self.config.data_path))
            .map(String::from)
            .map_err(|e| SiteError::InvalidUrl(e.to_string()))
    }

    /// The site header with its links normalized, as on first page load.
    pub fn header(&self) -> Vec<Node> {
        let site_name = crate::utils::escape_html(&self.config.site_name);
        let mut nodes = Node::parse_fragment(&SITE_HEADER.replace("{site}", &site_name));
        self.renderer.rewriter().after_insert(&mut nodes);
        nodes
    }
}

/// A fully assembled page ready to be serialized.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub title: String,
    pub meta: Vec<MetaTag>,
    /// Extra `<head>` nodes such as the JSON-LD script
    pub head: Vec<Node>,
    pub header: Vec<Node>,
    pub body: Vec<Node>,
}

impl Document {
    /// All anchors in header and body.
    pub fn links(&self) -> Vec<&Element> {
        self.header
            .iter()
            .chain(self.body.iter())
            .flat_map(|node| node.find_all(&|el: &Element| el.tag == "a"))
            .collect()
    }

    pub fn to_html(&self) -> String {
        let meta: Vec<Node> = self.meta.iter().map(MetaTag::to_node).collect();
        let main: Node = Element::new("main")
            .class("container")
            .children(self.body.iter().cloned())
            .into();
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title>{}{}</head><body>{}{}</body></html>\n",
            crate::utils::escape_html(&self.title),
            to_html(&meta),
            to_html(&self.head),
            to_html(&self.header),
            main.to_html()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentMode;

    #[test]
    fn test_site_resolves_base_path_from_url() {
        let site = Site::new(SiteConfig::default(), "https://user.github.io/my-site/recipes.html").unwrap();
        assert_eq!(site.base_path().as_str(), "/my-site/");
        assert_eq!(
            site.data_url().unwrap(),
            "https://user.github.io/my-site/data/recipes.json"
        );
    }

    #[test]
    fn test_site_with_root_deployment() {
        let config = SiteConfig {
            deployment: DeploymentMode::Root,
            ..Default::default()
        };
        let site = Site::new(config, "https://example.com/about").unwrap();
        assert_eq!(site.base_path().as_str(), "/");
        assert_eq!(site.data_url().unwrap(), "https://example.com/data/recipes.json");
    }

    #[test]
    fn test_invalid_page_url() {
        let err = Site::new(SiteConfig::default(), "not a url").unwrap_err();
        assert!(matches!(err, SiteError::InvalidUrl(_)));
    }

    #[test]
    fn test_header_links_are_normalized() {
        let site = Site::new(SiteConfig::default(), "https://user.github.io/my-site/").unwrap();
        let document = Document {
            header: site.header(),
            ..Default::default()
        };
        let hrefs: Vec<&str> = document
            .links()
            .into_iter()
            .filter_map(|a| a.get_attr("href"))
            .collect();
        assert_eq!(
            hrefs,
            vec![
                "/my-site/",
                "/my-site/",
                "/my-site/recipes",
                "/my-site/about",
                "/my-site/contact"
            ]
        );
    }

    #[test]
    fn test_document_html_shell() {
        let document = Document {
            title: "Recipes | Prashant Cooks".to_string(),
            body: vec![Element::new("p").text("hi").into()],
            ..Default::default()
        };
        let html = document.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Recipes | Prashant Cooks</title>"));
        assert!(html.contains(r#"<main class="container"><p>hi</p></main>"#));
    }
}
