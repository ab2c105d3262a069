pub mod config;
pub mod dom;
pub mod error;
pub mod filter;
pub mod links;
pub mod model;
pub mod pages;
pub mod render;
pub mod routing;
pub mod seo;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::SiteConfig;
pub use error::SiteError;
pub use filter::FilterState;
pub use links::LinkRewriter;
pub use model::{Recipe, RecipeCollection};
pub use pages::{DetailPage, Document, ListingPage, Site};
pub use routing::{BasePath, Deployment};
pub use store::{FileSource, HttpSource, RecipeSource, RecipeStore};

/// Build the recipes listing page with `state` applied, reading data from `source`.
///
/// Load failures produce the listing's error page rather than an `Err`.
pub async fn listing_page(
    site: Site,
    source: &dyn RecipeSource,
    state: FilterState,
) -> Document {
    match ListingPage::load(site.clone(), source).await {
        Ok(page) => page.with_filter_state(state).document(),
        Err(error) => ListingPage::error_document(&site, &error),
    }
}

/// Build the recipe detail page for `site`'s URL, reading data from `source`.
pub async fn detail_page(site: &Site, source: &dyn RecipeSource) -> Document {
    DetailPage::new(site).render(source).await
}
