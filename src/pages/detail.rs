use log::{debug, warn};
use reqwest::Url;

use super::{Document, Site};
use crate::error::SiteError;
use crate::model::Recipe;
use crate::seo;
use crate::store::{RecipeSource, RecipeStore};

/// Message shown on the recipe page when the data file cannot be loaded.
const DETAIL_LOAD_FAILURE: &str = "Failed to load recipe. Please try again.";

/// Recipe id from the `id` query parameter. Empty values count as missing.
pub fn recipe_id(url: &Url) -> Result<String, SiteError> {
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
        .ok_or(SiteError::MissingId)
}

/// The single-recipe page.
pub struct DetailPage<'a> {
    site: &'a Site,
}

impl<'a> DetailPage<'a> {
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load the collection and build the page, or the error to show instead.
    ///
    /// The id is checked before anything is fetched.
    pub async fn build(&self, source: &dyn RecipeSource) -> Result<Document, SiteError> {
        let id = recipe_id(self.site.url())?;
        let store = RecipeStore::load(source).await?;
        self.build_from_store(&store, &id)
    }

    pub fn build_from_store(&self, store: &RecipeStore, id: &str) -> Result<Document, SiteError> {
        let recipe = store
            .find_by_id(id)
            .ok_or_else(|| SiteError::NotFound(id.to_string()))?;
        debug!("Rendering recipe '{}'", recipe.id);
        self.recipe_document(recipe)
    }

    fn recipe_document(&self, recipe: &Recipe) -> Result<Document, SiteError> {
        let site_name = &self.site.config().site_name;
        let renderer = self.site.renderer();
        let image_url = renderer.image_url(recipe);
        let data = seo::structured_data(recipe, image_url.as_deref());
        let script = seo::structured_data_script(&data)?;

        Ok(Document {
            title: seo::page_title(recipe, site_name),
            meta: seo::meta_tags(
                recipe,
                site_name,
                self.site.url().as_str(),
                image_url.as_deref(),
            ),
            head: vec![script],
            header: self.site.header(),
            body: renderer.recipe_page(recipe),
        })
    }

    /// Build the page, falling back to an error panel with a link back to the listing.
    pub async fn render(&self, source: &dyn RecipeSource) -> Document {
        match self.build(source).await {
            Ok(document) => document,
            Err(error) => self.error_document(&error),
        }
    }

    pub fn error_document(&self, error: &SiteError) -> Document {
        let message = match error {
            SiteError::LoadFailure(_) => DETAIL_LOAD_FAILURE,
            other => other.user_message(),
        };
        warn!("Showing recipe error: {}", error);
        Document {
            title: format!("Recipe | {}", self.site.config().site_name),
            header: self.site.header(),
            body: self.site.renderer().error_panel(message),
            ..Default::default()
        }
    }
}
