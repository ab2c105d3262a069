use std::sync::{Mutex, MutexGuard};

use log::warn;

use super::{Document, Site};
use crate::dom::{Element, Node};
use crate::error::SiteError;
use crate::filter::{self, FilterState};
use crate::store::{RecipeSource, RecipeStore};
use crate::utils::Debouncer;

/// The recipes page: search box, facet buttons and the card grid.
pub struct ListingPage {
    site: Site,
    store: RecipeStore,
    state: Mutex<FilterState>,
    debouncer: Debouncer,
}

impl ListingPage {
    pub fn new(site: Site, store: RecipeStore) -> Self {
        let debouncer = Debouncer::new(site.config().search_debounce());
        Self {
            site,
            store,
            state: Mutex::new(FilterState::default()),
            debouncer,
        }
    }

    /// Fetch the collection once. On failure the caller shows [`Self::error_document`].
    pub async fn load(site: Site, source: &dyn RecipeSource) -> Result<Self, SiteError> {
        let store = RecipeStore::load(source).await?;
        Ok(Self::new(site, store))
    }

    /// Page shown when the collection could not be loaded. Not retried.
    pub fn error_document(site: &Site, error: &SiteError) -> Document {
        warn!("Showing listing error: {}", error);
        Document {
            title: format!("Recipes | {}", site.config().site_name),
            header: site.header(),
            body: vec![site.renderer().listing_error(error.user_message())],
            ..Default::default()
        }
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn filter_state(&self) -> FilterState {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, FilterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start from `state` instead of the empty filter, e.g. from command-line options.
    pub fn with_filter_state(self, state: FilterState) -> Self {
        Self {
            state: Mutex::new(state),
            ..self
        }
    }

    /// Card grid for the current filter state.
    pub fn render_grid(&self) -> Vec<Node> {
        let state = self.filter_state();
        let filtered = filter::apply(self.store.recipes(), &state);
        self.site.renderer().recipe_grid(&filtered)
    }

    pub fn toggle_category(&self, category: &str) -> Vec<Node> {
        self.lock_state().toggle_category(category);
        self.render_grid()
    }

    pub fn toggle_difficulty(&self, difficulty: &str) -> Vec<Node> {
        self.lock_state().toggle_difficulty(difficulty);
        self.render_grid()
    }

    /// Search box input. Bursts of keystrokes are debounced, so only the
    /// last call in a burst re-renders; superseded calls return `None`.
    pub async fn search_input(&self, term: &str) -> Option<Vec<Node>> {
        self.debouncer
            .call(|| {
                self.lock_state().search_term = term.to_string();
                self.render_grid()
            })
            .await
    }

    /// Search box and facet buttons, reflecting the active filters.
    pub fn filter_controls(&self) -> Node {
        let state = self.filter_state();
        let category_buttons = self.store.categories().into_iter().map(|category| {
            facet_button("category", category, state.active_categories.contains(category))
        });
        let difficulty_buttons = self.store.difficulties().into_iter().map(|difficulty| {
            facet_button(
                "difficulty",
                difficulty,
                state.active_difficulties.contains(difficulty),
            )
        });

        Element::new("div")
            .class("filters")
            .child(
                Element::new("input")
                    .attr("type", "search")
                    .class("search-box")
                    .attr("placeholder", "Search recipes...")
                    .attr("value", state.search_term.as_str()),
            )
            .child(
                Element::new("div")
                    .class("filter-group")
                    .children(category_buttons),
            )
            .child(
                Element::new("div")
                    .class("filter-group")
                    .children(difficulty_buttons),
            )
            .into()
    }

    pub fn document(&self) -> Document {
        Document {
            title: format!("Recipes | {}", self.site.config().site_name),
            header: self.site.header(),
            body: vec![
                self.filter_controls(),
                Element::new("div")
                    .class("recipes-grid")
                    .children(self.render_grid())
                    .into(),
            ],
            ..Default::default()
        }
    }
}

fn facet_button(group: &str, value: &str, active: bool) -> Node {
    let class = if active {
        "filter-btn active"
    } else {
        "filter-btn"
    };
    Element::new("button")
        .class(class)
        .attr("data-filter", group)
        .attr("data-value", value)
        .text(value)
        .into()
}
