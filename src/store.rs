use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;

use crate::error::SiteError;
use crate::model::{Recipe, RecipeCollection};

/// Where the recipe data file is read from.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch the raw JSON document.
    async fn fetch(&self) -> Result<String, SiteError>;

    fn describe(&self) -> String;
}

/// Fetches `recipes.json` over HTTP.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SiteError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RecipeSource for HttpSource {
    async fn fetch(&self) -> Result<String, SiteError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(SiteError::LoadFailure(format!(
                "{} returned {}",
                self.url,
                response.status()
            )));
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads `recipes.json` from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecipeSource for FileSource {
    async fn fetch(&self) -> Result<String, SiteError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick a source for a location given on the command line or in config.
pub fn source_for(location: &str, timeout: Option<Duration>) -> Result<Box<dyn RecipeSource>, SiteError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

/// The full recipe collection, loaded once per page.
#[derive(Debug, Clone, Default)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    by_id: HashMap<String, usize>,
}

impl RecipeStore {
    /// Fetch and parse the collection. Any failure is a [`SiteError::LoadFailure`];
    /// there is no retry.
    pub async fn load(source: &dyn RecipeSource) -> Result<Self, SiteError> {
        let body = source.fetch().await.map_err(|e| {
            warn!("Error loading recipes from {}: {}", source.describe(), e);
            e
        })?;
        let store = Self::from_json(&body).map_err(|e| {
            warn!("Error parsing recipes from {}: {}", source.describe(), e);
            e
        })?;
        info!(
            "Loaded {} recipes from {}",
            store.len(),
            source.describe()
        );
        Ok(store)
    }

    pub fn from_json(body: &str) -> Result<Self, SiteError> {
        let collection: RecipeCollection = serde_json::from_str(body)?;
        Ok(Self::new(collection.recipes))
    }

    pub fn new(recipes: Vec<Recipe>) -> Self {
        let mut by_id = HashMap::with_capacity(recipes.len());
        for (index, recipe) in recipes.iter().enumerate() {
            if by_id.contains_key(&recipe.id) {
                warn!("Duplicate recipe id '{}', keeping the first", recipe.id);
                continue;
            }
            by_id.insert(recipe.id.clone(), index);
        }
        Self { recipes, by_id }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Recipe> {
        self.by_id.get(id).map(|&index| &self.recipes[index])
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.recipes.iter().flat_map(|r| r.category.iter().map(String::as_str)))
    }

    /// Distinct difficulties in first-seen order.
    pub fn difficulties(&self) -> Vec<&str> {
        distinct(self.recipes.iter().map(|r| r.difficulty.as_str()))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
