//! Search-engine and social-card metadata for the recipe detail page.

use serde::Serialize;

use crate::dom::{Element, Node};
use crate::model::Recipe;

/// Whether a meta tag is keyed by `property` (Open Graph, Twitter) or `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    Property,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub key: String,
    pub content: String,
}

impl MetaTag {
    fn new(key: &str, content: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            content: content.into(),
        }
    }

    pub fn key_kind(&self) -> MetaKey {
        if self.key.starts_with("og:") || self.key.starts_with("twitter:") {
            MetaKey::Property
        } else {
            MetaKey::Name
        }
    }

    pub fn to_node(&self) -> Node {
        let attr = match self.key_kind() {
            MetaKey::Property => "property",
            MetaKey::Name => "name",
        };
        Element::new("meta")
            .attr(attr, self.key.as_str())
            .attr("content", self.content.as_str())
            .into()
    }
}

pub fn page_title(recipe: &Recipe, site_name: &str) -> String {
    format!("{} | {}", recipe.title, site_name)
}

/// Meta tags for a recipe page. `image_url` is the resolved image location, if any.
pub fn meta_tags(
    recipe: &Recipe,
    site_name: &str,
    page_url: &str,
    image_url: Option<&str>,
) -> Vec<MetaTag> {
    let title = page_title(recipe, site_name);
    let description = recipe.description_or_empty();
    let image = image_url.unwrap_or("");
    vec![
        MetaTag::new("og:title", title.as_str()),
        MetaTag::new("og:description", description),
        MetaTag::new("og:image", image),
        MetaTag::new("og:url", page_url),
        MetaTag::new("og:type", "article"),
        MetaTag::new("description", description),
        MetaTag::new("twitter:card", "summary_large_image"),
        MetaTag::new("twitter:title", title.as_str()),
        MetaTag::new("twitter:description", description),
        MetaTag::new("twitter:image", image),
    ]
}

#[derive(Debug, Serialize)]
pub struct RecipeStructuredData<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    description: &'a str,
    image: String,
    #[serde(rename = "prepTime")]
    prep_time: &'a str,
    #[serde(rename = "cookTime")]
    cook_time: &'a str,
    #[serde(rename = "totalTime")]
    total_time: &'a str,
    #[serde(rename = "recipeCategory")]
    recipe_category: String,
    #[serde(rename = "recipeDifficulty")]
    recipe_difficulty: &'a str,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: &'a [String],
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Vec<HowToStep<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nutrition: Option<NutritionInformation<'a>>,
}

#[derive(Debug, Serialize)]
struct HowToStep<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    position: usize,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct NutritionInformation<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    calories: &'a str,
}

/// schema.org `Recipe` payload for a JSON-LD script tag.
pub fn structured_data<'a>(recipe: &'a Recipe, image_url: Option<&str>) -> RecipeStructuredData<'a> {
    RecipeStructuredData {
        context: "https://schema.org",
        kind: "Recipe",
        name: &recipe.title,
        description: recipe.description_or_empty(),
        image: image_url.unwrap_or("").to_string(),
        prep_time: &recipe.time,
        cook_time: &recipe.time,
        total_time: &recipe.time,
        recipe_category: recipe.category.join(", "),
        recipe_difficulty: &recipe.difficulty,
        recipe_ingredient: &recipe.ingredients,
        recipe_instructions: recipe
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| HowToStep {
                kind: "HowToStep",
                position: index + 1,
                text: step,
            })
            .collect(),
        nutrition: recipe.nutrition.as_deref().map(|calories| NutritionInformation {
            kind: "NutritionInformation",
            calories,
        }),
    }
}

/// `<script type="application/ld+json" data-recipe="true">` holding the payload.
pub fn structured_data_script(data: &RecipeStructuredData<'_>) -> Result<Node, serde_json::Error> {
    // "</" inside a script body would end the element early
    let json = serde_json::to_string(data)?.replace("</", "<\\/");
    Ok(Element::new("script")
        .attr("type", "application/ld+json")
        .attr("data-recipe", "true")
        .child(Node::Raw(json))
        .into())
}
