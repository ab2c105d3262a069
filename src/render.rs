//! HTML templates for recipe cards, the recipe page and error panels.
//!
//! Every batch of nodes handed back to a page has already been passed through
//! the [`LinkRewriter`], so links are clean for the current deployment.

use url::form_urlencoded;

use crate::dom::{Element, Node};
use crate::links::LinkRewriter;
use crate::model::Recipe;
use crate::routing::BasePath;
use crate::utils::{difficulty_color, format_time, placeholder_image, youtube_id};

/// Everything a recipe card shows, with URLs already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub time: String,
    pub difficulty: String,
    pub categories: Vec<String>,
    pub href: String,
    pub image_src: String,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    rewriter: LinkRewriter,
    image_dir: String,
}

fn icon(name: &str) -> Node {
    Element::new("span").class("material-icons").text(name).into()
}

impl Renderer {
    pub fn new(rewriter: LinkRewriter, image_dir: impl Into<String>) -> Self {
        Self {
            rewriter,
            image_dir: image_dir.into(),
        }
    }

    pub fn base_path(&self) -> &BasePath {
        self.rewriter.base_path()
    }

    pub fn rewriter(&self) -> &LinkRewriter {
        &self.rewriter
    }

    /// Base-aware URL of the recipe's image, if it has one.
    pub fn image_url(&self, recipe: &Recipe) -> Option<String> {
        recipe.image.as_deref().map(|image| {
            self.base_path()
                .asset(&format!("{}/{}", self.image_dir.trim_matches('/'), image))
        })
    }

    pub fn card(&self, recipe: &Recipe) -> RecipeCard {
        RecipeCard {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            description: recipe.description_or_empty().to_string(),
            time: format_time(&recipe.time).to_string(),
            difficulty: recipe.difficulty.clone(),
            categories: recipe.category.clone(),
            href: recipe_href(&recipe.id),
            image_src: self
                .image_url(recipe)
                .unwrap_or_else(|| placeholder_image(&recipe.title, 400, 200)),
        }
    }

    /// Contents of `.recipes-grid`: one card per recipe, or the empty state.
    pub fn recipe_grid(&self, recipes: &[&Recipe]) -> Vec<Node> {
        let mut nodes: Vec<Node> = if recipes.is_empty() {
            vec![Element::new("div")
                .class("empty-state")
                .child(icon("search_off"))
                .child(Element::new("h3").text("No recipes found"))
                .child(Element::new("p").text(
                    "Try adjusting your search or filters to find what you're looking for.",
                ))
                .into()]
        } else {
            recipes
                .iter()
                .map(|recipe| card_node(&self.card(recipe)))
                .collect()
        };
        self.rewriter.after_insert(&mut nodes);
        nodes
    }

    /// Contents of `.recipe-container` for a single recipe.
    pub fn recipe_page(&self, recipe: &Recipe) -> Vec<Node> {
        let mut header = Element::new("div")
            .class("recipe-header")
            .child(Element::new("h1").text(recipe.title.as_str()))
            .child(
                Element::new("div")
                    .class("recipe-meta")
                    .child(meta_item("schedule", "Time:", format_time(&recipe.time)))
                    .child(meta_item("assessment", "Difficulty:", &recipe.difficulty))
                    .child(meta_item("folder", "Categories:", &recipe.category.join(", "))),
            );
        if let Some(src) = self.image_url(recipe) {
            header = header.child(image(
                &src,
                &recipe.title,
                "recipe-image",
                placeholder_image(&recipe.title, 800, 400),
            ));
        }
        if let Some(description) = recipe.description.as_deref().filter(|d| !d.is_empty()) {
            header = header.child(Element::new("p").class("recipe-description").text(description));
        }

        let mut nodes: Vec<Node> = vec![
            header.into(),
            Element::new("div")
                .class("action-buttons")
                .child(
                    Element::new("button")
                        .class("btn btn-primary")
                        .attr("onclick", "window.print()")
                        .child(icon("print"))
                        .text(" Print Recipe"),
                )
                .into(),
        ];

        if let Some(video) = recipe.youtube.as_deref().filter(|v| !v.is_empty()) {
            nodes.push(
                Element::new("div")
                    .class("youtube-embed")
                    .child(
                        Element::new("iframe")
                            .attr(
                                "src",
                                format!("https://www.youtube.com/embed/{}", youtube_id(video)),
                            )
                            .attr("frameborder", "0")
                            .attr(
                                "allow",
                                "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
                            )
                            .attr("allowfullscreen", "")
                            .attr("loading", "lazy"),
                    )
                    .into(),
            );
        }

        nodes.push(
            Element::new("div")
                .class("recipe-content")
                .child(
                    Element::new("div")
                        .class("ingredients-section")
                        .child(Element::new("h2").text("Ingredients"))
                        .child(list("ul", "ingredients-list", &recipe.ingredients)),
                )
                .child(
                    Element::new("div")
                        .class("steps-section")
                        .child(Element::new("h2").text("Instructions"))
                        .child(list("ol", "steps-list", &recipe.steps)),
                )
                .into(),
        );

        if let Some(nutrition) = recipe.nutrition.as_deref().filter(|n| !n.is_empty()) {
            nodes.push(
                Element::new("div")
                    .class("nutrition-info")
                    .child(Element::new("h3").text("Nutrition Information"))
                    .child(Element::new("p").text(nutrition))
                    .into(),
            );
        }

        self.rewriter.after_insert(&mut nodes);
        nodes
    }

    /// Replacement for the page container when the recipe cannot be shown.
    pub fn error_panel(&self, message: &str) -> Vec<Node> {
        let mut nodes: Vec<Node> = vec![Element::new("div")
            .class("error-message")
            .child(
                Element::new("h2")
                    .child(icon("error_outline"))
                    .text("Error"),
            )
            .child(Element::new("p").text(message))
            .child(
                Element::new("a")
                    .attr("href", "recipes.html")
                    .class("btn btn-primary")
                    .child(icon("arrow_back"))
                    .text(" Back to Recipes"),
            )
            .into()];
        self.rewriter.after_insert(&mut nodes);
        nodes
    }

    /// Inline notice inserted above the listing when loading fails.
    pub fn listing_error(&self, message: &str) -> Node {
        Element::new("div")
            .class("error-message")
            .text(message)
            .into()
    }
}

/// Link to the detail page with `id` form-encoded into the query.
pub fn recipe_href(id: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("id", id)
        .finish();
    format!("recipe.html?{}", query)
}

fn card_node(card: &RecipeCard) -> Node {
    let categories = card
        .categories
        .iter()
        .map(|category| {
            Node::from(
                Element::new("span")
                    .class("category-tag")
                    .text(category.as_str()),
            )
        })
        .collect::<Vec<Node>>();

    Element::new("article")
        .class("recipe-card")
        .attr("data-id", card.id.as_str())
        .child(
            Element::new("a")
                .class("recipe-card-link")
                .attr("href", card.href.as_str())
                .child(
                    Element::new("div")
                        .class("recipe-card-image-wrapper")
                        .child(image(
                            &card.image_src,
                            &card.title,
                            "recipe-card-image",
                            placeholder_image(&card.title, 400, 200),
                        )),
                )
                .child(
                    Element::new("div")
                        .class("recipe-card-content")
                        .child(Element::new("h3").class("recipe-card-title").text(card.title.as_str()))
                        .child(
                            Element::new("div")
                                .class("recipe-card-meta")
                                .child(Element::new("span").child(icon("schedule")).text(format!(" {}", card.time)))
                                .child(
                                    Element::new("span")
                                        .class("difficulty-badge")
                                        .attr(
                                            "style",
                                            format!("color: {}", difficulty_color(&card.difficulty)),
                                        )
                                        .child(icon("assessment"))
                                        .text(format!(" {}", card.difficulty)),
                                ),
                        )
                        .child(
                            Element::new("p")
                                .class("recipe-card-description")
                                .text(card.description.as_str()),
                        )
                        .child(
                            Element::new("div")
                                .class("recipe-card-categories")
                                .children(categories),
                        ),
                ),
        )
        .into()
}

fn image(src: &str, alt: &str, class: &str, fallback: String) -> Element {
    Element::new("img")
        .attr("src", src)
        .attr("alt", alt)
        .class(class)
        .attr("data-src", src)
        .attr("loading", "lazy")
        .attr("onerror", format!("this.onerror=null;this.src='{}'", fallback))
}

fn meta_item(icon_name: &str, label: &str, value: &str) -> Node {
    Element::new("div")
        .class("meta-item")
        .child(Element::new("strong").child(icon(icon_name)).text(format!(" {}", label)))
        .text(format!(" {}", value))
        .into()
}

fn list(tag: &str, class: &str, items: &[String]) -> Node {
    Element::new(tag)
        .class(class)
        .children(
            items
                .iter()
                .map(|item| Node::from(Element::new("li").text(item.as_str()))),
        )
        .into()
}
