use std::collections::BTreeSet;

use log::debug;

use crate::model::Recipe;

/// Search box contents and active facet buttons of the listing page.
///
/// Facets combine with AND across groups and OR within a group. An empty
/// group places no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub active_categories: BTreeSet<String>,
    pub active_difficulties: BTreeSet<String>,
}

impl FilterState {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.active_categories.insert(category.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.active_difficulties.insert(difficulty.into());
        self
    }

    /// Flip a category button. Returns whether the category is now active.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        toggle(&mut self.active_categories, category)
    }

    /// Flip a difficulty button. Returns whether the difficulty is now active.
    pub fn toggle_difficulty(&mut self, difficulty: &str) -> bool {
        toggle(&mut self.active_difficulties, difficulty)
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.active_categories.is_empty()
            && self.active_difficulties.is_empty()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        let term = self.search_term.trim().to_lowercase();
        matches_search(recipe, &term)
            && self.matches_category(recipe)
            && self.matches_difficulty(recipe)
    }

    fn matches_category(&self, recipe: &Recipe) -> bool {
        self.active_categories.is_empty()
            || recipe
                .category
                .iter()
                .any(|category| self.active_categories.contains(category))
    }

    fn matches_difficulty(&self, recipe: &Recipe) -> bool {
        self.active_difficulties.is_empty() || self.active_difficulties.contains(&recipe.difficulty)
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}

/// `term` must already be trimmed and lowercased.
fn matches_search(recipe: &Recipe, term: &str) -> bool {
    term.is_empty()
        || recipe.title.to_lowercase().contains(term)
        || recipe.description_or_empty().to_lowercase().contains(term)
        || recipe
            .category
            .iter()
            .any(|category| category.to_lowercase().contains(term))
}

/// Recipes passing `state`, in collection order.
pub fn apply<'a>(recipes: &'a [Recipe], state: &FilterState) -> Vec<&'a Recipe> {
    let filtered: Vec<&Recipe> = recipes.iter().filter(|recipe| state.matches(recipe)).collect();
    debug!(
        "Filter {:?} matched {} of {} recipes",
        state,
        filtered.len(),
        recipes.len()
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str, title: &str, difficulty: &str, category: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: title.to_string(),
            difficulty: difficulty.to_string(),
            category: category.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Recipe> {
        vec![
            Recipe {
                description: Some("Fluffy and quick".to_string()),
                ..recipe("omelette", "Masala Omelette", "Medium", &["Breakfast"])
            },
            recipe("dal", "Dal Tadka", "Easy", &["Indian", "Vegetarian"]),
            recipe("curry", "Egg Curry", "Hard", &["Indian"]),
        ]
    }

    fn ids(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_default_state_returns_everything_in_order() {
        let recipes = sample();
        let result = apply(&recipes, &FilterState::default());
        assert_eq!(ids(&result), vec!["omelette", "dal", "curry"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title() {
        let recipes = sample();
        let state = FilterState::default().with_search("eGG cU");
        assert_eq!(ids(&apply(&recipes, &state)), vec!["curry"]);
    }

    #[test]
    fn test_search_matches_description_and_category() {
        let recipes = sample();
        let state = FilterState::default().with_search("fluffy");
        assert_eq!(ids(&apply(&recipes, &state)), vec!["omelette"]);

        let state = FilterState::default().with_search("indian");
        assert_eq!(ids(&apply(&recipes, &state)), vec!["dal", "curry"]);
    }

    #[test]
    fn test_whitespace_search_matches_everything() {
        let recipes = sample();
        let state = FilterState::default().with_search("   ");
        assert_eq!(apply(&recipes, &state).len(), 3);
    }

    #[test]
    fn test_categories_are_or_within_group() {
        let recipes = sample();
        let state = FilterState::default()
            .with_category("Breakfast")
            .with_category("Vegetarian");
        assert_eq!(ids(&apply(&recipes, &state)), vec!["omelette", "dal"]);
    }

    #[test]
    fn test_groups_are_and_combined() {
        let recipes = sample();
        let state = FilterState::default()
            .with_category("Indian")
            .with_difficulty("Hard");
        assert_eq!(ids(&apply(&recipes, &state)), vec!["curry"]);
    }

    #[test]
    fn test_unmatched_facet_value_empties_result() {
        let recipes = sample();
        let state = FilterState::default()
            .with_difficulty("Impossible")
            .with_difficulty("Easy")
            .with_category("Dessert");
        assert!(apply(&recipes, &state).is_empty());

        let state = FilterState::default().with_difficulty("Impossible");
        assert!(apply(&recipes, &state).is_empty());
    }

    #[test]
    fn test_missing_optional_fields_do_not_break_matching() {
        let recipes = vec![Recipe {
            id: "bare".to_string(),
            ..Default::default()
        }];
        assert_eq!(apply(&recipes, &FilterState::default()).len(), 1);
        assert!(apply(&recipes, &FilterState::default().with_search("x")).is_empty());
        assert!(apply(&recipes, &FilterState::default().with_category("x")).is_empty());
    }

    #[test]
    fn test_toggle_facets() {
        let mut state = FilterState::default();
        assert!(state.toggle_category("Indian"));
        assert!(state.toggle_difficulty("Easy"));
        assert!(!state.is_empty());
        assert!(!state.toggle_category("Indian"));
        assert!(!state.toggle_difficulty("Easy"));
        assert!(state.is_empty());
    }

    #[test]
    fn test_matches_agrees_with_apply() {
        let recipes = sample();
        let state = FilterState::default().with_search("dal").with_difficulty("Easy");
        let direct: Vec<&Recipe> = recipes.iter().filter(|r| state.matches(r)).collect();
        assert_eq!(ids(&direct), ids(&apply(&recipes, &state)));
    }
}
