use thiserror::Error;

/// Errors that can occur while loading and presenting recipes
#[derive(Error, Debug)]
pub enum SiteError {
    /// The recipe collection could not be fetched or parsed
    #[error("Failed to load recipes: {0}")]
    LoadFailure(String),

    /// The collection loaded but holds no recipe for the requested id
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// The detail page was opened without an `id` query parameter
    #[error("No recipe ID provided")]
    MissingId,

    /// A page URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl SiteError {
    /// Message shown to the visitor in place of the page content.
    pub fn user_message(&self) -> &'static str {
        match self {
            SiteError::LoadFailure(_) => "Failed to load recipes. Please refresh the page.",
            SiteError::NotFound(_) => "Recipe not found",
            SiteError::MissingId => "No recipe ID provided",
            SiteError::InvalidUrl(_) | SiteError::ConfigError(_) => {
                "Something went wrong. Please try again."
            }
        }
    }

    pub fn is_load_failure(&self) -> bool {
        matches!(self, SiteError::LoadFailure(_))
    }
}

impl From<reqwest::Error> for SiteError {
    fn from(err: reqwest::Error) -> Self {
        SiteError::LoadFailure(err.to_string())
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::LoadFailure(format!("invalid recipe data: {}", err))
    }
}

impl From<std::io::Error> for SiteError {
    fn from(err: std::io::Error) -> Self {
        SiteError::LoadFailure(err.to_string())
    }
}
