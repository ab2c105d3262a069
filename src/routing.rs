//! Base path detection and clean URLs for static hosting.
//!
//! The same bundle is served from a domain root (`https://example.com/`) and
//! from project sub-paths (`https://user.github.io/my-site/`). Internal links
//! and asset paths are prefixed with the [`BasePath`] detected for the current
//! page.

use std::fmt;

/// How the base path of a deployment is determined.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Deployment {
    /// Treat an extension-less first path segment as the deployment sub-path.
    ///
    /// A root deployment whose current page is a bare segment such as `/about`
    /// is classified as a sub-path deployment of `about`. Use [`Deployment::Root`]
    /// for such sites.
    #[default]
    Auto,
    /// The site is served from the domain root.
    Root,
    /// The site is served under `/<segment>/`.
    SubPath(String),
}

/// URL path prefix of the deployment: either `/` or `/segment/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
    pub fn root() -> Self {
        BasePath("/".to_string())
    }

    pub fn sub_path(segment: &str) -> Self {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            Self::root()
        } else {
            BasePath(format!("/{}/", segment))
        }
    }

    /// Derive the base path from the path component of the current URL.
    pub fn resolve(current_path: &str) -> Self {
        match current_path.split('/').find(|segment| !segment.is_empty()) {
            Some(first) if !first.contains('.') => Self::sub_path(first),
            _ => Self::root(),
        }
    }

    pub fn for_deployment(deployment: &Deployment, current_path: &str) -> Self {
        match deployment {
            Deployment::Auto => Self::resolve(current_path),
            Deployment::Root => Self::root(),
            Deployment::SubPath(segment) => Self::sub_path(segment),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for any base other than the domain root.
    pub fn is_sub_path(&self) -> bool {
        self.0 != "/"
    }

    /// Clean, extension-less URL for an internal page.
    ///
    /// Leading slashes and a trailing `.html` are stripped before the base is
    /// prepended; the home page (`""` or `index`) maps to the base itself.
    pub fn to_clean_url(&self, path: &str) -> String {
        let trimmed = path.trim_start_matches('/');
        let clean = trimmed.strip_suffix(".html").unwrap_or(trimmed);
        if clean.is_empty() || clean == "index" {
            self.0.clone()
        } else {
            format!("{}{}", self.0, clean)
        }
    }

    /// Base-aware URL for a static asset such as an image or the data file.
    pub fn asset(&self, path: &str) -> String {
        format!("{}{}", self.0, path.trim_start_matches('/'))
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
