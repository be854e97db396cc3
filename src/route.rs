//! Navigation paths to routes.
//!
//! ```text
//! /                          → Home
//! /index.html                → Home
//! /blog/happy-new-year       → Post("happy-new-year")
//! /blog/happy-new-year/      → Post("happy-new-year")
//! /blog/happy-new-year/index.html → Post("happy-new-year")
//! anything else              → Unknown
//! ```

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Post(String),
    Unknown(String),
}

impl Route {
    /// Parse a request path. `url_prefix` is the `[blog]` prefix, e.g. `/blog`.
    pub fn parse(path: &str, url_prefix: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.strip_suffix("/index.html").unwrap_or(path);
        let trimmed = trimmed.trim_end_matches('/');

        if trimmed.is_empty() || trimmed == "index.html" {
            return Route::Home;
        }

        let prefix = url_prefix.trim_end_matches('/');
        let rest = if prefix.is_empty() {
            trimmed.strip_prefix('/')
        } else {
            trimmed
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('/'))
        };

        match rest {
            Some(id) if !id.is_empty() && !id.contains('/') => Route::Post(id.to_string()),
            _ => Route::Unknown(path.to_string()),
        }
    }
}
