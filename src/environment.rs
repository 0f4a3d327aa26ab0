use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Origin used to resolve relative API paths when no reverse proxy origin is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Represents the deployment profiles the dashboard can be pointed at.
#[derive(Clone, Default, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Behind the production reverse proxy, which serves the API under `/api`.
    Production,
    /// Local development backend.
    #[default]
    Development,
}

impl Environment {
    /// Returns the API base path associated with the environment.
    ///
    /// The production value is relative and must be joined to an origin,
    /// see [`Environment::resolve_base_url`].
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "/api",
            Environment::Development => "http://localhost:8000",
        }
    }

    /// Resolves the absolute base URL, joining relative profile paths to `origin`.
    pub fn resolve_base_url(&self, origin: &str) -> String {
        let base = self.api_base_url();
        if base.starts_with('/') {
            format!("{}{}", origin.trim_end_matches('/'), base)
        } else {
            base.to_string()
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" => Ok(Environment::Development),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "Production"),
            Environment::Development => write!(f, "Development"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_base_url())
    }
}
