//! Route locations and an in-memory navigation history.

use anyhow::{Result, anyhow};
use log::debug;
use reqwest::Url;
use std::sync::Mutex;

use super::Navigator;

// Only used to borrow `Url`'s path and query encoding.
const ROUTE_ORIGIN: &str = "http://localhost";

/// A navigation target: a route path plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path followed by the form-encoded query, e.g. `/login?redirect=%2Fuser`.
    pub fn full_path(&self) -> String {
        let Ok(mut url) = Url::parse(ROUTE_ORIGIN).and_then(|base| base.join(&self.path)) else {
            return self.path.clone();
        };
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }
}

/// History stack of visited routes. The last entry is the current route.
#[derive(Debug)]
pub struct RouteHistory {
    entries: Mutex<Vec<String>>,
}

impl RouteHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(vec![initial.into()]),
        }
    }

    /// Navigate to `location`, adding a history entry.
    pub fn push(&self, location: &Location) -> Result<()> {
        let full_path = location.full_path();
        debug!("Pushing route {}", full_path);
        self.lock()?.push(full_path);
        Ok(())
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("Route history lock poisoned"))
    }
}

impl Navigator for RouteHistory {
    fn current_path(&self) -> String {
        self.entries().last().cloned().unwrap_or_else(|| "/".to_string())
    }

    fn replace(&self, location: &Location) -> Result<()> {
        let full_path = location.full_path();
        debug!("Replacing current route with {}", full_path);
        let mut entries = self.lock()?;
        match entries.last_mut() {
            Some(current) => *current = full_path,
            None => entries.push(full_path),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_path_encodes_query() {
        let location = Location::new("/login").with_query("redirect", "/user?id=1");
        assert_eq!(location.full_path(), "/login?redirect=%2Fuser%3Fid%3D1");
    }

    #[test]
    fn test_full_path_without_query() {
        assert_eq!(Location::new("/login").full_path(), "/login");
    }

    #[test]
    fn test_query_value_returns_first_match() {
        let location = Location::new("/")
            .with_query("a", "1")
            .with_query("a", "2");
        assert_eq!(location.query_value("a"), Some("1"));
        assert_eq!(location.query_value("b"), None);
    }

    #[test]
    fn test_replace_does_not_grow_history() {
        let history = RouteHistory::new("/home");
        history.push(&Location::new("/user")).unwrap();
        history
            .replace(&Location::new("/login").with_query("redirect", "/user"))
            .unwrap();

        assert_eq!(
            history.entries(),
            vec!["/home".to_string(), "/login?redirect=%2Fuser".to_string()]
        );
        assert_eq!(history.current_path(), "/login?redirect=%2Fuser");
    }

    #[test]
    fn test_current_path_of_new_history() {
        let history = RouteHistory::new("/settings?tab=2");
        assert_eq!(history.current_path(), "/settings?tab=2");
    }
}
