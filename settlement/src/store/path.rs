//! Store paths (`orders/<id>`, `adminSettings`, ...)

use std::fmt;

use crate::utils::{AppError, AppResult};

/// Characters the store rejects inside a key
const FORBIDDEN: &[char] = &['.', '#', '$', '[', ']'];

/// Normalized slash-separated path into the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorePath(String);

impl StorePath {
    pub const ORDERS: &'static str = "orders";
    pub const RESTAURANTS: &'static str = "restaurants";
    pub const ADMIN_SETTINGS: &'static str = "adminSettings";
    pub const USERS: &'static str = "users";
    pub const DELIVERY_PARTNERS: &'static str = "deliveryPartners";

    /// Parse and normalize a path. Leading/trailing slashes and empty
    /// segments are dropped; the result must have at least one segment.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Err(AppError::invalid_path(raw));
        }
        for segment in &segments {
            if segment.contains(FORBIDDEN) || segment.chars().any(char::is_control) {
                return Err(AppError::invalid_path(raw));
            }
        }
        Ok(Self(segments.join("/")))
    }

    pub fn child(&self, key: &str) -> AppResult<Self> {
        if key.is_empty() || key.contains('/') {
            return Err(AppError::invalid_path(format!("{}/{}", self.0, key)));
        }
        Self::parse(&format!("{}/{}", self.0, key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Last segment
    pub fn key(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// `self` equals `other` or lies above it
    pub fn is_ancestor_of(&self, other: &StorePath) -> bool {
        other.0 == self.0
            || (other.0.len() > self.0.len()
                && other.0.starts_with(&self.0)
                && other.0.as_bytes()[self.0.len()] == b'/')
    }

    /// A write at one path changes what a reader of the other sees
    pub fn overlaps(&self, other: &StorePath) -> bool {
        self.is_ancestor_of(other) || other.is_ancestor_of(self)
    }

    // ========== Well-known locations ==========

    pub fn orders() -> Self {
        Self(Self::ORDERS.to_string())
    }

    pub fn order(id: &str) -> AppResult<Self> {
        Self::orders().child(id)
    }

    pub fn restaurants() -> Self {
        Self(Self::RESTAURANTS.to_string())
    }

    pub fn restaurant(id: &str) -> AppResult<Self> {
        Self::restaurants().child(id)
    }

    pub fn admin_settings() -> Self {
        Self(Self::ADMIN_SETTINGS.to_string())
    }

    pub fn users() -> Self {
        Self(Self::USERS.to_string())
    }

    pub fn delivery_partners() -> Self {
        Self(Self::DELIVERY_PARTNERS.to_string())
    }

    pub fn delivery_partner(id: &str) -> AppResult<Self> {
        Self::delivery_partners().child(id)
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;

    #[test]
    fn test_parse_normalizes_slashes() {
        let p = StorePath::parse("/orders//o1/").unwrap();
        assert_eq!(p.as_str(), "orders/o1");
        assert_eq!(p.key(), "o1");
        assert_eq!(p.segments().collect::<Vec<_>>(), vec!["orders", "o1"]);
    }

    #[test]
    fn test_parse_rejects_bad_paths() {
        assert_eq!(StorePath::parse("").unwrap_err().code, ErrorCode::InvalidStorePath);
        assert_eq!(StorePath::parse("///").unwrap_err().code, ErrorCode::InvalidStorePath);
        assert!(StorePath::parse("orders/a.b").is_err());
        assert!(StorePath::parse("orders/$x").is_err());
        assert!(StorePath::orders().child("").is_err());
        assert!(StorePath::orders().child("a/b").is_err());
    }

    #[test]
    fn test_ancestry() {
        let orders = StorePath::orders();
        let o1 = StorePath::order("o1").unwrap();
        let ordersx = StorePath::parse("ordersx").unwrap();

        assert!(orders.is_ancestor_of(&o1));
        assert!(orders.is_ancestor_of(&orders));
        assert!(!o1.is_ancestor_of(&orders));
        assert!(!orders.is_ancestor_of(&ordersx));
        assert!(o1.overlaps(&orders));
        assert!(!StorePath::restaurants().overlaps(&o1));
    }
}
