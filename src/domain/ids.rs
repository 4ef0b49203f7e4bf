//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for the identifiers Setport passes
//! between the host and the core. The split between [`ElementId`] and
//! [`IdentityToken`] is the heart of cross-document bookkeeping: an
//! `ElementId` is only meaningful inside the document instance that produced
//! it, while an `IdentityToken` survives copies and saves of the same model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host-local element reference
///
/// Valid only within one open document instance. Never store an `ElementId`
/// across a close/reopen boundary or compare ids from different documents;
/// route cross-document bookkeeping through [`IdentityToken`] instead.
///
/// # Examples
///
/// ```
/// use setport::domain::ids::ElementId;
///
/// let id = ElementId::new(316_402);
/// assert_eq!(id.value(), 316_402);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(i64);

impl ElementId {
    /// Creates a new ElementId
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durable, document-independent identity of one logical element
///
/// Stable across save/copy operations on the same model lineage. Not every
/// element has one.
///
/// # Examples
///
/// ```
/// use setport::domain::ids::IdentityToken;
/// use std::str::FromStr;
///
/// let token = IdentityToken::from_str("9f1c2e7a-0b4d-4f61-8d0a-3c2b1e5f7a90-0004d3a2").unwrap();
/// assert!(token.as_str().starts_with("9f1c2e7a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityToken(String);

impl IdentityToken {
    /// Creates a new IdentityToken from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(IdentityToken)` if the token is non-empty, `Err` otherwise
    pub fn new(token: impl Into<String>) -> Result<Self, String> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err("Identity token cannot be empty".to_string());
        }
        Ok(Self(token))
    }

    /// Generates a fresh random token
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IdentityToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for IdentityToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Element category name
///
/// Categories compare case-insensitively; the stored form is lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Creates a category, normalizing to lowercase
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    /// The structural wall category used as the default recenter anchor
    pub fn walls() -> Self {
        Self::new("walls")
    }

    /// Returns the category name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}
