//! Hypermedia link values

use serde::{Deserialize, Serialize};

/// One hypermedia control: where to go, what it means, and how to call it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL
    pub href: String,

    /// Relation name (e.g. "self", "next-page", "delete_author")
    pub rel: String,

    /// HTTP method (e.g. "GET", "DELETE")
    pub method: String,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }

    pub fn get(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self::new(href, rel, "GET")
    }

    pub fn post(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self::new(href, rel, "POST")
    }

    pub fn delete(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self::new(href, rel, "DELETE")
    }
}

/// A collection response: shaped items under `value` and collection-level links
#[derive(Debug, Clone, Serialize)]
pub struct LinkedCollectionResource<T> {
    pub value: Vec<T>,
    pub links: Vec<Link>,
}

impl<T> LinkedCollectionResource<T> {
    pub fn new(value: Vec<T>, links: Vec<Link>) -> Self {
        Self { value, links }
    }
}
