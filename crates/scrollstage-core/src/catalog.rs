#![forbid(unsafe_code)]

//! Content catalog: the ordered items a timeline walks through.
//!
//! Each [`ContentItem`] pairs a card face (title, icon, gradient) with the
//! descriptive content shown while that item is active. Catalog order is
//! significant: it defines both card stacking order and content reveal order.
//!
//! # Invariants
//!
//! 1. A [`Catalog`] always holds at least one item.
//! 2. Item ids are unique within a catalog.
//! 3. A catalog is immutable once built; a new catalog means a new controller.

use std::collections::HashSet;
use std::fmt;

use crate::error::{ConfigurationError, TimelineError};

/// Unique key for a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Symbolic icon reference, resolved by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Icon(String);

impl Icon {
    /// Create an icon reference from its symbolic name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The symbolic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// What the stacked card shows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardFace {
    /// Card title.
    pub title: String,
    /// Icon drawn beside the title.
    pub icon: Icon,
    /// Gradient identifier understood by the presentation layer.
    pub gradient: String,
}

/// What the content panel shows while the item is active.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentBody {
    /// Panel heading.
    pub heading: String,
    /// Paragraph text.
    pub body: String,
    /// Ordered feature bullets.
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: Vec<String>,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentItem {
    /// Identity of the item.
    pub id: ItemId,
    /// Card face.
    pub card: CardFace,
    /// Content panel.
    pub content: ContentBody,
}

impl ContentItem {
    /// Create an item whose content heading defaults to the card title.
    pub fn new(id: u64, title: impl Into<String>, icon: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: ItemId(id),
            card: CardFace {
                title: title.clone(),
                icon: Icon::new(icon),
                gradient: String::new(),
            },
            content: ContentBody {
                heading: title,
                body: String::new(),
                features: Vec::new(),
            },
        }
    }

    /// Set the gradient identifier (builder).
    #[must_use]
    pub fn gradient(mut self, gradient: impl Into<String>) -> Self {
        self.card.gradient = gradient.into();
        self
    }

    /// Override the content heading (builder).
    #[must_use]
    pub fn heading(mut self, heading: impl Into<String>) -> Self {
        self.content.heading = heading.into();
        self
    }

    /// Set the paragraph text (builder).
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.content.body = body.into();
        self
    }

    /// Append feature bullets (builder).
    #[must_use]
    pub fn features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content
            .features
            .extend(features.into_iter().map(Into::into));
        self
    }
}

/// Ordered, validated, immutable sequence of [`ContentItem`]s.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<ContentItem>", into = "Vec<ContentItem>")
)]
pub struct Catalog {
    items: Vec<ContentItem>,
}

impl Catalog {
    /// Validate and wrap `items`.
    ///
    /// Fails with [`ConfigurationError::EmptyCatalog`] for an empty list and
    /// [`ConfigurationError::DuplicateId`] for the first repeated id.
    pub fn new(items: Vec<ContentItem>) -> Result<Self, TimelineError> {
        if items.is_empty() {
            crate::warn!("rejecting empty catalog");
            return Err(ConfigurationError::EmptyCatalog.into());
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                crate::warn!(id = item.id.0, "rejecting catalog with duplicate id");
                return Err(ConfigurationError::DuplicateId(item.id).into());
            }
        }
        crate::debug!(len = items.len(), "catalog built");
        Ok(Self { items })
    }

    /// Number of items (always at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ContentItem> {
        self.items.get(index)
    }

    /// Item with the given id.
    #[must_use]
    pub fn by_id(&self, id: ItemId) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Position of the item with the given id.
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Iterate items in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, ContentItem> {
        self.items.iter()
    }

    /// Items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ContentItem] {
        &self.items
    }
}

impl TryFrom<Vec<ContentItem>> for Catalog {
    type Error = TimelineError;

    fn try_from(items: Vec<ContentItem>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl From<Catalog> for Vec<ContentItem> {
    fn from(catalog: Catalog) -> Self {
        catalog.items
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ContentItem;
    type IntoIter = std::slice::Iter<'a, ContentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64) -> ContentItem {
        ContentItem::new(id, format!("Item {id}"), "zap")
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = Catalog::new(Vec::new()).unwrap_err();
        assert_eq!(
            err,
            TimelineError::Configuration(ConfigurationError::EmptyCatalog)
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![item(1), item(2), item(1)]).unwrap_err();
        assert_eq!(
            err,
            TimelineError::Configuration(ConfigurationError::DuplicateId(ItemId(1)))
        );
    }

    #[test]
    fn lookup_by_position_and_id() {
        let catalog = Catalog::new(vec![item(10), item(20), item(30)]).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(1).map(|i| i.id), Some(ItemId(20)));
        assert!(catalog.get(3).is_none());
        assert_eq!(catalog.position(ItemId(30)), Some(2));
        assert_eq!(
            catalog.by_id(ItemId(10)).map(|i| i.card.title.as_str()),
            Some("Item 10")
        );
        assert!(catalog.by_id(ItemId(99)).is_none());
    }

    #[test]
    fn order_is_preserved() {
        let catalog = Catalog::new(vec![item(3), item(1), item(2)]).unwrap();
        let ids: Vec<u64> = catalog.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn builder_fills_content() {
        let it = ContentItem::new(4, "Analytics", "bar-chart-3")
            .gradient("from-green-500 to-teal-500")
            .heading("Data Analytics & Insights")
            .body("Unlock the power of data.")
            .features(["Real-time Analytics", "Custom Dashboards"]);
        assert_eq!(it.card.title, "Analytics");
        assert_eq!(it.card.icon.name(), "bar-chart-3");
        assert_eq!(it.content.heading, "Data Analytics & Insights");
        assert_eq!(it.content.features.len(), 2);
    }
}
