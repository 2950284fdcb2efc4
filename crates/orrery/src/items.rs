use crate::theme::ColorTheme;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemName(String);

crate::impl_string_newtype!(ItemName);

/// Same-document anchor, `#section-id`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Href(String);

crate::impl_string_newtype!(Href);

impl Href {
    /// The element id the anchor points at, if the href is well formed.
    pub fn section_id(&self) -> Option<&str> {
        self.0
            .strip_prefix('#')
            .filter(|id| !id.is_empty() && !id.contains(char::is_whitespace))
    }
}

/// Opaque handle of the glyph drawn inside an item.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconRef(String);

crate::impl_string_newtype!(IconRef);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub name: ItemName,
    pub href: Href,
    pub icon: IconRef,
    pub theme: ColorTheme,
}

impl NavItem {
    pub fn new(name: &str, href: &str, icon: &str, theme: ColorTheme) -> Self {
        Self {
            name: ItemName::new(name),
            href: Href::new(href),
            icon: IconRef::new(icon),
            theme,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItemError {
    #[error("Navigation needs at least one item")]
    Empty,
    #[error("Item {0} has no name")]
    MissingName(usize),
    #[error("Item '{0}' has no href")]
    MissingHref(String),
    #[error("Item '{name}' has href '{href}', expected '#section-id'")]
    InvalidHref { name: String, href: String },
    #[error("Item name '{0}' is used more than once")]
    DuplicateName(String),
}

/// The fixed, validated item sequence. Its length never changes after construction.
#[derive(Debug, Clone, PartialEq, Deref)]
pub struct NavItems(Vec<NavItem>);

impl NavItems {
    pub fn new(items: Vec<NavItem>) -> Result<Self, ItemError> {
        if items.is_empty() {
            return Err(ItemError::Empty);
        }

        let mut seen = HashSet::new();
        for (i, item) in items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(ItemError::MissingName(i));
            }
            if item.href.is_empty() {
                return Err(ItemError::MissingHref(item.name.to_string()));
            }
            if item.href.section_id().is_none() {
                return Err(ItemError::InvalidHref {
                    name: item.name.to_string(),
                    href: item.href.to_string(),
                });
            }
            if !seen.insert(item.name.as_str()) {
                return Err(ItemError::DuplicateName(item.name.to_string()));
            }
        }

        Ok(Self(items))
    }

    /// Home, Projects, Skills, Contact.
    pub fn defaults() -> Self {
        Self(vec![
            NavItem::new("Home", "#home", "planet", ColorTheme::Cyan),
            NavItem::new("Projects", "#projects", "rocket", ColorTheme::Violet),
            NavItem::new("Skills", "#skills", "sparkle", ColorTheme::Rose),
            NavItem::new("Contact", "#contact", "meteor", ColorTheme::Amber),
        ])
    }
}

impl Default for NavItems {
    fn default() -> Self {
        Self::defaults()
    }
}
