//! Display-ready cards and sections.

use serde::Serialize;

/// A titled block of optional lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Card {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lists: Vec<BulletList>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletList {
    pub label: String,
    pub items: Vec<String>,
}

/// A category heading with its cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub cards: Vec<Card>,
}

impl Section {
    /// `Pain Points (2)`
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.cards.len())
    }
}

impl Card {
    /// Builds a card, dropping every absent line.
    pub fn new(title: impl Into<String>, lines: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            title: title.into(),
            badge: None,
            lines: lines.into_iter().flatten().collect(),
            lists: Vec::new(),
        }
    }

    pub fn with_badge(mut self, badge: Option<String>) -> Self {
        self.badge = badge;
        self
    }

    /// Adds a bullet list unless `items` is absent or empty.
    pub fn with_list(mut self, label: &str, items: Option<&[String]>) -> Self {
        if let Some(items) = items.filter(|items| !items.is_empty()) {
            self.lists.push(BulletList {
                label: label.to_string(),
                items: items.to_vec(),
            });
        }
        self
    }
}

/// `"{prefix}{value}"` when `value` is present.
pub(crate) fn labeled(prefix: &str, value: Option<&String>) -> Option<String> {
    value.map(|v| format!("{prefix}{v}"))
}

/// Builds a section, or nothing when there are no cards.
pub(crate) fn section<T>(title: &str, items: &[T], card: impl Fn(&T) -> Card) -> Option<Section> {
    if items.is_empty() {
        return None;
    }
    Some(Section {
        title: title.to_string(),
        cards: items.iter().map(card).collect(),
    })
}
