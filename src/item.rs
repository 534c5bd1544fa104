/// Data structures for saved items
use serde::{Deserialize, Serialize};

/// A single stashed capture, as persisted in `chrome.storage.local`
///
/// The stored shape is flat: `{id, type, content, linkUrl?, imageUrl?,
/// imageAlt?, pageTitle?, pageUrl?, createdAt?}`. The `type` tag selects
/// which of the kind-specific fields are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub id: String,
    pub content: String,
    #[serde(flatten)]
    pub kind: ItemKind,
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub page_url: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Text,
    Link {
        #[serde(rename = "linkUrl")]
        link_url: String,
    },
    Image {
        #[serde(rename = "imageUrl")]
        image_url: String,
        #[serde(rename = "imageAlt", default)]
        image_alt: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Text,
    Link,
    Image,
}

/// Type filter of the panel toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Text,
    Link,
    Image,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 4] = [
        TypeFilter::All,
        TypeFilter::Text,
        TypeFilter::Link,
        TypeFilter::Image,
    ];

    pub fn matches(self, item_type: ItemType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Text => item_type == ItemType::Text,
            TypeFilter::Link => item_type == ItemType::Link,
            TypeFilter::Image => item_type == ItemType::Image,
        }
    }

    /// Message catalog key and literal fallback for the filter button
    pub fn label(self) -> (&'static str, &'static str) {
        match self {
            TypeFilter::All => ("filterAll", "All"),
            TypeFilter::Text => ("filterText", "Text"),
            TypeFilter::Link => ("filterLink", "Link"),
            TypeFilter::Image => ("filterImage", "Image"),
        }
    }
}

impl ItemKind {
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemKind::Text => ItemType::Text,
            ItemKind::Link { .. } => ItemType::Link,
            ItemKind::Image { .. } => ItemType::Image,
        }
    }
}

impl SavedItem {
    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    pub fn link_url(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Link { link_url } => Some(link_url.as_str()),
            _ => None,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Image { image_url, .. } => Some(image_url.as_str()),
            _ => None,
        }
    }

    pub fn image_alt(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Image { image_alt, .. } => Some(image_alt.as_str()),
            _ => None,
        }
    }

    /// What lands on the clipboard: the URL for links and images, else the text
    pub fn copy_value(&self) -> &str {
        let url = match &self.kind {
            ItemKind::Text => None,
            ItemKind::Link { link_url } => Some(link_url.as_str()),
            ItemKind::Image { image_url, .. } => Some(image_url.as_str()),
        };
        url.filter(|u| !u.is_empty()).unwrap_or(&self.content)
    }

    /// Lower-cased, space-joined searchable fields, skipping empty ones
    pub fn haystack(&self) -> String {
        [
            Some(self.content.as_str()),
            Some(self.page_title.as_str()),
            Some(self.page_url.as_str()),
            self.link_url(),
            self.image_url(),
        ]
        .into_iter()
        .flatten()
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    /// `query` must already be trimmed and lower-cased; empty matches everything
    pub fn matches(&self, filter: TypeFilter, query: &str) -> bool {
        filter.matches(self.item_type()) && (query.is_empty() || self.haystack().contains(query))
    }

    /// A record is usable if it has an id and its kind carries its URL
    pub fn is_valid(&self) -> bool {
        if self.id.is_empty() {
            return false;
        }
        match &self.kind {
            ItemKind::Text => !self.content.is_empty(),
            ItemKind::Link { link_url } => !link_url.is_empty(),
            ItemKind::Image { image_url, .. } => !image_url.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_link(id: &str, url: &str) -> SavedItem {
        SavedItem {
            id: id.to_string(),
            content: "Docs".to_string(),
            kind: ItemKind::Link {
                link_url: url.to_string(),
            },
            page_title: "Example".to_string(),
            page_url: "https://a.test/".to_string(),
            created_at: "2024-10-28T10:30:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_stored_shape_is_flat() {
        let item = create_test_link("item-1", "https://docs.test/");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["type"], "link");
        assert_eq!(json["linkUrl"], "https://docs.test/");
        assert_eq!(json["pageTitle"], "Example");
        assert_eq!(json["createdAt"], "2024-10-28T10:30:00.000Z");
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_deserialize_image_without_optional_fields() {
        let json = r#"{"id":"a","type":"image","content":"cat.png","imageUrl":"https://i.test/cat.png"}"#;
        let item: SavedItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.item_type(), ItemType::Image);
        assert_eq!(item.image_alt(), Some(""));
        assert_eq!(item.page_title, "");
        assert!(item.is_valid());
    }

    #[test]
    fn test_deserialize_unknown_type_fails() {
        let json = r#"{"id":"a","type":"video","content":"x"}"#;
        assert!(serde_json::from_str::<SavedItem>(json).is_err());
    }

    #[test]
    fn test_copy_value() {
        let link = create_test_link("1", "https://docs.test/");
        assert_eq!(link.copy_value(), "https://docs.test/");

        let empty_link = create_test_link("2", "");
        assert_eq!(empty_link.copy_value(), "Docs");

        let text = SavedItem {
            kind: ItemKind::Text,
            content: "hello".to_string(),
            ..create_test_link("3", "")
        };
        assert_eq!(text.copy_value(), "hello");
    }

    #[test]
    fn test_haystack_skips_empty_fields() {
        let mut item = create_test_link("1", "https://Test.com/x");
        item.page_title = String::new();

        assert_eq!(item.haystack(), "docs https://a.test/ https://test.com/x");
    }

    #[test]
    fn test_matches_filter_and_query() {
        let item = create_test_link("1", "https://test.com/");

        assert!(item.matches(TypeFilter::All, ""));
        assert!(item.matches(TypeFilter::Link, "test.com"));
        assert!(!item.matches(TypeFilter::Text, ""));
        assert!(!item.matches(TypeFilter::Link, "nowhere"));
    }

    #[test]
    fn test_is_valid() {
        assert!(create_test_link("1", "https://x.test/").is_valid());
        assert!(!create_test_link("", "https://x.test/").is_valid());
        assert!(!create_test_link("1", "").is_valid());
    }
}
