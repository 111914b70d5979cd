//! Item hierarchy.
//!
//! Every item is named and priced; the concrete kind adds its own fields and
//! is identified in storage by its discriminator tag.

use serde::{Deserialize, Serialize};

use crate::constants::{ITEM_TAG_ALBUM, ITEM_TAG_BOOK, ITEM_TAG_MOVIE};
use crate::fetch::Entity;

/// Concrete item variant with its subtype-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dtype", rename_all = "UPPERCASE")]
pub enum ItemKind {
    Album { artist: String },
    Book { author: String, isbn: String },
    Movie { director: String, actor: String },
}

impl ItemKind {
    /// Discriminator stored with the item row
    pub fn tag(&self) -> &'static str {
        match self {
            ItemKind::Album { .. } => ITEM_TAG_ALBUM,
            ItemKind::Book { .. } => ITEM_TAG_BOOK,
            ItemKind::Movie { .. } => ITEM_TAG_MOVIE,
        }
    }
}

/// Item domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Option<i32>,
    pub name: String,
    pub price: i32,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    pub fn album(name: impl Into<String>, price: i32, artist: impl Into<String>) -> Self {
        Self::new(
            name,
            price,
            ItemKind::Album {
                artist: artist.into(),
            },
        )
    }

    pub fn book(
        name: impl Into<String>,
        price: i32,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            price,
            ItemKind::Book {
                author: author.into(),
                isbn: isbn.into(),
            },
        )
    }

    pub fn movie(
        name: impl Into<String>,
        price: i32,
        director: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            price,
            ItemKind::Movie {
                director: director.into(),
                actor: actor.into(),
            },
        )
    }

    fn new(name: impl Into<String>, price: i32, kind: ItemKind) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            kind,
        }
    }

    /// Discriminator of the concrete kind
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }
}

impl Entity for Item {
    fn id(&self) -> Option<i32> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ITEM_TAGS;

    #[test]
    fn each_kind_has_its_own_tag() {
        let items = [
            Item::album("Abbey Road", 30, "The Beatles"),
            Item::book("Dune", 20, "Herbert", "123"),
            Item::movie("Alien", 15, "Scott", "Weaver"),
        ];
        let tags: Vec<_> = items.iter().map(Item::tag).collect();
        assert_eq!(tags, ITEM_TAGS);
    }

    #[test]
    fn serialized_item_carries_discriminator() {
        let json = serde_json::to_value(Item::book("Dune", 20, "Herbert", "123")).unwrap();
        assert_eq!(json["dtype"], "BOOK");
        assert_eq!(json["author"], "Herbert");
        assert_eq!(json["name"], "Dune");
    }
}
