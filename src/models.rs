//! Frontend Models
//!
//! Data structures matching backend entities, plus the draft value
//! objects held by forms while a row or modal is in edit mode.

use serde::{Deserialize, Deserializer, Serialize};

/// Item category options offered by the category selects
pub const ITEM_CATEGORIES: &[&str] = &["Stationary", "Kitchenware", "Appliance", "Other"];

/// Item status options offered by the status select
pub const ITEM_STATUSES: &[&str] = &["ACTIVE", "SUSPENDED", "DELETED"];

fn default_status() -> String {
    "ACTIVE".to_string()
}

/// Inventory item (matches backend wire format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "itemName", default)]
    pub name: String,
    #[serde(rename = "itemCategory", default)]
    pub category: String,
    #[serde(rename = "itemPrice", default, deserialize_with = "numeric_string")]
    pub price: String,
    #[serde(default = "default_status")]
    pub status: String,
}

/// The backend reports prices both as JSON numbers and as strings.
fn numeric_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Text(String),
        Number(f64),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Text(text) => text,
        NumberOrString::Number(number) => number.to_string(),
    })
}

/// Uncommitted form state for creating or editing an item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub status: String,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: "Stationary".to_string(),
            price: String::new(),
            status: "ACTIVE".to_string(),
        }
    }
}

impl ItemDraft {
    /// Seed an edit draft from the row being edited
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price.clone(),
            status: item.status.clone(),
        }
    }
}

/// Managed user account (matches backend wire format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

/// Uncommitted form state for creating a user. The password leaves the
/// client only inside the creation payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUserDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

/// The logged-in user's own profile
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_price_accepts_string_and_number() {
        let from_string: Item =
            serde_json::from_str(r#"{"_id":"1","itemName":"Pen","itemPrice":"2.50"}"#)
                .expect("string price");
        assert_eq!(from_string.price, "2.50");

        let from_number: Item =
            serde_json::from_str(r#"{"_id":"1","itemName":"Pen","itemPrice":3}"#)
                .expect("numeric price");
        assert_eq!(from_number.price, "3");
    }

    #[test]
    fn item_status_defaults_to_active() {
        let item: Item = serde_json::from_str(r#"{"_id":"1","itemName":"Pen"}"#).expect("item");
        assert_eq!(item.status, "ACTIVE");
    }

    #[test]
    fn user_tolerates_missing_optional_fields() {
        let user: User = serde_json::from_str(r#"{"_id":"u1","username":"ada"}"#).expect("user");
        assert_eq!(user.username, "ada");
        assert_eq!(user.profile_image, None);
        assert_eq!(user.status, "ACTIVE");
    }

    #[test]
    fn item_draft_seeds_from_item() {
        let item = Item {
            id: "7".to_string(),
            name: "Kettle".to_string(),
            category: "Kitchenware".to_string(),
            price: "25".to_string(),
            status: "SUSPENDED".to_string(),
        };
        let draft = ItemDraft::from_item(&item);
        assert_eq!(draft.name, "Kettle");
        assert_eq!(draft.status, "SUSPENDED");
    }
}
