//! Item types - the one record Revive stores
//!
//! An item is something a user wants to sell or give away:
//! - `name` and `contact` are required
//! - `price` of zero means the item is a gift
//! - `status` is always `available` when created

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Label shown instead of a price for free items
pub const GIFT_LABEL: &str = "gift";

/// Listing status of an item.
///
/// Every item starts as `Available`. Nothing moves an item to `Done` yet;
/// the value exists so stores written with it stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Available,
    Done,
}

impl ItemStatus {
    /// Get the string representation stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Done => "done",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "available" => Ok(ItemStatus::Available),
            "done" => Ok(ItemStatus::Done),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort key for listing items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderBy {
    #[default]
    CreatedAt,
    Price,
    Id,
    Name,
}

impl OrderBy {
    /// Column this key sorts on
    pub fn column(&self) -> &'static str {
        match self {
            OrderBy::CreatedAt => "created_at",
            OrderBy::Price => "price",
            OrderBy::Id => "id",
            OrderBy::Name => "name",
        }
    }

    pub fn all() -> &'static [OrderBy] {
        &[OrderBy::CreatedAt, OrderBy::Price, OrderBy::Id, OrderBy::Name]
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OrderBy::all()
            .iter()
            .copied()
            .find(|o| o.column() == s)
            .ok_or_else(|| format!("unknown sort key: {}", s))
    }
}

/// Unknown keys sort by `created_at`.
impl From<&str> for OrderBy {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier, never reused
    pub id: i64,
    pub name: String,
    /// Free text, empty when not given
    pub description: String,
    /// How to reach the owner (phone, QQ, WeChat, ...)
    pub contact: String,
    /// Asking price; zero means gift
    pub price: f64,
    pub status: ItemStatus,
    /// Local time at creation, `YYYY-MM-DDTHH:MM:SS`
    pub created_at: String,
}

impl Item {
    pub fn is_gift(&self) -> bool {
        self.price == 0.0
    }

    /// Price as shown to users
    pub fn price_label(&self) -> String {
        price_label(self.price)
    }
}

/// Format a price for display: the gift label for zero, yuan with two decimals otherwise.
pub fn price_label(price: f64) -> String {
    if price == 0.0 {
        GIFT_LABEL.to_string()
    } else {
        format!("¥{:.2}", price)
    }
}

/// Validated input for a new item.
///
/// Front ends build one of these before touching the store, so a bad
/// form never reaches the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub contact: String,
    pub price: f64,
}

impl NewItem {
    /// Validate raw user input.
    ///
    /// Fields are trimmed. A blank price means zero (a gift).
    pub fn parse(name: &str, description: &str, contact: &str, price: &str) -> Result<Self> {
        let name = name.trim();
        let contact = contact.trim();
        if name.is_empty() {
            return Err(Error::MissingField("name"));
        }
        if contact.is_empty() {
            return Err(Error::MissingField("contact"));
        }

        let price = parse_price(price)?;

        Ok(Self {
            name: name.to_string(),
            description: description.trim().to_string(),
            contact: contact.to_string(),
            price,
        })
    }
}

fn parse_price(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    match raw.parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(Error::InvalidPrice(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [ItemStatus::Available, ItemStatus::Done] {
            let parsed: ItemStatus = status.as_str().parse().unwrap();
            assert_eq!(status, parsed);
        }
        assert!(matches!("sold".parse::<ItemStatus>(), Err(Error::InvalidStatus(_))));
    }

    #[test]
    fn test_order_by_falls_back_to_created_at() {
        assert_eq!(OrderBy::from("price"), OrderBy::Price);
        assert_eq!(OrderBy::from("name"), OrderBy::Name);
        assert_eq!(OrderBy::from("id"), OrderBy::Id);
        assert_eq!(OrderBy::from("price; DROP TABLE items"), OrderBy::CreatedAt);
        assert_eq!(OrderBy::from(""), OrderBy::CreatedAt);
        assert!("PRICE".parse::<OrderBy>().is_err());
    }

    #[test]
    fn test_price_label() {
        assert_eq!(price_label(0.0), "gift");
        assert_eq!(price_label(12.5), "¥12.50");
        assert_eq!(price_label(3.0), "¥3.00");
    }

    #[test]
    fn test_new_item_trims_and_defaults_price() {
        let item = NewItem::parse("  雨伞 ", "", " qq:123 ", "").unwrap();
        assert_eq!(item.name, "雨伞");
        assert_eq!(item.contact, "qq:123");
        assert_eq!(item.description, "");
        assert_eq!(item.price, 0.0);
    }

    #[test]
    fn test_new_item_requires_name_and_contact() {
        assert!(matches!(
            NewItem::parse("   ", "desc", "qq:1", "0"),
            Err(Error::MissingField("name"))
        ));
        assert!(matches!(
            NewItem::parse("lamp", "desc", "", "0"),
            Err(Error::MissingField("contact"))
        ));
    }

    #[test]
    fn test_new_item_rejects_bad_prices() {
        for raw in ["abc", "-1", "inf", "NaN", "1,5"] {
            let err = NewItem::parse("lamp", "", "qq:1", raw).unwrap_err();
            assert!(err.is_validation(), "{raw} should be rejected");
        }
        assert_eq!(NewItem::parse("lamp", "", "qq:1", "19.9").unwrap().price, 19.9);
    }
}
