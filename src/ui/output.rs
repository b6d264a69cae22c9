use crate::item::Item;
use crate::ui::{theme, Icons, Theme};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::SPROUT, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted.clone()).to_string()
}

/// Multi-line listing entry for one item, using the global theme
pub fn item_entry(item: &Item) -> String {
    format_item(item, theme())
}

/// `[id] name | price | contact`, then description and creation time
pub fn format_item(item: &Item, theme: &Theme) -> String {
    let price = if item.is_gift() {
        format!("{} {}", Icons::GIFT, item.price_label().style(theme.gift.clone()))
    } else {
        item.price_label().style(theme.price.clone()).to_string()
    };
    let description = if item.description.is_empty() {
        "(none)".style(theme.muted.clone()).to_string()
    } else {
        item.description.clone()
    };

    format!(
        "[{}] {} | {} | {}\n    {} {}\n    {} {}",
        item.id,
        item.name.style(theme.header.clone()),
        price,
        item.contact,
        "description:".style(theme.dim.clone()),
        description,
        "created:".style(theme.dim.clone()),
        item.created_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemStatus;

    fn item(description: &str, price: f64) -> Item {
        Item {
            id: 3,
            name: "雨伞".to_string(),
            description: description.to_string(),
            contact: "qq:123".to_string(),
            price,
            status: ItemStatus::Available,
            created_at: "2025-10-19T08:30:00".to_string(),
        }
    }

    #[test]
    fn test_format_gift_item() {
        let text = format_item(&item("", 0.0), &Theme::plain());
        let first = text.lines().next().unwrap();
        assert_eq!(first, format!("[3] 雨伞 | {} gift | qq:123", Icons::GIFT));
        assert!(text.contains("description: (none)"));
        assert!(text.contains("created: 2025-10-19T08:30:00"));
    }

    #[test]
    fn test_format_priced_item() {
        let text = format_item(&item("black, folding", 9.9), &Theme::plain());
        assert!(text.starts_with("[3] 雨伞 | ¥9.90 | qq:123"));
        assert!(text.contains("description: black, folding"));
    }
}
