use std::path::Path;

use crate::{emit_success, OutputMode};
use owo_colors::OwoColorize;
use revive::config::{ensure_db_dir, Settings};
use revive::ui::{self, Icons};
use revive::{Item, ItemStore, NewItem, OrderBy};

const RULE_WIDTH: usize = 60;

pub fn run_init_db(settings: &Settings, output_mode: OutputMode) -> anyhow::Result<()> {
    ensure_db_dir(&settings.database)?;
    let store = ItemStore::open(&settings.database)?;
    store.close()?;

    if output_mode.is_human() {
        ui::success(&format!("Database ready: {}", settings.database.display()));
    } else {
        let data = serde_json::json!({ "database": settings.database.display().to_string() });
        emit_success(output_mode, "init-db", data)?;
    }
    Ok(())
}

pub fn run_add(
    settings: &Settings,
    output_mode: OutputMode,
    name: &str,
    desc: &str,
    contact: &str,
    price: &str,
) -> anyhow::Result<()> {
    // Validate before opening so bad input never touches the store
    let item = NewItem::parse(name, desc, contact, price)?;

    let store = ItemStore::open(&settings.database)?;
    let id = store.add_item(&item.name, &item.description, &item.contact, item.price)?;
    store.close()?;

    if output_mode.is_human() {
        ui::success(&format!("Added item: ID={}, name={}", id, item.name));
    } else {
        let data = serde_json::json!({ "id": id, "name": item.name });
        emit_success(output_mode, "add", data)?;
    }
    Ok(())
}

pub fn run_list(
    settings: &Settings,
    output_mode: OutputMode,
    limit: usize,
    order: &str,
    ascending: bool,
) -> anyhow::Result<()> {
    let store = ItemStore::open(&settings.database)?;
    let items = store.list_items(limit, OrderBy::from(order), ascending)?;
    store.close()?;

    if output_mode.is_human() {
        if items.is_empty() {
            ui::info("(empty)", "No items yet, add one with `revive add`");
        } else {
            print_items(&format!("{} item(s)", items.len()), &items);
        }
    } else {
        emit_success(output_mode, "list", serde_json::json!({ "items": items }))?;
    }
    Ok(())
}

pub fn run_find(settings: &Settings, output_mode: OutputMode, query: &str, limit: usize) -> anyhow::Result<()> {
    let store = ItemStore::open(&settings.database)?;
    let items = store.search_items(query, limit)?;
    store.close()?;

    if output_mode.is_human() {
        if items.is_empty() {
            println!("{} No matching items.", Icons::SEARCH);
        } else {
            print_items(&format!("{} match(es) for \"{}\"", items.len(), query), &items);
        }
    } else {
        let data = serde_json::json!({ "query": query, "items": items });
        emit_success(output_mode, "find", data)?;
    }
    Ok(())
}

pub fn run_delete(settings: &Settings, output_mode: OutputMode, id: i64) -> anyhow::Result<()> {
    let store = ItemStore::open(&settings.database)?;
    let deleted = store.delete_item(id)?;
    store.close()?;

    if output_mode.is_human() {
        if deleted > 0 {
            println!("{} Deleted ID={}", Icons::DEL, id);
        } else {
            ui::warn(&format!("No item with ID={}", id));
        }
    } else {
        let data = serde_json::json!({ "id": id, "deleted": deleted });
        emit_success(output_mode, "delete", data)?;
    }
    Ok(())
}

pub fn run_export(settings: &Settings, output_mode: OutputMode, out: &Path) -> anyhow::Result<()> {
    let store = ItemStore::open(&settings.database)?;
    let written = store.export_csv(out)?;
    store.close()?;

    if output_mode.is_human() {
        ui::success(&format!("Exported {} item(s) to {}", written, out.display()));
    } else {
        let data = serde_json::json!({ "rows": written, "path": out.display().to_string() });
        emit_success(output_mode, "export", data)?;
    }
    Ok(())
}

pub fn run_stats(settings: &Settings, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = ItemStore::open(&settings.database)?;
    let stats = store.stats()?;
    store.close()?;

    if output_mode.is_human() {
        ui::header(&format!("{} Revive statistics", Icons::STATS));
        println!("{} {}", Icons::DATABASE, ui::dim(&settings.database.display().to_string()));
        println!("{}", ui::stats_table(&stats));
    } else {
        let data = serde_json::json!({
            "items": stats.items,
            "available": stats.available,
            "gifts": stats.gifts,
            "total_price": stats.total_price,
        });
        emit_success(output_mode, "stats", data)?;
    }
    Ok(())
}

#[cfg(feature = "form")]
pub fn run_form(settings: &Settings) -> anyhow::Result<()> {
    let store = ItemStore::open(&settings.database)?;
    revive::form::run(store)?;
    Ok(())
}

fn print_items(title: &str, items: &[Item]) {
    println!("{} {}", Icons::PACKAGE, title.style(ui::theme().header.clone()));
    println!("{}", ui::muted(&"-".repeat(RULE_WIDTH)));
    for item in items {
        println!("{}", ui::item_entry(item));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_in(dir: &Path) -> Settings {
        Settings {
            database: dir.join("revive.db"),
            ..Settings::default()
        }
    }

    #[test]
    fn test_add_rejects_blank_name_before_opening_store() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());

        let err = run_add(&settings, OutputMode::Json, "  ", "", "qq:1", "5").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<revive::Error>(),
            Some(revive::Error::MissingField("name"))
        ));
        assert!(!settings.database.exists());
    }

    #[test]
    fn test_add_rejects_bad_price_before_opening_store() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());

        let err = run_add(&settings, OutputMode::Json, "lamp", "", "qq:1", "cheap").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<revive::Error>(),
            Some(revive::Error::InvalidPrice(_))
        ));
        assert!(!settings.database.exists());
    }

    #[test]
    fn test_add_stores_trimmed_item() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());

        run_add(&settings, OutputMode::Json, " lamp ", "desk lamp", "qq:1", "").unwrap();

        let store = ItemStore::open(&settings.database).unwrap();
        let items = store.list_items(10, OrderBy::CreatedAt, false).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "lamp");
        assert!(items[0].is_gift());
    }

    #[test]
    fn test_delete_missing_id_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());

        run_delete(&settings, OutputMode::Json, 42).unwrap();
        run_delete(&settings, OutputMode::Human, 42).unwrap();

        let store = ItemStore::open(&settings.database).unwrap();
        assert_eq!(store.count_items().unwrap(), 0);
    }

    #[test]
    fn test_export_writes_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let out = dir.path().join("items.csv");

        run_add(&settings, OutputMode::Json, "kettle", "", "tel:555", "12.5").unwrap();
        run_export(&settings, OutputMode::Json, &out).unwrap();

        let contents = std::fs::read_to_string(&out).unwrap();
        assert!(contents.starts_with("id,name,description,contact,price,status,created_at\n"));
        assert!(contents.contains("kettle"));
        assert!(contents.contains("12.5"));
    }
}
