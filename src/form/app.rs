//! Form session state. Everything here runs without a terminal.

use ratatui::widgets::TableState;
use tracing::debug;

use crate::item::{Item, NewItem, OrderBy};
use crate::storage::ItemStore;
use crate::Result;

use super::field::TextField;

/// Rows loaded into the table per refresh or search
pub const FORM_ROW_LIMIT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Price,
    Contact,
    Description,
    Search,
    Table,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Name,
        Focus::Price,
        Focus::Contact,
        Focus::Description,
        Focus::Search,
        Focus::Table,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// True for the four inputs that make up a new item
    pub fn is_item_field(self) -> bool {
        matches!(self, Focus::Name | Focus::Price | Focus::Contact | Focus::Description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Edit,
    /// Waiting for y/n on deleting this id
    ConfirmDelete(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

pub struct FormApp {
    store: ItemStore,
    pub mode: AppMode,
    pub focus: Focus,
    pub name: TextField,
    pub price: TextField,
    pub contact: TextField,
    pub description: TextField,
    pub search: TextField,
    pub items: Vec<Item>,
    pub table_state: TableState,
    pub status: Option<StatusLine>,
    pub should_quit: bool,
}

impl FormApp {
    /// Wrap an open store and load the newest items.
    pub fn new(store: ItemStore) -> Result<Self> {
        let items = store.list_items(FORM_ROW_LIMIT, OrderBy::CreatedAt, false)?;
        let mut app = Self {
            store,
            mode: AppMode::Edit,
            focus: Focus::Name,
            name: TextField::default(),
            price: TextField::with_value("0"),
            contact: TextField::default(),
            description: TextField::default(),
            search: TextField::default(),
            items: Vec::new(),
            table_state: TableState::default(),
            status: None,
            should_quit: false,
        };
        app.set_items(items);
        Ok(app)
    }

    /// Give the store back so the caller can close it.
    pub fn into_store(self) -> ItemStore {
        self.store
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::Name => Some(&mut self.name),
            Focus::Price => Some(&mut self.price),
            Focus::Contact => Some(&mut self.contact),
            Focus::Description => Some(&mut self.description),
            Focus::Search => Some(&mut self.search),
            Focus::Table => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Reload the full list, newest first.
    pub fn refresh(&mut self) {
        match self.store.list_items(FORM_ROW_LIMIT, OrderBy::CreatedAt, false) {
            Ok(items) => self.set_items(items),
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }

    /// Re-query with the search box. An empty box shows the full list.
    pub fn search(&mut self) {
        let query = self.search.value.trim().to_string();
        if query.is_empty() {
            self.refresh();
            return;
        }

        match self.store.search_items(&query, FORM_ROW_LIMIT) {
            Ok(items) => {
                let count = items.len();
                self.set_items(items);
                self.set_status(StatusKind::Info, format!("{} match(es) for \"{}\"", count, query));
            }
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }

    /// Validate the form and add the item. Invalid input never reaches the store.
    pub fn submit(&mut self) {
        let new_item = match NewItem::parse(
            &self.name.value,
            &self.description.value,
            &self.contact.value,
            &self.price.value,
        ) {
            Ok(item) => item,
            Err(e) => {
                self.set_status(StatusKind::Error, e.to_string());
                return;
            }
        };

        match self.store.add_item(
            &new_item.name,
            &new_item.description,
            &new_item.contact,
            new_item.price,
        ) {
            Ok(id) => {
                debug!(id, "Added item from form");
                self.name.clear();
                self.description.clear();
                self.price.set("0");
                self.focus = Focus::Name;
                self.refresh();
                self.set_status(StatusKind::Success, format!("Added #{} {}", id, new_item.name));
            }
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.table_state.selected().and_then(|i| self.items.get(i))
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < self.items.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let prev = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    /// Ask for confirmation before deleting the selected row.
    pub fn request_delete(&mut self) {
        match self.selected_item().map(|item| item.id) {
            Some(id) => self.mode = AppMode::ConfirmDelete(id),
            None => self.set_status(StatusKind::Info, "Select a row first, then delete".to_string()),
        }
    }

    pub fn confirm_delete(&mut self) {
        let AppMode::ConfirmDelete(id) = self.mode else {
            return;
        };
        self.mode = AppMode::Edit;

        match self.store.delete_item(id) {
            Ok(0) => {
                self.refresh();
                self.set_status(StatusKind::Info, format!("Item #{} was already gone", id));
            }
            Ok(_) => {
                self.refresh();
                self.set_status(StatusKind::Success, format!("Deleted #{}", id));
            }
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.mode = AppMode::Edit;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, kind: StatusKind, text: String) {
        self.status = Some(StatusLine { kind, text });
    }

    /// Replace the table rows, keeping the selection inside the new bounds.
    /// Replace the rows, keeping the selection on the same item when it is
    /// still listed. Otherwise the old index is clamped to the new length.
    fn set_items(&mut self, items: Vec<Item>) {
        let selected_id = self.selected_item().map(|item| item.id);
        self.items = items;
        let same_item = selected_id.and_then(|id| self.items.iter().position(|item| item.id == id));
        let selected = match (same_item, self.table_state.selected(), self.items.len()) {
            (_, _, 0) => None,
            (Some(i), _, _) => Some(i),
            (None, Some(i), len) => Some(i.min(len - 1)),
            (None, None, _) => None,
        };
        self.table_state.select(selected);
    }
}
