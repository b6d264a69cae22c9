use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{AppMode, Focus, FormApp};

pub fn handle_event(app: &mut FormApp, event: Event) {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            handle_key(app, key);
        }
    }
}

fn handle_key(app: &mut FormApp, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.mode {
        AppMode::Edit => handle_edit_key(app, key),
        AppMode::ConfirmDelete(_) => handle_confirm_key(app, key),
    }
}

fn handle_edit_key(app: &mut FormApp, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::F(5) => app.refresh(),
        _ if app.focus == Focus::Table => handle_table_key(app, key),
        _ => handle_text_key(app, key),
    }
}

fn handle_table_key(app: &mut FormApp, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Delete | KeyCode::Char('d') => app.request_delete(),
        _ => {}
    }
}

fn handle_text_key(app: &mut FormApp, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        if app.focus == Focus::Search {
            app.search();
        } else {
            app.submit();
        }
        return;
    }

    let Some(field) = app.focused_field_mut() else {
        return;
    };
    match (key.code, key.modifiers) {
        (KeyCode::Backspace, _) => field.backspace(),
        (KeyCode::Delete, _) => field.delete(),
        (KeyCode::Left, _) => field.left(),
        (KeyCode::Right, _) => field.right(),
        (KeyCode::Home, _) => field.home(),
        (KeyCode::End, _) => field.end(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => field.insert(c),
        _ => {}
    }
}

fn handle_confirm_key(app: &mut FormApp, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ItemStore;

    fn press(app: &mut FormApp, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut FormApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_keyboard_add_then_delete() {
        let mut app = FormApp::new(ItemStore::open_in_memory().unwrap()).unwrap();

        type_text(&mut app, "kettle");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "12");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "tel:555");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.items.len(), 1);
        assert_eq!(app.items[0].name, "kettle");
        assert_eq!(app.items[0].price, 12.0);

        app.focus = Focus::Table;
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.mode, AppMode::ConfirmDelete(_)));

        // Esc cancels the prompt without quitting
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Edit);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.items.is_empty());
    }

    #[test]
    fn test_letters_in_table_do_not_edit_fields() {
        let mut app = FormApp::new(ItemStore::open_in_memory().unwrap()).unwrap();
        app.focus = Focus::Table;
        type_text(&mut app, "xyz");
        assert!(app.name.value.is_empty());
        assert!(app.search.value.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = FormApp::new(ItemStore::open_in_memory().unwrap()).unwrap();
        handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(app.should_quit);

        let mut app = FormApp::new(ItemStore::open_in_memory().unwrap()).unwrap();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
