//! Form rendering with ratatui.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::app::{AppMode, Focus, FormApp, StatusKind};
use super::field::TextField;
use crate::ui::theme as palette;

const PRIMARY: Color = rgb(palette::PRIMARY);
const ACCENT: Color = rgb(palette::ACCENT);
const STRIPE: Color = Color::Rgb(0xFC, 0xF6, 0xD6);
const DANGER: Color = rgb(palette::DANGER);
const MUTED: Color = rgb(palette::MUTED);

const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

pub fn render(frame: &mut Frame, app: &mut FormApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(4), // New item form
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Items table
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_search(frame, app, chunks[2]);
    render_table(frame, app, chunks[3]);
    render_status(frame, app, chunks[4]);
    render_help(frame, app, chunks[5]);

    if let AppMode::ConfirmDelete(id) = app.mode {
        render_confirm(frame, app, id);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Revive",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "List what you no longer need, let good things move on",
            Style::default().fg(MUTED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_form(frame: &mut Frame, app: &FormApp, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app.focus.is_item_field()))
        .title(" New item (Enter to add) ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);
    let top = columns(rows[0]);
    let bottom = columns(rows[1]);

    render_field(frame, app, top[0], "Name*", &app.name, Focus::Name);
    render_field(frame, app, top[1], "Price (0=gift)", &app.price, Focus::Price);
    render_field(frame, app, bottom[0], "Contact*", &app.contact, Focus::Contact);
    render_field(frame, app, bottom[1], "Description", &app.description, Focus::Description);
}

fn columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area)
}

fn render_field(frame: &mut Frame, app: &FormApp, area: Rect, label: &str, field: &TextField, focus: Focus) {
    let focused = app.focus == focus && app.mode == AppMode::Edit;
    let label_span = Span::styled(
        format!("{}: ", label),
        if focused {
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        },
    );
    let offset = label_span.width() + Span::raw(field.before_cursor()).width();

    frame.render_widget(
        Paragraph::new(Line::from(vec![label_span, Span::raw(field.value.as_str())])),
        area,
    );

    if focused {
        set_cursor(frame, area, offset);
    }
}

fn render_search(frame: &mut Frame, app: &FormApp, area: Rect) {
    let focused = app.focus == Focus::Search && app.mode == AppMode::Edit;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(" Search name or description (Enter) ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (text, style) = if app.search.value.is_empty() && !focused {
        ("type a keyword...", Style::default().fg(MUTED))
    } else {
        (app.search.value.as_str(), Style::default())
    };
    frame.render_widget(Paragraph::new(text).style(style), inner);

    if focused {
        set_cursor(frame, inner, Span::raw(app.search.before_cursor()).width());
    }
}

fn render_table(frame: &mut Frame, app: &mut FormApp, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app.focus == Focus::Table))
        .title(format!(" Items ({}) ", app.items.len()));

    let header = Row::new(["ID", "Name", "Price", "Contact", "Description", "Created"]).style(
        Style::default()
            .fg(Color::Black)
            .bg(PRIMARY)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let price_style = if item.is_gift() {
                Style::default().fg(ACCENT)
            } else {
                Style::default()
            };
            let stripe = if i % 2 == 1 {
                Style::default().bg(STRIPE).fg(Color::Black)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(item.id.to_string()),
                Cell::from(item.name.clone()),
                Cell::from(item.price_label()).style(price_style),
                Cell::from(item.contact.clone()),
                Cell::from(item.description.clone()),
                Cell::from(item.created_at.clone()),
            ])
            .style(stripe)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(18),
        Constraint::Length(10),
        Constraint::Percentage(16),
        Constraint::Min(20),
        Constraint::Length(19),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status(frame: &mut Frame, app: &FormApp, area: Rect) {
    let Some(status) = &app.status else {
        return;
    };
    let style = match status.kind {
        StatusKind::Info => Style::default().fg(Color::Cyan),
        StatusKind::Success => Style::default().fg(ACCENT),
        StatusKind::Error => Style::default().fg(DANGER).add_modifier(Modifier::BOLD),
    };
    frame.render_widget(Paragraph::new(status.text.as_str()).style(style), area);
}

fn render_help(frame: &mut Frame, app: &FormApp, area: Rect) {
    let keys: &[(&str, &str)] = match (app.mode, app.focus) {
        (AppMode::ConfirmDelete(_), _) => &[("y", "Delete"), ("n/Esc", "Cancel")],
        (AppMode::Edit, Focus::Table) => &[
            ("↑↓", "Select"),
            ("d", "Delete"),
            ("Tab", "Next"),
            ("F5", "Refresh"),
            ("Esc", "Quit"),
        ],
        (AppMode::Edit, _) => &[
            ("Enter", "Add/Search"),
            ("Tab", "Next"),
            ("F5", "Refresh"),
            ("Esc", "Quit"),
        ],
    };

    let mut spans = Vec::new();
    for (key, action) in keys {
        spans.push(Span::styled(*key, Style::default().fg(PRIMARY)));
        spans.push(Span::raw(format!(" {}  ", action)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_confirm(frame: &mut Frame, app: &FormApp, id: i64) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let name = app
        .items
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.name.as_str())
        .unwrap_or("");
    let text = vec![
        Line::from(format!("Delete item #{} {}?", id, name)),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(DANGER).add_modifier(Modifier::BOLD)),
            Span::raw(" yes   "),
            Span::styled("n", Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)),
            Span::raw(" no"),
        ]),
    ];

    let popup = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DANGER))
                .title(" Confirm "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(popup, area);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn set_cursor(frame: &mut Frame, area: Rect, offset: usize) {
    let x = area.x.saturating_add(offset as u16).min(area.right().saturating_sub(1));
    frame.set_cursor_position((x, area.y));
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
