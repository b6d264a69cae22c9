use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Brand colors shared by the CLI and the form
pub const PRIMARY: (u8, u8, u8) = (0xFF, 0xE6, 0x00);
pub const ACCENT: (u8, u8, u8) = (0x32, 0xC6, 0x71);
pub const DANGER: (u8, u8, u8) = (0xFF, 0x52, 0x52);
pub const MUTED: (u8, u8, u8) = (0x77, 0x77, 0x77);

fn rgb((r, g, b): (u8, u8, u8)) -> Style {
    Style::new().truecolor(r, g, b)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    pub muted: Style,
    pub price: Style,
    pub gift: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: rgb(PRIMARY).bold(),
            success: rgb(ACCENT).bold(),
            error: rgb(DANGER).bold(),
            warn: rgb(PRIMARY),
            info: Style::new().cyan(),
            dim: Style::new().dimmed(),
            muted: rgb(MUTED),
            price: rgb(PRIMARY),
            gift: rgb(ACCENT),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            muted: Style::new(),
            price: Style::new(),
            gift: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colored_uses_brand_palette() {
        let theme = Theme::colored();
        let header = format!("{}", theme.header.style("Revive"));
        assert!(header.contains("38;2;255;230;0"));
        let gift = format!("{}", theme.gift.style("gift"));
        assert!(gift.contains("38;2;50;198;113"));
    }

    #[test]
    fn test_plain_has_no_escapes() {
        let theme = Theme::plain();
        assert_eq!(format!("{}", theme.header.style("Revive")), "Revive");
    }
}
