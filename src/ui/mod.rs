pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, header, info, item_entry, muted, success, warn};
pub use table::{stats_table, TableBuilder};
pub use theme::{theme, Theme};
