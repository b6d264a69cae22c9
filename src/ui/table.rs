use tabled::{settings::Style, Table, Tabled};

use crate::storage::StoreStats;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &StoreStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Items", &stats.items.to_string());
    builder.add_row("Available", &stats.available.to_string());
    builder.add_row("Gifts", &stats.gifts.to_string());
    builder.add_row("Total price", &format!("¥{:.2}", stats.total_price));
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder() {
        assert!(TableBuilder::new().build().is_empty());
    }

    #[test]
    fn test_stats_table() {
        let stats = StoreStats {
            items: 4,
            gifts: 1,
            available: 4,
            total_price: 42.5,
        };
        let table = stats_table(&stats);
        assert!(table.contains("Metric"));
        assert!(table.contains("Gifts"));
        assert!(table.contains("¥42.50"));
    }
}
