//! CSV export of stored items

use std::path::Path;
use crate::Result;
use crate::item::Item;

/// Fixed header row of every export file
pub const EXPORT_HEADER: [&str; 7] = [
    "id",
    "name",
    "description",
    "contact",
    "price",
    "status",
    "created_at",
];

/// Write `items` to `path` as UTF-8 CSV, replacing any existing file.
///
/// Returns the number of data rows written (the header is not counted).
pub fn write_csv(path: &Path, items: &[Item]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(EXPORT_HEADER)?;

    for item in items {
        wtr.write_record([
            item.id.to_string(),
            item.name.clone(),
            item.description.clone(),
            item.contact.clone(),
            format_price(item.price),
            item.status.as_str().to_string(),
            item.created_at.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(items.len())
}

/// Price as written to CSV, using the shortest digits that parse back exactly.
/// Whole numbers keep one decimal (`25.0`). Magnitudes below `1e-4` or from
/// `1e16` up switch to exponent form with a signed two-digit exponent (`1e-05`,
/// `1.5e+16`).
pub fn format_price(price: f64) -> String {
    if price == 0.0 || !price.is_finite() {
        return format!("{:?}", price);
    }

    let exp_form = format!("{:e}", price);
    let Some((mantissa, exponent)) = exp_form.split_once('e') else {
        return price.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if price.fract() == 0.0 {
        format!("{:.1}", price)
    } else {
        price.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemStatus;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "0.0");
        assert_eq!(format_price(25.0), "25.0");
        assert_eq!(format_price(12.5), "12.5");
        assert_eq!(format_price(0.0001), "0.0001");
        assert_eq!(format_price(1e15), "1000000000000000.0");
        assert_eq!(format_price(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_format_price_exponent_form() {
        assert_eq!(format_price(1e-5), "1e-05");
        assert_eq!(format_price(1.5e-7), "1.5e-07");
        assert_eq!(format_price(1e16), "1e+16");
        assert_eq!(format_price(1e20), "1e+20");
        assert_eq!(format_price(1.2345e100), "1.2345e+100");
        assert_eq!(format_price(1e20).parse::<f64>().unwrap(), 1e20);
    }

    #[test]
    fn test_write_csv_quotes_awkward_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.csv");
        let item = Item {
            id: 7,
            name: "desk, oak".to_string(),
            description: "says \"solid\"\nsecond line".to_string(),
            contact: "qq:1".to_string(),
            price: 80.0,
            status: ItemStatus::Available,
            created_at: "2025-10-19T10:00:00".to_string(),
        };

        let written = write_csv(&path, std::slice::from_ref(&item)).unwrap();
        assert_eq!(written, 1);

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let header: Vec<&str> = rdr.headers().unwrap().iter().collect();
        assert_eq!(header, EXPORT_HEADER.to_vec());
        let record = rdr.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "desk, oak");
        assert_eq!(&record[2], "says \"solid\"\nsecond line");
        assert_eq!(&record[4], "80.0");
    }
}
