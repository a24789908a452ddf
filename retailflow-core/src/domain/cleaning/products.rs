// retailflow-core/src/domain/cleaning/products.rs

use super::{Cleaned, CleaningReport, DropReason, title_case};
use crate::domain::error::DomainError;
use crate::domain::model::{Entity, Product, RawTable};
use crate::domain::validators::{parse_decimal, parse_integer};

const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Canonical spellings, looked up by the lower-cased raw value.
const CATEGORY_LOOKUP: [(&str, &str); 4] = [
    ("electronics", "Electronics"),
    ("sports", "Sports"),
    ("office supplies", "Office Supplies"),
    ("office_supplies", "Office Supplies"),
];

/// Maps a raw category onto its canonical spelling, title-casing anything
/// the lookup table does not know. Unknown categories are not an error.
pub fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    let key = trimmed.to_lowercase();
    CATEGORY_LOOKUP
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| title_case(trimmed))
}

pub fn clean_products(raw: &RawTable) -> Result<Cleaned<Product>, DomainError> {
    let id_col = raw.column("product_id")?;
    let name_col = raw.column("product_name")?;
    let category_col = raw.column("category")?;
    let price_col = raw.column("price")?;

    let mut report = CleaningReport::new(Entity::Products.name(), raw.len());
    let mut invalid_prices = 0;
    let mut malformed_ids = 0;
    let mut rows = Vec::with_capacity(raw.len());

    for row in raw.rows() {
        let category = row.get(category_col).map(normalize_category);
        let product_name = row.get(name_col).unwrap_or(UNKNOWN_PRODUCT).to_string();

        // Non-numeric prices coerce to nothing and go the same way as non-positive ones.
        let price = match row.get(price_col).and_then(parse_decimal) {
            Some(p) if p > 0.0 => p,
            _ => {
                invalid_prices += 1;
                continue;
            }
        };

        let Some(product_id) = row.get(id_col).and_then(parse_integer) else {
            malformed_ids += 1;
            continue;
        };

        rows.push(Product {
            product_id,
            product_name,
            category,
            price,
        });
    }

    report.record(DropReason::InvalidPrice, invalid_prices);
    report.record(DropReason::MalformedId, malformed_ids);

    let report = report.finish(rows.len());
    Ok(Cleaned { rows, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn raw(rows: &[[&str; 4]]) -> RawTable {
        RawTable::new(
            "products",
            ["product_id", "product_name", "category", "price"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_known_categories_normalize_case_insensitively() {
        for raw in ["ELECTRONICS", "electronics", "Electronics", " eLeCtRoNiCs "] {
            assert_eq!(normalize_category(raw), "Electronics");
        }
        assert_eq!(normalize_category("SPORTS"), "Sports");
        assert_eq!(normalize_category("office supplies"), "Office Supplies");
        assert_eq!(normalize_category("OFFICE_SUPPLIES"), "Office Supplies");
        assert_eq!(normalize_category("Office Supplies"), "Office Supplies");
    }

    #[test]
    fn test_unknown_categories_fall_back_to_title_case() {
        assert_eq!(normalize_category("gadgets"), "Gadgets");
        assert_eq!(normalize_category("HOME & GARDEN"), "Home & Garden");
    }

    #[test]
    fn test_prices_must_be_positive_numbers() -> Result<()> {
        let input = raw(&[
            ["1", "Laptop", "electronics", "999.99"],
            ["2", "Freebie", "sports", "0"],
            ["3", "Refund", "sports", "-10"],
            ["4", "Mystery", "gadgets", "call us"],
            ["5", "Ghost", "gadgets", ""],
        ]);

        let cleaned = clean_products(&input)?;

        assert_eq!(cleaned.rows.len(), 1);
        assert_eq!(cleaned.rows[0].price, 999.99);
        assert_eq!(cleaned.report.dropped_for(DropReason::InvalidPrice), 4);
        Ok(())
    }

    #[test]
    fn test_missing_name_defaults_but_missing_category_does_not() -> Result<()> {
        let input = raw(&[["9", "", "", "5.00"], ["10", "   ", " \t ", "0.001"]]);

        let cleaned = clean_products(&input)?;

        for product in &cleaned.rows {
            assert_eq!(product.product_name, "Unknown Product");
            assert_eq!(product.category, None);
        }
        assert_eq!(cleaned.rows.len(), 2);
        assert_eq!(cleaned.rows[1].price, 0.001);
        Ok(())
    }
}
