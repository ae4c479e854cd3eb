//! Shopping-list aggregation and CSV export.
//!
//! Sums ingredient amounts across every recipe in a user's cart, grouped by
//! ingredient identity. Units are never converted: the unit is a property of
//! the ingredient, so two lines for the same ingredient always share one
//! unit by construction.

use std::collections::BTreeMap;

use serde::Serialize;

/// One raw ingredient line from a cart recipe, joined with its catalog data.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Ingredient name.
    pub name: String,
    /// Measurement unit owned by the ingredient.
    pub measurement_unit: String,
    /// Amount on the recipe line.
    pub amount: f64,
}

/// One aggregated shopping-list row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntry {
    /// Ingredient name.
    pub name: String,
    /// Summed amount across all cart recipes.
    pub amount: f64,
    /// Measurement unit.
    pub measurement_unit: String,
}

/// CSV header row, preserved verbatim for export compatibility.
pub const CSV_HEADER: &str = "Ингредиент,Количество,Единица измерения";

/// Group cart lines by ingredient identity and sum their amounts.
///
/// Output order is deterministic: ascending by ingredient name. Re-running
/// the aggregation over the same lines always yields identical output.
pub fn aggregate(lines: Vec<CartLine>) -> Vec<ShoppingListEntry> {
    let mut totals: BTreeMap<String, (f64, String)> = BTreeMap::new();
    for line in lines {
        totals
            .entry(line.name)
            .and_modify(|(amount, _)| *amount += line.amount)
            .or_insert((line.amount, line.measurement_unit));
    }
    totals
        .into_iter()
        .map(|(name, (amount, measurement_unit))| ShoppingListEntry {
            name,
            amount,
            measurement_unit,
        })
        .collect()
}

/// Render aggregated entries as the CSV export document.
pub fn render_csv(entries: &[ShoppingListEntry]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for entry in entries {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(&entry.name),
            format_amount(entry.amount),
            csv_field(&entry.measurement_unit)
        ));
    }
    out
}

/// Quote a field per RFC 4180 when it contains a separator, a quote, or a
/// line break; embedded quotes are doubled. Plain fields pass unchanged.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Whole amounts print without a fractional part; others keep it.
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount}")
    }
}
