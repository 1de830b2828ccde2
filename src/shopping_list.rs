// ABOUTME: Shopping list aggregation: group cart ingredient rows and render text
// ABOUTME: Pure functions over rows produced by the cart store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

//! Shopping list report generation.
//!
//! The cart store expands a user's cart into one row per
//! `(recipe, ingredient)` pair; this module groups those rows by ingredient
//! name, sums the amounts, and renders the downloadable report.
//!
//! Grouping is by name alone, not `(name, measurement_unit)`: two
//! ingredients sharing a name but measured in different units collapse into
//! one line under the first unit encountered. Clients depend on the exact
//! line format, so both behaviors are pinned by tests.

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Filename clients receive for the downloaded report
pub const REPORT_FILENAME: &str = "Ingredients_in_cart.txt";

/// One `(recipe, ingredient)` expansion row from the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRow {
    /// Ingredient name
    pub name: String,
    /// Ingredient measurement unit
    pub measurement_unit: String,
    /// Amount of this ingredient in one recipe
    pub amount: i64,
}

/// One aggregated line of the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    /// Ingredient name (grouping key)
    pub name: String,
    /// Unit of the first row encountered for this name
    pub measurement_unit: String,
    /// Sum of amounts across all cart recipes
    pub total_amount: i64,
}

/// Group rows by ingredient name and sum amounts.
///
/// Entries keep the order in which each name was first encountered, so the
/// report is stable for a given cart state.
#[must_use]
pub fn aggregate(rows: &[IngredientRow]) -> Vec<ShoppingListEntry> {
    let mut entries: Vec<ShoppingListEntry> = Vec::new();

    for row in rows {
        match entries.iter_mut().find(|entry| entry.name == row.name) {
            Some(entry) => entry.total_amount += row.amount,
            None => entries.push(ShoppingListEntry {
                name: row.name.clone(),
                measurement_unit: row.measurement_unit.clone(),
                total_amount: row.amount,
            }),
        }
    }

    entries
}

/// Render the aggregated entries as the report text, one line per
/// ingredient: `"<name> - <amount><unit>\n"`
#[must_use]
pub fn render(entries: &[ShoppingListEntry]) -> String {
    let mut report = String::new();
    for entry in entries {
        report.push_str(&format!(
            "{} - {}{}\n",
            entry.name, entry.total_amount, entry.measurement_unit
        ));
    }
    report
}

/// Build the full report from cart rows.
///
/// # Errors
///
/// Returns `EmptyCart` when there are no rows; the report is never an
/// empty string
pub fn build_report(rows: &[IngredientRow]) -> AppResult<String> {
    if rows.is_empty() {
        return Err(AppError::empty_cart());
    }
    Ok(render(&aggregate(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, unit: &str, amount: i64) -> IngredientRow {
        IngredientRow {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
            amount,
        }
    }

    #[test]
    fn test_sums_same_ingredient_across_recipes() {
        let rows = vec![row("Flour", "g", 200), row("Flour", "g", 150)];
        let report = build_report(&rows).unwrap();
        assert_eq!(report, "Flour - 350g\n");
    }

    #[test]
    fn test_preserves_first_encounter_order() {
        let rows = vec![
            row("Sugar", "g", 50),
            row("Flour", "g", 200),
            row("Sugar", "g", 25),
            row("Milk", "ml", 300),
        ];
        let entries = aggregate(&rows);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Sugar", "Flour", "Milk"]);
        assert_eq!(entries[0].total_amount, 75);
    }

    #[test]
    fn test_empty_cart_is_an_error() {
        let err = build_report(&[]).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::EmptyCart);
    }

    #[test]
    fn test_name_collision_uses_first_unit() {
        // Known quirk: grouping ignores the measurement unit
        let rows = vec![row("Pepper", "g", 10), row("Pepper", "pcs", 2)];
        let entries = aggregate(&rows);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].measurement_unit, "g");
        assert_eq!(entries[0].total_amount, 12);
    }

    #[test]
    fn test_render_line_format() {
        let entries = vec![ShoppingListEntry {
            name: "Milk".to_owned(),
            measurement_unit: "ml".to_owned(),
            total_amount: 500,
        }];
        assert_eq!(render(&entries), "Milk - 500ml\n");
    }
}
