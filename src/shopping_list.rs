// ABOUTME: Shopping cart aggregation and report rendering
// ABOUTME: Groups cart ingredients by (name, unit), sums amounts, renders text or XML
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! # Shopping List Aggregator
//!
//! Pure transform from a user's cart to a downloadable shopping list.
//! Ingredients are grouped by `(name, measurement unit)` identity and their
//! amounts summed exactly; groups are sorted by name for reproducible
//! output. Rendering never touches the clock or the database; the display
//! name and generation timestamp are parameters.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::str::FromStr;

/// One `(ingredient, amount)` association inside a cart recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientAmount {
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub unit: String,
    /// Amount in the recipe, always >= 1
    pub amount: u64,
}

/// A recipe in the user's shopping cart, as projected by the database layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartRecipe {
    /// Recipe name
    pub name: String,
    /// Author display name
    pub author: String,
    /// Ingredient associations of the recipe
    pub ingredients: Vec<IngredientAmount>,
}

/// One aggregated row of the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub unit: String,
    /// Total amount across every cart recipe
    pub amount: u64,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable plain text listing
    #[default]
    Text,
    /// Pretty-printed XML document
    Xml,
}

impl ReportFormat {
    /// MIME type for the rendered report
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Xml => "application/xml; charset=utf-8",
        }
    }

    /// Download filename for the rendered report
    #[must_use]
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Text => "shopping_list.txt",
            Self::Xml => "shopping_list.xml",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txt" | "text" => Ok(Self::Text),
            "xml" => Ok(Self::Xml),
            _ => Err(AppError::invalid_input(format!(
                "Unsupported report format: {s}"
            ))),
        }
    }
}

/// Aggregate cart recipes into one deduplicated, summed ingredient list
///
/// Identity is the `(name, unit)` pair; totals are exact sums of every
/// contribution, so input order never changes the result. Entries come
/// back sorted by name (unit as tie-break).
#[must_use]
pub fn aggregate(recipes: &[CartRecipe]) -> Vec<ShoppingListEntry> {
    let mut groups: BTreeMap<(String, String), u64> = BTreeMap::new();

    for recipe in recipes {
        for item in &recipe.ingredients {
            let key = (item.name.clone(), item.unit.clone());
            *groups.entry(key).or_insert(0) += item.amount;
        }
    }

    groups
        .into_iter()
        .map(|((name, unit), amount)| ShoppingListEntry { name, unit, amount })
        .collect()
}

/// Render a user's cart as a downloadable report in the requested format
///
/// An empty cart is a defined state: the report simply carries no
/// ingredient entries.
///
/// # Errors
///
/// Returns an error if XML serialization fails
pub fn render(
    user_name: &str,
    generated_at: DateTime<Utc>,
    recipes: &[CartRecipe],
    format: ReportFormat,
) -> AppResult<String> {
    let entries = aggregate(recipes);
    match format {
        ReportFormat::Text => Ok(render_text(user_name, generated_at, &entries, recipes)),
        ReportFormat::Xml => render_xml(user_name, generated_at, &entries),
    }
}

/// Report date format shared by both renderers
fn format_date(generated_at: DateTime<Utc>) -> String {
    generated_at.format("%d.%m.%Y").to_string()
}

fn render_text(
    user_name: &str,
    generated_at: DateTime<Utc>,
    entries: &[ShoppingListEntry],
    recipes: &[CartRecipe],
) -> String {
    let mut out = String::new();

    // Infallible: fmt::Write on String never errors
    let _ = writeln!(out, "Shopping list for {user_name}");
    let _ = writeln!(out, "Date: {}", format_date(generated_at));
    out.push('\n');

    for (index, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {} {}",
            index + 1,
            entry.name,
            entry.amount,
            entry.unit
        );
    }

    if !recipes.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "For recipes:");
        for recipe in recipes {
            let _ = writeln!(out, "- {} ({})", recipe.name, recipe.author);
        }
    }

    out
}

fn render_xml(
    user_name: &str,
    generated_at: DateTime<Utc>,
    entries: &[ShoppingListEntry],
) -> AppResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    let write_err = |e: std::io::Error| AppError::internal(format!("Failed to write XML: {e}"));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(write_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("ShoppingCart")))
        .map_err(write_err)?;

    let mut user_element = BytesStart::new("User");
    user_element.push_attribute(("name", user_name));
    user_element.push_attribute(("date", format_date(generated_at).as_str()));
    writer
        .write_event(Event::Start(user_element))
        .map_err(write_err)?;

    for entry in entries {
        writer
            .write_event(Event::Start(BytesStart::new("Ingredient")))
            .map_err(write_err)?;

        for (tag, value) in [
            ("Name", entry.name.as_str()),
            ("Amount", &entry.amount.to_string()),
            ("MeasurementUnit", entry.unit.as_str()),
        ] {
            writer
                .write_event(Event::Start(BytesStart::new(tag)))
                .map_err(write_err)?;
            writer
                .write_event(Event::Text(BytesText::new(value)))
                .map_err(write_err)?;
            writer
                .write_event(Event::End(BytesEnd::new(tag)))
                .map_err(write_err)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("Ingredient")))
            .map_err(write_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("User")))
        .map_err(write_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("ShoppingCart")))
        .map_err(write_err)?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| AppError::internal(format!("XML output was not valid UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn flour(amount: u64) -> IngredientAmount {
        IngredientAmount {
            name: "Flour".into(),
            unit: "g".into(),
            amount,
        }
    }

    fn cart() -> Vec<CartRecipe> {
        vec![
            CartRecipe {
                name: "Pancakes".into(),
                author: "Jane Doe".into(),
                ingredients: vec![
                    flour(200),
                    IngredientAmount {
                        name: "Milk".into(),
                        unit: "ml".into(),
                        amount: 300,
                    },
                ],
            },
            CartRecipe {
                name: "Bread".into(),
                author: "John Smith".into(),
                ingredients: vec![flour(150)],
            },
        ]
    }

    fn report_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap()
    }

    #[test]
    fn aggregates_same_identity_across_recipes() {
        let entries = aggregate(&cart());

        assert_eq!(entries.len(), 2);
        let flour_entry = entries.iter().find(|e| e.name == "Flour").unwrap();
        assert_eq!(flour_entry.amount, 350);
        assert_eq!(flour_entry.unit, "g");
    }

    #[test]
    fn same_name_different_unit_stays_separate() {
        let recipes = vec![CartRecipe {
            name: "Mixed".into(),
            author: "A".into(),
            ingredients: vec![
                IngredientAmount {
                    name: "Sugar".into(),
                    unit: "g".into(),
                    amount: 100,
                },
                IngredientAmount {
                    name: "Sugar".into(),
                    unit: "tbsp".into(),
                    amount: 2,
                },
            ],
        }];

        let entries = aggregate(&recipes);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn empty_cart_yields_empty_list() {
        assert!(aggregate(&[]).is_empty());

        let report = render("Jane Doe", report_date(), &[], ReportFormat::Text).unwrap();
        assert!(report.contains("Jane Doe"));
        assert!(!report.contains(" - "));
    }

    #[test]
    fn aggregation_is_order_invariant() {
        let forward = aggregate(&cart());
        let mut reversed_input = cart();
        reversed_input.reverse();
        let reversed = aggregate(&reversed_input);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn entries_sorted_by_name() {
        let entries = aggregate(&cart());
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Flour", "Milk"]);
    }

    #[test]
    fn text_report_layout() {
        let report = render("Jane Doe", report_date(), &cart(), ReportFormat::Text).unwrap();

        assert!(report.contains("Shopping list for Jane Doe"));
        assert!(report.contains("Date: 14.03.2025"));
        assert!(report.contains("1. Flour - 350 g"));
        assert!(report.contains("2. Milk - 300 ml"));
        assert!(report.contains("- Pancakes (Jane Doe)"));
        assert!(report.contains("- Bread (John Smith)"));
    }

    #[test]
    fn xml_report_structure() {
        let report = render("Jane Doe", report_date(), &cart(), ReportFormat::Xml).unwrap();

        assert!(report.starts_with("<?xml"));
        assert!(report.contains("<ShoppingCart>"));
        assert!(report.contains("<User name=\"Jane Doe\" date=\"14.03.2025\">"));
        assert!(report.contains("<Name>Flour</Name>"));
        assert!(report.contains("<Amount>350</Amount>"));
        assert!(report.contains("<MeasurementUnit>g</MeasurementUnit>"));
    }

    #[test]
    fn xml_escapes_special_characters() {
        let recipes = vec![CartRecipe {
            name: "Salad".into(),
            author: "A".into(),
            ingredients: vec![IngredientAmount {
                name: "Salt & Pepper <mix>".into(),
                unit: "g".into(),
                amount: 5,
            }],
        }];

        let report = render("B", report_date(), &recipes, ReportFormat::Xml).unwrap();
        assert!(report.contains("Salt &amp; Pepper &lt;mix&gt;"));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("txt".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("xml".parse::<ReportFormat>().unwrap(), ReportFormat::Xml);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }
}
