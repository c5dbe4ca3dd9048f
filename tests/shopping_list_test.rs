// ABOUTME: Tests for shopping cart aggregation and report rendering
// ABOUTME: Grouping identity, order invariance, text layout, XML round-trip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

#![allow(missing_docs, clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use foodgram_api::shopping_list::{
    aggregate, render, CartRecipe, IngredientAmount, ReportFormat, ShoppingListEntry,
};
use quick_xml::events::Event;
use quick_xml::Reader;

fn ingredient(name: &str, unit: &str, amount: u64) -> IngredientAmount {
    IngredientAmount {
        name: name.to_owned(),
        unit: unit.to_owned(),
        amount,
    }
}

fn recipe(name: &str, author: &str, ingredients: Vec<IngredientAmount>) -> CartRecipe {
    CartRecipe {
        name: name.to_owned(),
        author: author.to_owned(),
        ingredients,
    }
}

fn sample_cart() -> Vec<CartRecipe> {
    vec![
        recipe(
            "Pancakes",
            "Jane Doe",
            vec![ingredient("Flour", "g", 200), ingredient("Milk", "ml", 300)],
        ),
        recipe(
            "Bread",
            "John Smith",
            vec![ingredient("Flour", "g", 150), ingredient("Salt", "g", 5)],
        ),
        recipe("Omelette", "Jane Doe", vec![ingredient("Egg", "pcs", 3)]),
    ]
}

fn report_date() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn duplicate_identity_sums_exactly() {
    let cart = vec![
        recipe("A", "X", vec![ingredient("Flour", "g", 200)]),
        recipe("B", "Y", vec![ingredient("Flour", "g", 150)]),
    ];

    let entries = aggregate(&cart);
    assert_eq!(
        entries,
        vec![ShoppingListEntry {
            name: "Flour".into(),
            unit: "g".into(),
            amount: 350,
        }]
    );
}

#[test]
fn empty_cart_is_not_an_error() {
    assert!(aggregate(&[]).is_empty());

    let text = render("Jane Doe", report_date(), &[], ReportFormat::Text).unwrap();
    assert!(text.contains("Shopping list for Jane Doe"));
    assert!(!text.contains(" - "));

    let xml = render("Jane Doe", report_date(), &[], ReportFormat::Xml).unwrap();
    assert!(xml.contains("<ShoppingCart>"));
    assert!(!xml.contains("<Ingredient>"));
}

#[test]
fn aggregation_invariant_under_input_permutation() {
    let baseline = aggregate(&sample_cart());

    let mut rotated = sample_cart();
    for _ in 0..rotated.len() {
        rotated.rotate_left(1);
        assert_eq!(aggregate(&rotated), baseline);
    }

    let mut reversed = sample_cart();
    reversed.reverse();
    assert_eq!(aggregate(&reversed), baseline);
}

#[test]
fn text_report_numbers_entries_in_name_order() {
    let report = render("Jane Doe", report_date(), &sample_cart(), ReportFormat::Text).unwrap();

    let egg = report.find("1. Egg - 3 pcs").unwrap();
    let flour = report.find("2. Flour - 350 g").unwrap();
    let milk = report.find("3. Milk - 300 ml").unwrap();
    let salt = report.find("4. Salt - 5 g").unwrap();
    assert!(egg < flour && flour < milk && milk < salt);

    assert!(report.contains("Shopping list for Jane Doe"));
    assert!(report.contains("Date: 01.06.2025"));
    assert!(report.contains("- Pancakes (Jane Doe)"));
}

#[test]
fn xml_report_round_trips_through_a_parser() {
    let cart = sample_cart();
    let expected = aggregate(&cart);

    let xml = render("Jane Doe", report_date(), &cart, ReportFormat::Xml).unwrap();
    let parsed = parse_report(&xml);

    assert_eq!(parsed, expected);
}

#[test]
fn xml_report_carries_user_attributes() {
    let xml = render("Jane O'Doe", report_date(), &sample_cart(), ReportFormat::Xml).unwrap();

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut found_user = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"User" => {
                let name = e.try_get_attribute("name").unwrap().unwrap();
                assert_eq!(name.unescape_value().unwrap(), "Jane O'Doe");
                let date = e.try_get_attribute("date").unwrap().unwrap();
                assert_eq!(date.unescape_value().unwrap(), "01.06.2025");
                found_user = true;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    assert!(found_user);
}

/// Pull (name, amount, unit) triples back out of the rendered XML
fn parse_report(xml: &str) -> Vec<ShoppingListEntry> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current_field: Option<String> = None;
    let mut name = String::new();
    let mut unit = String::new();
    let mut amount = 0u64;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => {
                current_field = Some(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
            }
            Event::Text(t) => {
                let text = t.unescape().unwrap().into_owned();
                match current_field.as_deref() {
                    Some("Name") => name = text,
                    Some("Amount") => amount = text.parse().unwrap(),
                    Some("MeasurementUnit") => unit = text,
                    _ => {}
                }
            }
            Event::End(e) if e.name().as_ref() == b"Ingredient" => {
                entries.push(ShoppingListEntry {
                    name: std::mem::take(&mut name),
                    unit: std::mem::take(&mut unit),
                    amount,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    entries
}
