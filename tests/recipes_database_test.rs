// ABOUTME: Unit tests for the recipes database manager
// ABOUTME: CRUD with association replacement, filters, and validation rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use foodgram_api::database::recipes::{
    CreateRecipeRequest, IngredientAmountRequest, ListRecipesFilter, UpdateRecipeRequest,
};
use foodgram_api::database::Database;
use foodgram_api::errors::ErrorCode;
use foodgram_api::models::User;

struct Fixture {
    database: Database,
    author: User,
    flour_id: i64,
    milk_id: i64,
    breakfast_tag: i64,
    dinner_tag: i64,
}

async fn fixture() -> Fixture {
    let database = common::create_test_database().await.unwrap();
    let author = common::create_test_user(&database, "author@example.com", "author")
        .await
        .unwrap();

    let flour = database.ingredients().create("Flour", "g").await.unwrap();
    let milk = database.ingredients().create("Milk", "ml").await.unwrap();
    let breakfast = database.tags().create("Breakfast", "breakfast").await.unwrap();
    let dinner = database.tags().create("Dinner", "dinner").await.unwrap();

    Fixture {
        database,
        author,
        flour_id: flour.id,
        milk_id: milk.id,
        breakfast_tag: breakfast.id,
        dinner_tag: dinner.id,
    }
}

fn pancake_request(fixture: &Fixture) -> CreateRecipeRequest {
    CreateRecipeRequest {
        name: "Pancakes".into(),
        text: "Mix and fry.".into(),
        cooking_time: 20,
        image: None,
        ingredients: vec![
            IngredientAmountRequest {
                id: fixture.flour_id,
                amount: 200,
            },
            IngredientAmountRequest {
                id: fixture.milk_id,
                amount: 300,
            },
        ],
        tags: vec![fixture.breakfast_tag],
    }
}

#[tokio::test]
async fn create_resolves_full_detail() {
    let fx = fixture().await;

    let detail = fx
        .database
        .recipes()
        .create(fx.author.id, &pancake_request(&fx))
        .await
        .unwrap();

    assert!(detail.recipe.id >= 1);
    assert_eq!(detail.author.username, "author");
    assert_eq!(detail.tags.len(), 1);
    assert_eq!(detail.tags[0].slug, "breakfast");
    assert_eq!(detail.ingredients.len(), 2);

    let flour = detail
        .ingredients
        .iter()
        .find(|i| i.name == "Flour")
        .unwrap();
    assert_eq!(flour.amount, 200);
    assert_eq!(flour.measurement_unit, "g");
}

#[tokio::test]
async fn create_rejects_unknown_ingredient() {
    let fx = fixture().await;

    let mut request = pancake_request(&fx);
    request.ingredients.push(IngredientAmountRequest {
        id: 9999,
        amount: 1,
    });

    let error = fx
        .database
        .recipes()
        .create(fx.author.id, &request)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    // The transaction rolled back; nothing was created
    let filter = ListRecipesFilter {
        limit: 10,
        ..Default::default()
    };
    assert_eq!(fx.database.recipes().count(&filter).await.unwrap(), 0);
}

#[tokio::test]
async fn create_rejects_invalid_payloads() {
    let fx = fixture().await;

    let mut no_ingredients = pancake_request(&fx);
    no_ingredients.ingredients.clear();
    assert!(fx
        .database
        .recipes()
        .create(fx.author.id, &no_ingredients)
        .await
        .is_err());

    let mut zero_amount = pancake_request(&fx);
    zero_amount.ingredients[0].amount = 0;
    assert!(fx
        .database
        .recipes()
        .create(fx.author.id, &zero_amount)
        .await
        .is_err());

    let mut no_tags = pancake_request(&fx);
    no_tags.tags.clear();
    assert!(fx
        .database
        .recipes()
        .create(fx.author.id, &no_tags)
        .await
        .is_err());

    let mut zero_time = pancake_request(&fx);
    zero_time.cooking_time = 0;
    assert!(fx
        .database
        .recipes()
        .create(fx.author.id, &zero_time)
        .await
        .is_err());
}

#[tokio::test]
async fn update_replaces_associations() {
    let fx = fixture().await;
    let created = fx
        .database
        .recipes()
        .create(fx.author.id, &pancake_request(&fx))
        .await
        .unwrap();

    let request = UpdateRecipeRequest {
        name: Some("Evening pancakes".into()),
        text: None,
        cooking_time: None,
        image: None,
        ingredients: vec![IngredientAmountRequest {
            id: fx.flour_id,
            amount: 500,
        }],
        tags: vec![fx.dinner_tag],
    };

    let updated = fx
        .database
        .recipes()
        .update(created.recipe.id, &request)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.recipe.name, "Evening pancakes");
    // Untouched scalar fields keep their values
    assert_eq!(updated.recipe.cooking_time, 20);
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.ingredients[0].amount, 500);
    assert_eq!(updated.tags[0].slug, "dinner");
}

#[tokio::test]
async fn update_missing_recipe_is_none() {
    let fx = fixture().await;
    let request = UpdateRecipeRequest {
        name: None,
        text: None,
        cooking_time: None,
        image: None,
        ingredients: vec![IngredientAmountRequest {
            id: fx.flour_id,
            amount: 1,
        }],
        tags: vec![fx.breakfast_tag],
    };

    assert!(fx
        .database
        .recipes()
        .update(12345, &request)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn delete_removes_recipe_and_links() {
    let fx = fixture().await;
    let created = fx
        .database
        .recipes()
        .create(fx.author.id, &pancake_request(&fx))
        .await
        .unwrap();
    let recipe_id = created.recipe.id;

    fx.database
        .favorites()
        .add(fx.author.id, recipe_id)
        .await
        .unwrap();
    fx.database.cart().add(fx.author.id, recipe_id).await.unwrap();

    assert!(fx.database.recipes().delete(recipe_id).await.unwrap());
    assert!(!fx.database.recipes().exists(recipe_id).await.unwrap());
    assert!(!fx
        .database
        .favorites()
        .contains(fx.author.id, recipe_id)
        .await
        .unwrap());
    assert!(!fx
        .database
        .cart()
        .contains(fx.author.id, recipe_id)
        .await
        .unwrap());

    // Second delete is a no-op
    assert!(!fx.database.recipes().delete(recipe_id).await.unwrap());
}

#[tokio::test]
async fn list_filters_by_author_tag_and_links() {
    let fx = fixture().await;
    let other = common::create_test_user(&fx.database, "other@example.com", "other")
        .await
        .unwrap();

    let pancakes = fx
        .database
        .recipes()
        .create(fx.author.id, &pancake_request(&fx))
        .await
        .unwrap();

    let mut soup_request = pancake_request(&fx);
    soup_request.name = "Soup".into();
    soup_request.tags = vec![fx.dinner_tag];
    let soup = fx
        .database
        .recipes()
        .create(other.id, &soup_request)
        .await
        .unwrap();

    let base = ListRecipesFilter {
        limit: 10,
        ..Default::default()
    };
    assert_eq!(fx.database.recipes().count(&base).await.unwrap(), 2);

    let by_author = ListRecipesFilter {
        author: Some(other.id),
        limit: 10,
        ..Default::default()
    };
    let results = fx.database.recipes().list(&by_author).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe.name, "Soup");

    let by_tag = ListRecipesFilter {
        tag_slugs: vec!["breakfast".into()],
        limit: 10,
        ..Default::default()
    };
    let results = fx.database.recipes().list(&by_tag).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe.id, pancakes.recipe.id);

    // Multiple slugs OR together
    let by_tags = ListRecipesFilter {
        tag_slugs: vec!["breakfast".into(), "dinner".into()],
        limit: 10,
        ..Default::default()
    };
    assert_eq!(fx.database.recipes().count(&by_tags).await.unwrap(), 2);

    fx.database
        .favorites()
        .add(fx.author.id, soup.recipe.id)
        .await
        .unwrap();
    let by_favorite = ListRecipesFilter {
        favorited_by: Some(fx.author.id),
        limit: 10,
        ..Default::default()
    };
    let results = fx.database.recipes().list(&by_favorite).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe.id, soup.recipe.id);

    fx.database
        .cart()
        .add(fx.author.id, pancakes.recipe.id)
        .await
        .unwrap();
    let by_cart = ListRecipesFilter {
        in_cart_of: Some(fx.author.id),
        limit: 10,
        ..Default::default()
    };
    let results = fx.database.recipes().list(&by_cart).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe.id, pancakes.recipe.id);
}

#[tokio::test]
async fn author_listing_respects_limit_and_count() {
    let fx = fixture().await;

    for i in 0..3 {
        let mut request = pancake_request(&fx);
        request.name = format!("Recipe {i}");
        fx.database
            .recipes()
            .create(fx.author.id, &request)
            .await
            .unwrap();
    }

    let preview = fx
        .database
        .recipes()
        .list_by_author(fx.author.id, 2)
        .await
        .unwrap();
    assert_eq!(preview.len(), 2);

    assert_eq!(
        fx.database
            .recipes()
            .count_by_author(fx.author.id)
            .await
            .unwrap(),
        3
    );
}
