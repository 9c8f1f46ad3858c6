//! Recipe read endpoints.
//!
//! Recipes are created admin-side; the API only reads them, by several
//! query shapes. Lookups that match nothing return 404.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::error::ApiError;
use crate::db::{Category, Recipe};
use crate::AppState;

/// List all recipes
///
/// GET /recipes
pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.store.list_recipes().await?;
    Ok(Json(recipes))
}

/// Get a single recipe by name
///
/// GET /recipes/:Name
pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state
        .store
        .find_recipe_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No recipe named {}", name)))?;
    Ok(Json(recipe))
}

/// Get a cuisine by name, projected out of the first recipe carrying it
///
/// GET /recipes/cuisine/:Name
pub async fn get_cuisine(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let cuisine = state
        .store
        .find_cuisine_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No cuisine named {}", name)))?;
    Ok(Json(cuisine))
}

/// Get a meal type by name
///
/// GET /recipes/mealtype/:Name
pub async fn get_meal_type(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let meal_type = state
        .store
        .find_meal_type_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No meal type named {}", name)))?;
    Ok(Json(meal_type))
}
