//! User account and favorites endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

use super::auth::{hash_password, Principal};
use super::error::ApiError;
use super::validation::validate_registration;
use crate::db::{ProfileUpdate, RegisterRequest, UpdateUserRequest, User, UserResponse};
use crate::AppState;

fn hash_or_internal(password: &str) -> Result<String, ApiError> {
    hash_password(password).map_err(|e| {
        tracing::error!(error = %e, "Failed to hash password");
        ApiError::internal("Failed to process password")
    })
}

fn parse_recipe_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::bad_request("Invalid recipe id"))
}

/// List all users
///
/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by username
///
/// GET /users/:Username
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .store
        .find_user(&username)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No user named {}", username)))?;
    Ok(Json(UserResponse::from(user)))
}

/// Register a new user
///
/// POST /users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate_registration(&request)?;

    if state.store.find_user(&request.username).await?.is_some() {
        // Existing clients depend on 400 for a taken username, not 409
        return Err(
            ApiError::conflict(format!("{} already exists", request.username))
                .with_status(StatusCode::BAD_REQUEST),
        );
    }

    let password_hash = hash_or_internal(&request.password)?;
    let user = User {
        id: None,
        username: request.username,
        password: password_hash,
        email: request.email,
        birthday: request.birthday.map(bson::DateTime::from_chrono),
        favorite_recipes: Vec::new(),
    };

    let created = state.store.create_user(user).await?;
    tracing::info!(username = %created.username, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

/// Update a user's profile. The submitted password is always re-hashed
/// before it is persisted.
///
/// PUT /users/:Username
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    principal: Principal,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let update = ProfileUpdate {
        username: request.username,
        password_hash: hash_or_internal(&request.password)?,
        email: request.email,
        birthday: request.birthday.map(bson::DateTime::from_chrono),
    };

    let updated = state
        .store
        .update_user(&username, update)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No user named {}", username)))?;

    tracing::info!(username = %username, actor = %principal.username, "Profile updated");
    Ok(Json(UserResponse::from(updated)))
}

/// Add a recipe to a user's favorites
///
/// PUT /users/:Username/recipes/:RecipeID
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Path((username, recipe_id)): Path<(String, String)>,
) -> Result<Json<UserResponse>, ApiError> {
    let recipe_id = parse_recipe_id(&recipe_id)?;
    let updated = state
        .store
        .add_favorite(&username, recipe_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No user named {}", username)))?;
    Ok(Json(UserResponse::from(updated)))
}

/// Remove a recipe from a user's favorites
///
/// DELETE /users/:Username/recipes/:RecipeID
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path((username, recipe_id)): Path<(String, String)>,
) -> Result<Json<UserResponse>, ApiError> {
    let recipe_id = parse_recipe_id(&recipe_id)?;
    let updated = state
        .store
        .remove_favorite(&username, recipe_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No user named {}", username)))?;
    Ok(Json(UserResponse::from(updated)))
}

/// Delete a user by username
///
/// DELETE /users/:Username
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    principal: Principal,
) -> Result<String, ApiError> {
    state
        .store
        .delete_user(&username)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} was not found", username)))?;

    tracing::info!(username = %username, actor = %principal.username, "User deleted");
    Ok(format!("{} was deleted.", username))
}
