//! Data access layer over the MongoDB document store.
//!
//! Every handler issues exactly one store call; not-found is an explicit
//! `None` here, store failures propagate as `mongodb::error::Error`.

mod models;

pub use models::*;

use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use tracing::info;

use crate::config::DatabaseConfig;

pub type StoreResult<T> = Result<T, mongodb::error::Error>;

/// Fields written by a profile update. The password arrives here already
/// hashed; `Store` never sees a raw password.
#[derive(Debug)]
pub struct ProfileUpdate {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<bson::DateTime>,
}

/// Typed handles on the two collections backing the API.
#[derive(Debug, Clone)]
pub struct Store {
    recipes: Collection<Recipe>,
    users: Collection<User>,
}

impl Store {
    /// Connect to the configured store. The driver connects lazily; a bad
    /// URI surfaces here, an unreachable server on the first operation.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.name);
        info!(database = %config.name, "Connected to document store");
        Ok(Self {
            recipes: database.collection("recipes"),
            users: database.collection("users"),
        })
    }

    // ------------------------------------------------------------------
    // Recipes
    // ------------------------------------------------------------------

    pub async fn list_recipes(&self) -> StoreResult<Vec<Recipe>> {
        self.recipes.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_recipe_by_name(&self, name: &str) -> StoreResult<Option<Recipe>> {
        self.recipes.find_one(doc! { "Name": name }).await
    }

    /// Find a recipe whose embedded cuisine matches `name` and return just
    /// the cuisine sub-document.
    pub async fn find_cuisine_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let recipe = self.recipes.find_one(doc! { "Cuisine.Name": name }).await?;
        Ok(recipe.and_then(|r| r.cuisine))
    }

    pub async fn find_meal_type_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let recipe = self
            .recipes
            .find_one(doc! { "MealType.Name": name })
            .await?;
        Ok(recipe.and_then(|r| r.meal_type))
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.users.find(doc! {}).await?.try_collect().await
    }

    pub async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        self.users.find_one(doc! { "Username": username }).await
    }

    pub async fn create_user(&self, mut user: User) -> StoreResult<User> {
        let result = self.users.insert_one(&user).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    /// Replace the profile fields of a user, returning the updated document.
    pub async fn update_user(
        &self,
        username: &str,
        update: ProfileUpdate,
    ) -> StoreResult<Option<User>> {
        self.users
            .find_one_and_update(
                doc! { "Username": username },
                doc! { "$set": {
                    "Username": update.username,
                    "Password": update.password_hash,
                    "Email": update.email,
                    "Birthday": update.birthday,
                }},
            )
            .return_document(ReturnDocument::After)
            .await
    }

    /// Add a recipe reference to the user's favorites. `$addToSet` keeps
    /// the operation idempotent at the store level.
    pub async fn add_favorite(
        &self,
        username: &str,
        recipe_id: ObjectId,
    ) -> StoreResult<Option<User>> {
        self.users
            .find_one_and_update(
                doc! { "Username": username },
                doc! { "$addToSet": { "FavoriteRecipes": recipe_id } },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    pub async fn remove_favorite(
        &self,
        username: &str,
        recipe_id: ObjectId,
    ) -> StoreResult<Option<User>> {
        self.users
            .find_one_and_update(
                doc! { "Username": username },
                doc! { "$pull": { "FavoriteRecipes": recipe_id } },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    /// Delete a user by username, returning the removed document if any.
    pub async fn delete_user(&self, username: &str) -> StoreResult<Option<User>> {
        self.users
            .find_one_and_delete(doc! { "Username": username })
            .await
    }
}
