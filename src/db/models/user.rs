//! User document model and the request/response types for user routes.

use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A user document as stored in the `users` collection.
///
/// `password` always holds the argon2 hash. Every write path must hash
/// before persisting; the raw input is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<bson::DateTime>,
    /// References into the recipes collection. No integrity enforcement;
    /// deleting a recipe does not cascade here.
    #[serde(default)]
    pub favorite_recipes: Vec<ObjectId>,
}

/// User representation returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime<Utc>>,
    pub favorite_recipes: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()),
            username: user.username,
            email: user.email,
            birthday: user.birthday.map(bson::DateTime::to_chrono),
            favorite_recipes: user
                .favorite_recipes
                .iter()
                .map(|id| id.to_hex())
                .collect(),
        }
    }
}

/// Body for `POST /users`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub birthday: Option<DateTime<Utc>>,
}

/// Body for `PUT /users/:Username`. The full profile is replaced; the
/// password is re-hashed before the update is persisted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub birthday: Option<DateTime<Utc>>,
}

/// Body for `POST /login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for `POST /login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_strips_password_hash() {
        let user = User {
            id: Some(ObjectId::new()),
            username: "marguerite".to_string(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$...".to_string(),
            email: "marguerite@example.com".to_string(),
            birthday: None,
            favorite_recipes: vec![ObjectId::new()],
        };
        let response = UserResponse::from(user);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("Password").is_none());
        assert_eq!(json["Username"], "marguerite");
        assert_eq!(json["FavoriteRecipes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_register_request_wire_format() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{
                "Username": "marguerite",
                "Password": "s3cret-passphrase",
                "Email": "marguerite@example.com",
                "Birthday": "1990-04-12T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(req.username, "marguerite");
        assert!(req.birthday.is_some());
    }

    #[test]
    fn test_birthday_round_trips_through_bson() {
        use chrono::TimeZone;

        let birthday = Utc.with_ymd_and_hms(1990, 4, 12, 0, 0, 0).unwrap();
        let user = User {
            id: None,
            username: "marguerite".to_string(),
            password: "hash".to_string(),
            email: "m@example.com".to_string(),
            birthday: Some(bson::DateTime::from_chrono(birthday)),
            favorite_recipes: Vec::new(),
        };
        let response = UserResponse::from(user);
        assert_eq!(response.birthday, Some(birthday));
    }

    #[test]
    fn test_register_request_birthday_is_optional() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"Username": "marguerite", "Password": "pw", "Email": "m@example.com"}"#,
        )
        .unwrap();
        assert!(req.birthday.is_none());
    }

    #[test]
    fn test_user_document_defaults_favorites() {
        let doc = mongodb::bson::doc! {
            "Username": "marguerite",
            "Password": "hash",
            "Email": "m@example.com",
        };
        let user: User = mongodb::bson::from_document(doc).unwrap();
        assert!(user.favorite_recipes.is_empty());
    }
}
