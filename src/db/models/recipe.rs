//! Recipe document model.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A recipe document as stored in the `recipes` collection.
///
/// Field names serialize PascalCase to match the stored document shape,
/// which is also the wire format clients consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Recipe {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<Category>,
    pub difficulty: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Embedded sub-document describing a cuisine or meal type.
///
/// Stored inline with its owning recipe, not separately addressable,
/// but queryable by inner field path (`Cuisine.Name`, `MealType.Name`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Category {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn sample_recipe() -> Recipe {
        Recipe {
            id: None,
            name: "Shakshuka".to_string(),
            description: "Eggs poached in spiced tomato sauce".to_string(),
            cuisine: Some(Category {
                name: "Middle Eastern".to_string(),
                description: Some("Levantine and North African cooking".to_string()),
            }),
            meal_type: Some(Category {
                name: "Breakfast".to_string(),
                description: None,
            }),
            difficulty: "Easy".to_string(),
            time: "30 minutes".to_string(),
            image_path: None,
            key_ingredients: vec!["eggs".to_string(), "tomatoes".to_string()],
            featured: Some(true),
        }
    }

    #[test]
    fn test_document_field_names_are_pascal_case() {
        let doc = bson::to_document(&sample_recipe()).unwrap();
        assert!(doc.contains_key("Name"));
        assert!(doc.contains_key("Description"));
        assert!(doc.contains_key("MealType"));
        assert!(doc.contains_key("KeyIngredients"));
        let cuisine = doc.get_document("Cuisine").unwrap();
        assert_eq!(cuisine.get_str("Name").unwrap(), "Middle Eastern");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let mut recipe = sample_recipe();
        recipe.cuisine = None;
        recipe.image_path = None;
        recipe.key_ingredients.clear();
        let doc = bson::to_document(&recipe).unwrap();
        assert!(!doc.contains_key("Cuisine"));
        assert!(!doc.contains_key("ImagePath"));
        assert!(!doc.contains_key("KeyIngredients"));
    }

    #[test]
    fn test_deserialize_from_stored_document() {
        let doc = bson::doc! {
            "_id": ObjectId::new(),
            "Name": "Pho",
            "Description": "Vietnamese noodle soup",
            "Difficulty": "Hard",
            "Time": "6 hours",
            "Featured": false,
        };
        let recipe: Recipe = bson::from_document(doc).unwrap();
        assert_eq!(recipe.name, "Pho");
        assert!(recipe.cuisine.is_none());
        assert!(recipe.key_ingredients.is_empty());
        assert_eq!(recipe.featured, Some(false));
    }
}
