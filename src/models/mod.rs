use mongodb::bson::oid::ObjectId;
use mongodb::bson::{DateTime, Document};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An affiliate platform listing shown on the public page.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Game {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    pub bonus: String,
    pub rating: f64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "affiliateUrl")]
    pub affiliate_url: String,
    pub features: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

/// A click on a game's affiliate link. `game_id` is a weak reference:
/// it is stored as given and never checked against the games collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Click {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "gameId")]
    pub game_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateGame {
    pub name: String,
    pub description: String,
    pub bonus: String,
    pub rating: f64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "affiliateUrl")]
    pub affiliate_url: String,
    pub features: Vec<String>,
}

impl CreateGame {
    /// Every string field and the feature list must be non-empty.
    /// The rating range (0-5) is a UI convention, not enforced here.
    pub fn validate(&self) -> Result<(), AppError> {
        let strings = [
            ("name", &self.name),
            ("description", &self.description),
            ("bonus", &self.bonus),
            ("imageUrl", &self.image_url),
            ("affiliateUrl", &self.affiliate_url),
        ];
        for (field, value) in strings {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} must not be empty")));
            }
        }
        if self.features.is_empty() || self.features.iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::Validation(
                "features must be a non-empty list of non-empty strings".to_string(),
            ));
        }
        Ok(())
    }

    /// Stamps server-side timestamps; the id is assigned by Mongo on insert.
    pub fn into_game(self) -> Game {
        let now = DateTime::now();
        Game {
            id: None,
            name: self.name,
            description: self.description,
            bonus: self.bonus,
            rating: self.rating,
            image_url: self.image_url,
            affiliate_url: self.affiliate_url,
            features: self.features,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update: only the fields present in the payload are replaced.
/// Timestamps are server-owned and cannot be set by the client.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateGame {
    pub name: Option<String>,
    pub description: Option<String>,
    pub bonus: Option<String>,
    pub rating: Option<f64>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "affiliateUrl")]
    pub affiliate_url: Option<String>,
    pub features: Option<Vec<String>>,
}

impl UpdateGame {
    /// Builds the `$set` document: provided fields plus a fresh `updatedAt`.
    pub fn set_doc(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(description) = &self.description {
            set.insert("description", description.as_str());
        }
        if let Some(bonus) = &self.bonus {
            set.insert("bonus", bonus.as_str());
        }
        if let Some(rating) = self.rating {
            set.insert("rating", rating);
        }
        if let Some(image_url) = &self.image_url {
            set.insert("imageUrl", image_url.as_str());
        }
        if let Some(affiliate_url) = &self.affiliate_url {
            set.insert("affiliateUrl", affiliate_url.as_str());
        }
        if let Some(features) = &self.features {
            set.insert("features", features.clone());
        }
        set.insert("updatedAt", DateTime::now());
        set
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordClick {
    #[serde(rename = "gameId")]
    pub game_id: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TopGame {
    pub name: String,
    pub clicks: i64,
}

#[derive(Debug, Serialize)]
pub struct Stats {
    #[serde(rename = "totalGames")]
    pub total_games: u64,
    #[serde(rename = "totalClicks")]
    pub total_clicks: u64,
    #[serde(rename = "topGames")]
    pub top_games: Vec<TopGame>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateGame {
        CreateGame {
            name: "RummyCircle".to_string(),
            description: "India's largest rummy platform".to_string(),
            bonus: "₹2000 Welcome Bonus".to_string(),
            rating: 4.8,
            image_url: "https://example.com/rummycircle.jpg".to_string(),
            affiliate_url: "https://example.com/rummycircle".to_string(),
            features: vec!["Instant withdrawals".to_string()],
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut p = payload();
        p.name = "  ".to_string();
        assert!(matches!(p.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn empty_feature_list_is_rejected() {
        let mut p = payload();
        p.features.clear();
        assert!(matches!(p.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn blank_feature_entry_is_rejected() {
        let mut p = payload();
        p.features.push(String::new());
        assert!(matches!(p.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn into_game_stamps_matching_timestamps() {
        let game = payload().into_game();
        assert!(game.id.is_none());
        assert_eq!(game.created_at, game.updated_at);
        assert_eq!(game.name, "RummyCircle");
    }

    #[test]
    fn partial_update_sets_only_given_fields() {
        let update = UpdateGame {
            bonus: Some("₹3000 Bonus".to_string()),
            rating: Some(4.9),
            ..Default::default()
        };
        let set = update.set_doc();
        assert_eq!(set.get_str("bonus").unwrap(), "₹3000 Bonus");
        assert_eq!(set.get_f64("rating").unwrap(), 4.9);
        assert!(set.get("updatedAt").is_some());
        assert!(set.get("name").is_none());
        assert!(set.get("createdAt").is_none());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn missing_payload_fields_fail_deserialization() {
        let body = r#"{"name": "RummyCircle", "rating": 4.8}"#;
        assert!(serde_json::from_str::<CreateGame>(body).is_err());
    }

    #[test]
    fn update_payload_accepts_any_subset() {
        let body = r#"{"imageUrl": "https://example.com/new.jpg"}"#;
        let update: UpdateGame = serde_json::from_str(body).unwrap();
        assert_eq!(update.image_url.as_deref(), Some("https://example.com/new.jpg"));
        assert!(update.name.is_none());
    }
}
