use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use futures::stream::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};

use crate::db::{CLICKS, GAMES};
use crate::error::AppError;
use crate::models::{
    Click, CreateGame, Game, Message, RecordClick, Stats, TopGame, UpdateGame,
};
use crate::AppState;

const TOP_GAMES_LIMIT: usize = 10;

// GET /hello
pub async fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello from EarnWale!".to_string(),
    })
}

// GET /games
pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<Game>>, AppError> {
    let collection = state.db.collection::<Game>(GAMES);

    let options = FindOptions::builder().sort(doc! { "rating": -1 }).build();
    let mut cursor = collection.find(doc! {}, options).await?;

    let mut games = Vec::new();
    while let Some(game) = cursor.try_next().await? {
        games.push(game);
    }

    Ok(Json(games))
}

// GET /games/:id
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Game>, AppError> {
    let oid = parse_game_id(&id)?;
    let collection = state.db.collection::<Game>(GAMES);

    let game = collection
        .find_one(doc! { "_id": oid }, None)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(game))
}

// POST /clicks
pub async fn record_click(
    State(state): State<AppState>,
    Json(payload): Json<RecordClick>,
) -> Result<Json<Click>, AppError> {
    let collection = state.db.collection::<Click>(CLICKS);

    let mut click = Click {
        id: None,
        game_id: payload.game_id,
        created_at: DateTime::now(),
    };
    let result = collection.insert_one(&click, None).await?;
    click.id = result.inserted_id.as_object_id();

    Ok(Json(click))
}

// GET /stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>, AppError> {
    let games_coll = state.db.collection::<Game>(GAMES);
    let clicks_coll = state.db.collection::<Click>(CLICKS);

    let total_games = games_coll.count_documents(doc! {}, None).await?;
    let total_clicks = clicks_coll.count_documents(doc! {}, None).await?;

    // Click counts per gameId; orphaned references still count towards the
    // total but cannot appear in the ranking.
    let pipeline = vec![doc! { "$group": { "_id": "$gameId", "count": { "$sum": 1 } } }];
    let mut cursor = clicks_coll.aggregate(pipeline, None).await?;

    let mut counts: HashMap<String, i64> = HashMap::new();
    while let Some(group) = cursor.try_next().await? {
        if let (Ok(game_id), Some(count)) = (group.get_str("_id"), group_count(&group)) {
            counts.insert(game_id.to_string(), count);
        }
    }

    let mut games_cursor = games_coll.find(doc! {}, None).await?;
    let mut games = Vec::new();
    while let Some(game) = games_cursor.try_next().await? {
        games.push(game);
    }

    Ok(Json(Stats {
        total_games,
        total_clicks,
        top_games: rank_by_clicks(&games, &counts),
    }))
}

// POST /admin/games
pub async fn create_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateGame>,
) -> Result<(StatusCode, Json<Game>), AppError> {
    check_admin(&headers, &state.config.admin_token)?;
    payload.validate()?;

    let collection = state.db.collection::<Game>(GAMES);

    let mut game = payload.into_game();
    let result = collection.insert_one(&game, None).await?;
    game.id = result.inserted_id.as_object_id();

    Ok((StatusCode::CREATED, Json(game)))
}

// PUT /admin/games/:id
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateGame>,
) -> Result<Json<Game>, AppError> {
    check_admin(&headers, &state.config.admin_token)?;
    let oid = parse_game_id(&id)?;

    let collection = state.db.collection::<Game>(GAMES);

    let update = doc! { "$set": payload.set_doc() };
    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let game = collection
        .find_one_and_update(doc! { "_id": oid }, update, options)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(game))
}

// DELETE /admin/games/:id
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Message>, AppError> {
    check_admin(&headers, &state.config.admin_token)?;
    let oid = parse_game_id(&id)?;

    let collection = state.db.collection::<Game>(GAMES);

    // Associated clicks are kept on purpose: they still count in the totals.
    collection
        .find_one_and_delete(doc! { "_id": oid }, None)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(Message {
        message: "Game deleted successfully".to_string(),
    }))
}

/// Byte-for-byte comparison of the bearer token against the shared admin
/// secret. Runs before any store access on privileged routes.
fn check_admin(headers: &HeaderMap, admin_token: &str) -> Result<(), AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    if token.as_bytes() != admin_token.as_bytes() {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// A malformed id cannot match any record, so it reads as Not-Found rather
/// than a client error.
fn parse_game_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::NotFound)
}

fn group_count(group: &Document) -> Option<i64> {
    // $sum: 1 yields an Int32 until it overflows, then an Int64.
    group
        .get_i64("count")
        .or_else(|_| group.get_i32("count").map(i64::from))
        .ok()
}

/// Games with at least one click, most clicked first, capped at
/// `TOP_GAMES_LIMIT`. Equal counts are ordered by name.
fn rank_by_clicks(games: &[Game], counts: &HashMap<String, i64>) -> Vec<TopGame> {
    let mut ranked: Vec<TopGame> = games
        .iter()
        .filter_map(|game| {
            let id = game.id.as_ref()?.to_hex();
            let clicks = counts.get(&id).copied().unwrap_or(0);
            (clicks > 0).then(|| TopGame {
                name: game.name.clone(),
                clicks,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.clicks.cmp(&a.clicks).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(TOP_GAMES_LIMIT);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "super-secret";

    fn game(name: &str, rating: f64) -> Game {
        let now = DateTime::now();
        Game {
            id: Some(ObjectId::new()),
            name: name.to_string(),
            description: format!("{name} description"),
            bonus: "₹2000 Welcome Bonus".to_string(),
            rating,
            image_url: "https://example.com/image.jpg".to_string(),
            affiliate_url: "https://example.com/go".to_string(),
            features: vec!["Instant withdrawals".to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_authorization_header_is_unauthorized() {
        let result = check_admin(&HeaderMap::new(), SECRET);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn wrong_token_is_unauthorized() {
        let headers = headers_with("Bearer not-the-secret");
        assert!(matches!(
            check_admin(&headers, SECRET),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn token_without_bearer_prefix_is_unauthorized() {
        let headers = headers_with(SECRET);
        assert!(matches!(
            check_admin(&headers, SECRET),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn correct_token_passes() {
        let headers = headers_with(&format!("Bearer {SECRET}"));
        assert!(check_admin(&headers, SECRET).is_ok());
    }

    #[test]
    fn malformed_id_reads_as_not_found() {
        assert!(matches!(parse_game_id("not-an-oid"), Err(AppError::NotFound)));
        assert!(parse_game_id(&ObjectId::new().to_hex()).is_ok());
    }

    #[test]
    fn ranking_on_empty_store_is_empty() {
        assert!(rank_by_clicks(&[], &HashMap::new()).is_empty());
    }

    #[test]
    fn games_without_clicks_are_not_ranked() {
        let games = vec![game("RummyCircle", 4.8)];
        assert!(rank_by_clicks(&games, &HashMap::new()).is_empty());
    }

    #[test]
    fn ranking_orders_by_clicks_descending() {
        let a = game("A", 4.0);
        let b = game("B", 4.9);
        let mut counts = HashMap::new();
        counts.insert(a.id.unwrap().to_hex(), 2);
        counts.insert(b.id.unwrap().to_hex(), 1);

        let ranked = rank_by_clicks(&[a, b], &counts);
        assert_eq!(ranked[0], TopGame { name: "A".to_string(), clicks: 2 });
        assert_eq!(ranked[1], TopGame { name: "B".to_string(), clicks: 1 });
    }

    #[test]
    fn equal_click_counts_tie_break_by_name() {
        let x = game("Zeta Rummy", 4.5);
        let y = game("Ace2Three", 4.5);
        let mut counts = HashMap::new();
        counts.insert(x.id.unwrap().to_hex(), 3);
        counts.insert(y.id.unwrap().to_hex(), 3);

        let ranked = rank_by_clicks(&[x, y], &counts);
        assert_eq!(ranked[0].name, "Ace2Three");
        assert_eq!(ranked[1].name, "Zeta Rummy");
    }

    #[test]
    fn ranking_is_capped() {
        let games: Vec<Game> = (0..15).map(|i| game(&format!("Game {i:02}"), 4.0)).collect();
        let counts: HashMap<String, i64> = games
            .iter()
            .map(|g| (g.id.unwrap().to_hex(), 1))
            .collect();

        assert_eq!(rank_by_clicks(&games, &counts).len(), TOP_GAMES_LIMIT);
    }

    #[test]
    fn orphaned_click_counts_are_ignored_in_ranking() {
        let a = game("A", 4.0);
        let mut counts = HashMap::new();
        counts.insert(a.id.unwrap().to_hex(), 1);
        counts.insert("deleted-game".to_string(), 50);

        let ranked = rank_by_clicks(&[a], &counts);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "A");
    }
}
