//! Clears the clicks and games collections and inserts the sample listings.

use dotenv::dotenv;
use mongodb::bson::doc;
use tracing::info;

use earnwale_api::config::Config;
use earnwale_api::db::{self, CLICKS, GAMES};
use earnwale_api::models::{Click, CreateGame, Game};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        eprintln!("seeding failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let db = db::init_db(&config).await?;

    // Clicks first, so a crash between the two deletes never leaves clicks
    // pointing at games that are about to be reinserted with new ids.
    db.collection::<Click>(CLICKS)
        .delete_many(doc! {}, None)
        .await?;
    db.collection::<Game>(GAMES)
        .delete_many(doc! {}, None)
        .await?;

    let games: Vec<Game> = sample_games()
        .into_iter()
        .map(CreateGame::into_game)
        .collect();
    db.collection::<Game>(GAMES).insert_many(&games, None).await?;

    info!("seeded {} games", games.len());
    Ok(())
}

fn listing(
    name: &str,
    description: &str,
    bonus: &str,
    rating: f64,
    image_url: &str,
    affiliate_url: &str,
    features: &[&str],
) -> CreateGame {
    CreateGame {
        name: name.to_string(),
        description: description.to_string(),
        bonus: bonus.to_string(),
        rating,
        image_url: image_url.to_string(),
        affiliate_url: affiliate_url.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

fn sample_games() -> Vec<CreateGame> {
    vec![
        listing(
            "RummyCircle",
            "India's largest rummy platform with millions of players",
            "₹2000 Welcome Bonus",
            4.8,
            "https://images.unsplash.com/photo-1511193311914-0346f16efe90?w=800&h=600&fit=crop",
            "https://example.com/rummycircle",
            &[
                "Instant withdrawals",
                "24/7 customer support",
                "Secure & certified platform",
                "Multiple game variants",
            ],
        ),
        listing(
            "Junglee Rummy",
            "Premium rummy experience with exciting tournaments",
            "₹5250 Bonus",
            4.7,
            "https://images.unsplash.com/photo-1518895949257-7621c3c786d7?w=800&h=600&fit=crop",
            "https://example.com/jungleerummy",
            &[
                "Daily tournaments",
                "Fast cash withdrawals",
                "Practice games available",
                "Mobile app support",
            ],
        ),
        listing(
            "Ace2Three",
            "Play rummy online with real cash prizes",
            "₹1500 Sign Up Bonus",
            4.6,
            "https://images.unsplash.com/photo-1596838132731-3301c3fd4317?w=800&h=600&fit=crop",
            "https://example.com/ace2three",
            &[
                "RNG certified",
                "Quick registration",
                "Multiple payment options",
                "Loyalty rewards program",
            ],
        ),
        listing(
            "KhelPlay Rummy",
            "Trusted platform for online rummy enthusiasts",
            "₹2500 Welcome Offer",
            4.5,
            "https://images.unsplash.com/photo-1571902943202-507ec2618e8f?w=800&h=600&fit=crop",
            "https://example.com/khelplay",
            &[
                "Safe & secure",
                "Live chat support",
                "Weekly promotions",
                "Refer & earn program",
            ],
        ),
        listing(
            "Classic Rummy",
            "Experience classic rummy with modern features",
            "₹3000 Bonus",
            4.7,
            "https://images.unsplash.com/photo-1541278107931-e006523892df?w=800&h=600&fit=crop",
            "https://example.com/classicrummy",
            &[
                "User-friendly interface",
                "Instant deposits",
                "Tournament leaderboards",
                "VIP club benefits",
            ],
        ),
        listing(
            "RummyBaazi",
            "Play rummy and win real cash daily",
            "₹4000 Welcome Bonus",
            4.6,
            "https://images.unsplash.com/photo-1516975080664-ed2fc6a32937?w=800&h=600&fit=crop",
            "https://example.com/rummybaazi",
            &[
                "Daily cashback offers",
                "Secure transactions",
                "Multi-table gaming",
                "Practice mode available",
            ],
        ),
    ]
}
