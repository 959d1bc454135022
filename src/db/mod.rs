use std::sync::Arc;

use mongodb::bson::doc;
use mongodb::{options::ClientOptions, Client, Database};
use tracing::info;

use crate::config::Config;

pub type DB = Arc<Database>;

pub const GAMES: &str = "games";
pub const CLICKS: &str = "clicks";

/// Connects at process start so misconfiguration fails fast; the driver's
/// built-in pool is then reused across overlapping requests.
pub async fn init_db(config: &Config) -> Result<DB, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(&config.mongo_uri).await?;
    client_options.app_name = Some("earnwale-api".to_string());

    let client = Client::with_options(client_options)?;
    let db = client.database(&config.db_name);

    // The client connects lazily; ping to verify reachability now.
    db.run_command(doc! { "ping": 1 }, None).await?;
    info!("connected to MongoDB database {}", config.db_name);

    Ok(Arc::new(db))
}
