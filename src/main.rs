use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;

use earnwale_api::{app, config::Config, db, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = match db::init_db(&config).await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("database error: {}", e);
            std::process::exit(1);
        }
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState {
        db,
        config: Arc::new(config),
    };

    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app(state)).await.unwrap();
}
