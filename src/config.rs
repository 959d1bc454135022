use std::env;

/// Process configuration, read once at startup and carried in `AppState`.
/// Handlers never reach into the environment themselves.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongo_uri: String,
    pub db_name: String,
    pub admin_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let mongo_uri =
            env::var("MONGO_URI").map_err(|_| "MONGO_URI is not set".to_string())?;
        let admin_token =
            env::var("ADMIN_TOKEN").map_err(|_| "ADMIN_TOKEN is not set".to_string())?;
        let db_name = env::var("MONGO_DB").unwrap_or_else(|_| "earnwale".to_string());
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| "SERVER_PORT must be a port number".to_string())?;

        Ok(Self {
            port,
            mongo_uri,
            db_name,
            admin_token,
        })
    }
}
