use anyhow::{anyhow, Result};
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_address: String,
    pub stripe_secret_key: Option<String>,
    pub stripe_api_base: String,
    pub payment_currency: String,
    /// When set, payment intents are only created for exactly this price.
    pub payment_fixed_price: Option<f64>,
    pub admin_email: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let port: u16 = match env::var("PORT") {
            Ok(p) => p
                .trim()
                .parse()
                .map_err(|_| anyhow!("PORT must be a valid port number, got '{}'", p))?,
            Err(_) => 5000,
        };

        let db_max_connections: u32 = match env::var("DB_MAX_CONNECTIONS") {
            Ok(n) => n.trim().parse().map_err(|_| {
                anyhow!("DB_MAX_CONNECTIONS must be a positive integer, got '{}'", n)
            })?,
            Err(_) => 20,
        };
        if db_max_connections == 0 {
            return Err(anyhow!("DB_MAX_CONNECTIONS must be at least 1"));
        }

        let payment_fixed_price = match env::var("PAYMENT_FIXED_PRICE") {
            Ok(p) => Some(
                p.trim()
                    .parse::<f64>()
                    .map_err(|_| anyhow!("PAYMENT_FIXED_PRICE must be a number, got '{}'", p))?,
            ),
            Err(_) => None,
        };

        Ok(Config {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| database_url_from_parts()),
            db_max_connections,
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| format!("0.0.0.0:{}", port)),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            payment_currency: env::var("PAYMENT_CURRENCY")
                .map(|c| c.trim().to_lowercase())
                .unwrap_or_else(|_| "usd".to_string()),
            payment_fixed_price,
            admin_email: env::var("ADMIN_EMAIL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

/// Credentials and database name are percent-encoded; `DB_HOST` may carry a port.
fn database_url_from_parts() -> String {
    let user = env::var("DB_USER").unwrap_or_else(|_| "wedlock".to_string());
    let pass = env::var("DB_PASS").unwrap_or_else(|_| "wedlock".to_string());
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let name = env::var("DB_NAME").unwrap_or_else(|_| "wedding_matrimony".to_string());
    format!(
        "postgresql://{}:{}@{}/{}",
        urlencoding::encode(&user),
        urlencoding::encode(&pass),
        host,
        urlencoding::encode(&name)
    )
}
