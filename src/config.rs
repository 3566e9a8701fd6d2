use anyhow::Context;

const DEFAULT_PORT: u16 = 5050;

/// Process configuration. `DATABASE_URL` is required; `PORT` defaults to
/// 5050. No other options are recognized.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got `{}`", raw))?,
            Err(_) => DEFAULT_PORT,
        };
        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must point at the Postgres instance")?;
        Ok(Self { port, database_url })
    }
}
