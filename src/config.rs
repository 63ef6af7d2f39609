use envconfig::Envconfig;
use thiserror::Error;

#[derive(Envconfig, Debug)]
pub struct Config {
    #[envconfig(from = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    #[envconfig(from = "SUPABASE_ANON_KEY")]
    pub supabase_anon_key: Option<String>,

    #[envconfig(from = "DATABASE_URL")]
    pub database_url: Option<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Env(#[from] envconfig::Error),
    #[error("SUPABASE_ANON_KEY must be set together with SUPABASE_URL")]
    MissingAnonKey,
    #[error("Set SUPABASE_URL and SUPABASE_ANON_KEY, or DATABASE_URL")]
    NoBackend,
}

/// Where the medicines table is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Rest { url: String, anon_key: String },
    Postgres { database_url: String },
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Ok(Config::init_from_env()?)
    }

    /// The REST API wins when both backends are configured.
    pub fn backend(&self) -> Result<Backend, ConfigError> {
        match (&self.supabase_url, &self.database_url) {
            (Some(url), _) => {
                let anon_key = self
                    .supabase_anon_key
                    .clone()
                    .ok_or(ConfigError::MissingAnonKey)?;
                Ok(Backend::Rest {
                    url: url.clone(),
                    anon_key,
                })
            }
            (None, Some(database_url)) => Ok(Backend::Postgres {
                database_url: database_url.clone(),
            }),
            (None, None) => Err(ConfigError::NoBackend),
        }
    }
}
