use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{postgres::PgPoolOptions, Error, Executor, PgPool};
use thiserror::Error;

use crate::store::MedicineTable;

pub mod models;

use models::{Medicine, NewMedicine};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to parse database URL: {0}")]
    UrlParse(String),
    #[error("Database error: {0}")]
    Sqlx(#[from] Error),
    #[error("Failed to create database: {0}")]
    CreateDb(String),
}

/// Server part and database name of a Postgres URL.
#[derive(Debug, PartialEq, Eq)]
struct DatabaseTarget {
    server_url: String,
    name: String,
}

impl DatabaseTarget {
    fn parse(database_url: &str) -> Result<Self, DatabaseError> {
        let (server_url, tail) = database_url
            .rsplit_once('/')
            .filter(|(server, _)| server.contains("://"))
            .ok_or_else(|| DatabaseError::UrlParse("Invalid database URL format".to_string()))?;

        let name = tail
            .split('?')
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DatabaseError::UrlParse("Failed to extract database name".to_string()))?;

        Ok(Self {
            server_url: server_url.to_string(),
            name: name.to_string(),
        })
    }
}

/// Opens the pool the medicines table is served from.
///
/// The database named in `database_url` is created first when the server
/// does not have it yet. The `medicines` table itself must already exist.
pub async fn init_db(database_url: &str) -> Result<PgPool, DatabaseError> {
    let target = DatabaseTarget::parse(database_url)?;

    let server = PgPoolOptions::new()
        .max_connections(1)
        .connect(&target.server_url)
        .await?;
    let created = create_database_if_missing(&server, &target.name).await;
    server.close().await;

    if created? {
        log::info!("Created database {}", target.name);
    }

    let pool = PgPoolOptions::new().connect(database_url).await?;
    log::info!("Connected to database {}", target.name);
    Ok(pool)
}

/// Returns whether the database had to be created.
async fn create_database_if_missing(server: &PgPool, name: &str) -> Result<bool, DatabaseError> {
    let existing: Option<i32> = sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(name)
        .fetch_optional(server)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    server
        .execute(format!("CREATE DATABASE \"{}\"", name.replace('"', "\"\"")).as_str())
        .await
        .map_err(|e| DatabaseError::CreateDb(e.to_string()))?;
    Ok(true)
}

#[derive(sqlx::FromRow, Debug)]
struct MedicineRow {
    id: String,
    name: String,
    location: String,
    is_in_stock: bool,
    created_at: DateTime<Utc>,
}

impl From<MedicineRow> for Medicine {
    fn from(row: MedicineRow) -> Self {
        Medicine {
            id: row.id,
            name: row.name,
            location: row.location,
            is_in_stock: row.is_in_stock,
            created_at: row.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        }
    }
}

/// [`MedicineTable`] that talks to the `medicines` table over a Postgres pool.
#[derive(Clone)]
pub struct PgMedicineTable {
    pool: PgPool,
}

impl PgMedicineTable {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MedicineTable for PgMedicineTable {
    type Error = DatabaseError;

    async fn list_medicines_ordered_by_name(&self) -> Result<Vec<Medicine>, Self::Error> {
        let rows = sqlx::query_as::<_, MedicineRow>(
            "SELECT id::text AS id, name, location, is_in_stock, created_at \
             FROM medicines ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Medicine::from).collect())
    }

    async fn insert_medicine(&self, draft: &NewMedicine) -> Result<Medicine, Self::Error> {
        let row = sqlx::query_as::<_, MedicineRow>(
            "INSERT INTO medicines (name, location, is_in_stock) VALUES ($1, $2, $3) \
             RETURNING id::text AS id, name, location, is_in_stock, created_at",
        )
        .bind(&draft.name)
        .bind(&draft.location)
        .bind(draft.is_in_stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
