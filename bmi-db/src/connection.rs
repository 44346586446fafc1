use std::{env, sync::Arc};

use dotenv::dotenv;
use log::{debug, info};
use sqlx::{Connection as SqlxConnection, Executor, SqliteConnection};
use tokio::sync::{Mutex, MutexGuard};

const DEFAULT_DATABASE_URL: &str = "sqlite://bmi_data.db?mode=rwc";

const SETUP_QUERY: &str = "PRAGMA cache_size = -1000;
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;";

#[derive(Clone)]
pub struct Connection {
    inner: Arc<Mutex<SqliteConnection>>,
}

impl Connection {
    /// Connects to `DATABASE_URL` (read from the environment or `.env`),
    /// falling back to `bmi_data.db` in the working directory.
    pub async fn establish() -> Result<Self, sqlx::Error> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            debug!("DATABASE_URL not set, using {}", DEFAULT_DATABASE_URL);
            DEFAULT_DATABASE_URL.to_owned()
        });
        Self::connect(&database_url).await
    }

    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        info!("Opening database {}", database_url);
        let mut connection = SqliteConnection::connect(database_url).await?;

        connection.execute(SETUP_QUERY).await?;

        Ok(Self {
            inner: Arc::new(Mutex::new(connection)),
        })
    }

    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.inner.lock().await
    }
}
