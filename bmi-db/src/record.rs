use std::str::FromStr;

use async_trait::async_trait;
use bmi_model::{BmiRecord, Category, NewRecord};
use chrono::NaiveDateTime;
use log::{debug, info};

use crate::{connection::Connection, schema, Error, Result};

#[derive(sqlx::FromRow)]
struct RecordRow {
    id: i64,
    username: String,
    weight: f64,
    height: f64,
    bmi: f64,
    category: String,
    date: NaiveDateTime,
}

impl TryFrom<RecordRow> for BmiRecord {
    type Error = Error;

    fn try_from(row: RecordRow) -> Result<Self> {
        let category = Category::from_str(&row.category).map_err(|_| Error::CorruptRecord {
            id: row.id,
            reason: format!("unknown category \"{}\"", row.category),
        })?;

        Ok(BmiRecord {
            id: row.id,
            username: row.username,
            weight: row.weight,
            height: row.height,
            bmi: row.bmi,
            category,
            date: row.date,
        })
    }
}

#[mockall::automock]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Creates the records table if it does not exist yet.
    async fn initialize(&self) -> Result<()>;
    async fn append(&self, record: NewRecord) -> Result<BmiRecord>;
    /// All records of `username`, oldest first.
    async fn query_by_user(&self, username: &str) -> Result<Vec<BmiRecord>>;
}

#[derive(Clone)]
pub struct RecordRepositoryImpl {
    connection: Connection,
}

impl RecordRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl RecordRepository for RecordRepositoryImpl {
    async fn initialize(&self) -> Result<()> {
        info!("Ensuring table {} exists", schema::TABLE);
        let mut conn = self.connection.lock().await;
        sqlx::query(schema::CREATE_TABLE)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn append(&self, record: NewRecord) -> Result<BmiRecord> {
        debug!("Storing record for {}", record.username);
        let mut conn = self.connection.lock().await;
        let row: RecordRow = sqlx::query_as(schema::INSERT_RECORD)
            .bind(&record.username)
            .bind(record.weight)
            .bind(record.height)
            .bind(record.bmi)
            .bind(record.category.to_string())
            .fetch_one(&mut *conn)
            .await?;
        row.try_into()
    }

    async fn query_by_user(&self, username: &str) -> Result<Vec<BmiRecord>> {
        let mut conn = self.connection.lock().await;
        let rows: Vec<RecordRow> = sqlx::query_as(schema::SELECT_BY_USERNAME)
            .bind(username)
            .fetch_all(&mut *conn)
            .await?;
        debug!("Fetched {} records for {}", rows.len(), username);
        rows.into_iter().map(TryInto::try_into).collect()
    }
}
