//! Storage ports for the track catalog.
//!
//! Handlers never touch SQL directly: they ask a [`RepositoryConnector`] for a
//! [`TrackRepository`] scoped to one request and close it before responding.

use sea_orm::{
    ActiveValue::Set, ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryOrder,
    QuerySelect, TransactionTrait,
};

use crate::db::entities::{track, TrackSummary};
use crate::error::Result;

/// Metadata for a row about to be inserted. `id` and `created_at` are left
/// to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrack {
    pub title: String,
    pub duration: String,
    pub file_url: String,
    pub file_name: String,
    pub file_size: i32,
}

#[async_trait::async_trait]
pub trait TrackRepository: Send + Sync {
    /// All tracks, most recently created first.
    async fn list_tracks(&self) -> Result<Vec<TrackSummary>>;

    /// Insert and commit, returning the generated id.
    async fn insert_track(&self, track: NewTrack) -> Result<i32>;

    /// Release the underlying connection.
    async fn close(self: Box<Self>);
}

#[async_trait::async_trait]
pub trait RepositoryConnector: Send + Sync {
    async fn connect(&self, database_url: &str) -> Result<Box<dyn TrackRepository>>;
}

pub struct SeaOrmTrackRepository {
    db: DatabaseConnection,
}

impl SeaOrmTrackRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl TrackRepository for SeaOrmTrackRepository {
    async fn list_tracks(&self) -> Result<Vec<TrackSummary>> {
        Ok(track::Entity::find()
            .select_only()
            .columns([
                track::Column::Id,
                track::Column::Title,
                track::Column::Artist,
                track::Column::Duration,
                track::Column::FileUrl,
                track::Column::CreatedAt,
            ])
            .order_by_desc(track::Column::CreatedAt)
            .into_model::<TrackSummary>()
            .all(&self.db)
            .await?)
    }

    async fn insert_track(&self, track: NewTrack) -> Result<i32> {
        let row = track::ActiveModel {
            title: Set(track.title),
            duration: Set(track.duration),
            file_url: Set(track.file_url),
            file_name: Set(track.file_name),
            file_size: Set(track.file_size),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let inserted = track::Entity::insert(row).exec(&txn).await?;
        txn.commit().await?;

        Ok(inserted.last_insert_id)
    }

    async fn close(self: Box<Self>) {
        if let Err(e) = self.db.close().await {
            tracing::warn!("Failed to close database connection: {}", e);
        }
    }
}

/// Opens a dedicated single-connection handle per request.
#[derive(Debug, Default, Clone)]
pub struct SeaOrmConnector;

#[async_trait::async_trait]
impl RepositoryConnector for SeaOrmConnector {
    async fn connect(&self, database_url: &str) -> Result<Box<dyn TrackRepository>> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        tracing::debug!("Opened database connection");

        Ok(Box::new(SeaOrmTrackRepository::new(db)))
    }
}
