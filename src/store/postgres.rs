use crate::{
    config::DbConfig,
    data::Document,
    error::{
        BeginTransactionSnafu, CommitTransactionSnafu, CreateDatabaseSnafu, MakeQuerySnafu,
        OpenDatabaseSnafu, RollbackTransactionSnafu, RosterError, RosterResult,
    },
    store::{Connector, InsertSummary, RecordStore, take_id, with_id},
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{
    PgConnection, Pool, Postgres,
    migrate::MigrateDatabase,
    postgres::PgPoolOptions,
    types::Json,
};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct PgConnector {
    config: Arc<DbConfig>,
    options: PgPoolOptions,
}

impl PgConnector {
    pub fn new(config: Arc<DbConfig>, options: PgPoolOptions) -> Self {
        Self { config, options }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Store = PgStore;

    async fn connect(&self) -> RosterResult<PgStore> {
        let url = self.config.get_db_path();

        if !Postgres::database_exists(&url)
            .await
            .context(OpenDatabaseSnafu)?
        {
            info!(
                database = self.config.database(),
                "Database does not exist, creating it"
            );
            Postgres::create_database(&url)
                .await
                .context(CreateDatabaseSnafu)?;
        }

        let pool = self
            .options
            .clone()
            .connect(&url)
            .await
            .context(OpenDatabaseSnafu)?;

        if let Err(source) = sqlx::migrate!().run(&pool).await {
            pool.close().await;
            return Err(RosterError::Migrate { source });
        }

        info!(database = self.config.database(), "Connected to database");
        Ok(PgStore { pool })
    }
}

/// Collections are rows of `public.collections`; their documents live in `public.documents`
/// as JSONB bodies with the id held alongside.
#[derive(Debug)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

fn classify_insert_error(source: sqlx::Error, collection: &str, id: String) -> RosterError {
    if let sqlx::Error::Database(db) = &source {
        if db.is_unique_violation() {
            return RosterError::DuplicateId {
                collection: collection.to_string(),
                id,
            };
        }
        if db.is_foreign_key_violation() {
            return RosterError::MissingCollection {
                name: collection.to_string(),
            };
        }
    }
    RosterError::MakeQuery { source }
}

async fn insert_one(
    conn: &mut PgConnection,
    collection: &str,
    mut record: Document,
) -> RosterResult<()> {
    let id = take_id(&mut record)?;

    sqlx::query("INSERT INTO public.documents (collection, id, body) VALUES ($1, $2, $3)")
        .bind(collection)
        .bind(&id)
        .bind(Json(&record))
        .execute(conn)
        .await
        .map_err(|source| classify_insert_error(source, collection, id))?;

    Ok(())
}

#[async_trait]
impl RecordStore for PgStore {
    async fn ensure_collection(&self, name: &str) -> RosterResult<bool> {
        let created = sqlx::query(
            "INSERT INTO public.collections (name) VALUES ($1) ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .execute(&self.pool)
        .await
        .context(MakeQuerySnafu)?
        .rows_affected()
            == 1;

        Ok(created)
    }

    async fn clear(&self, name: &str) -> RosterResult<u64> {
        Ok(
            sqlx::query("DELETE FROM public.documents WHERE collection = $1")
                .bind(name)
                .execute(&self.pool)
                .await
                .context(MakeQuerySnafu)?
                .rows_affected(),
        )
    }

    async fn bulk_insert(
        &self,
        name: &str,
        records: Vec<Document>,
    ) -> RosterResult<InsertSummary> {
        let attempted = records.len();
        let mut tx = self.pool.begin().await.context(BeginTransactionSnafu)?;

        for (index, record) in records.into_iter().enumerate() {
            if let Err(e) = insert_one(&mut *tx, name, record).await {
                tx.rollback().await.context(RollbackTransactionSnafu)?;
                return Err(RosterError::BulkInsert {
                    collection: name.to_string(),
                    attempted,
                    failed_at: index,
                    source: Box::new(e),
                });
            }
        }

        tx.commit().await.context(CommitTransactionSnafu)?;
        Ok(InsertSummary {
            inserted_count: attempted,
        })
    }

    async fn find_all(&self, name: &str) -> RosterResult<Vec<Document>> {
        let rows: Vec<(String, Json<Document>)> = sqlx::query_as(
            "SELECT id, body FROM public.documents WHERE collection = $1 ORDER BY seq",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .context(MakeQuerySnafu)?;

        Ok(rows
            .into_iter()
            .map(|(id, Json(body))| with_id(id, body))
            .collect())
    }

    async fn find_by_id(&self, name: &str, id: &str) -> RosterResult<Option<Document>> {
        let row: Option<(String, Json<Document>)> = sqlx::query_as(
            "SELECT id, body FROM public.documents WHERE collection = $1 AND id = $2",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context(MakeQuerySnafu)?;

        Ok(row.map(|(id, Json(body))| with_id(id, body)))
    }

    async fn delete_by_id(&self, name: &str, id: &str) -> RosterResult<u64> {
        Ok(
            sqlx::query("DELETE FROM public.documents WHERE collection = $1 AND id = $2")
                .bind(name)
                .bind(id)
                .execute(&self.pool)
                .await
                .context(MakeQuerySnafu)?
                .rows_affected(),
        )
    }

    async fn close(self) {
        self.pool.close().await;
    }
}
