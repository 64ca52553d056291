pub mod memory;
pub mod user_store;

pub use memory::InMemoryUserStore;
pub use user_store::UserStore;

use crate::{
    models::{FavoritesList, User, USERS_COLLECTION},
    utils::AppError,
};
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_DATABASE: &str = "movie_app";
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Connects, verifies the connection and creates the indexes.
    /// `database` overrides the name taken from the URI path.
    pub async fn new(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        let db_name = database
            .or_else(|| database_name_from_uri(uri))
            .unwrap_or(DEFAULT_DATABASE);

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("Connected to MongoDB database: {}", db_name);

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Unique email index. Failure is logged rather than fatal so the service
    /// still starts against a collection that already holds duplicates.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.users().create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index ready: users(email) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create users(email) index: {}", e),
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    fn users(&self) -> Collection<User> {
        self.collection(USERS_COLLECTION)
    }
}

/// Database name from the path segment of a connection string, if any
fn database_name_from_uri(uri: &str) -> Option<&str> {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest)?;
    let (_, path) = without_scheme.split_once('/')?;
    let name = path.split('?').next().unwrap_or_default();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

fn favorite_to_bson(item: &Value) -> Result<Bson, AppError> {
    mongodb::bson::to_bson(item)
        .map_err(|e| AppError::InvalidRequest(format!("Unsupported favorite payload: {}", e)))
}

/// Update pipeline that drops the first element of `field` equal to `item`.
/// `$pull` would drop every match.
fn remove_first_pipeline(field: &str, item: Bson) -> Vec<Document> {
    let path = format!("${}", field);
    let path = path.as_str();

    let remaining = doc! {
        "$let": {
            "vars": {
                "idx": { "$indexOfArray": [path, { "$literal": item }] }
            },
            "in": {
                "$cond": [
                    { "$lt": ["$$idx", 0] },
                    path,
                    {
                        "$concatArrays": [
                            { "$slice": [path, "$$idx"] },
                            {
                                "$slice": [
                                    path,
                                    { "$add": ["$$idx", 1] },
                                    { "$max": [1, { "$size": path }] }
                                ]
                            }
                        ]
                    }
                ]
            }
        }
    };

    let mut set = Document::new();
    set.insert(field, remaining);
    vec![doc! { "$set": set }]
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        Ok(self.users().find_one(doc! { "_id": oid }).await?)
    }

    async fn insert_user(&self, mut user: User) -> Result<User, AppError> {
        match self.users().insert_one(&user).await {
            Ok(result) => {
                user.id = result.inserted_id.as_object_id();
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => Err(AppError::Conflict(format!(
                "User with email {} already exists",
                user.email
            ))),
            Err(e) => Err(e.into()),
        }
    }

    async fn push_favorite(
        &self,
        user_id: &str,
        list: FavoritesList,
        item: Value,
    ) -> Result<Option<User>, AppError> {
        let Ok(oid) = ObjectId::parse_str(user_id) else {
            return Ok(None);
        };

        let mut push = Document::new();
        push.insert(list.field(), favorite_to_bson(&item)?);

        let user = self
            .users()
            .find_one_and_update(doc! { "_id": oid }, doc! { "$push": push })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(user)
    }

    async fn pull_favorite(
        &self,
        user_id: &str,
        list: FavoritesList,
        item: Value,
    ) -> Result<Option<User>, AppError> {
        let Ok(oid) = ObjectId::parse_str(user_id) else {
            return Ok(None);
        };

        let pipeline = remove_first_pipeline(list.field(), favorite_to_bson(&item)?);

        let user = self
            .users()
            .find_one_and_update(doc! { "_id": oid }, pipeline)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(user)
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        self.db.list_collection_names().await?;
        Ok(true)
    }
}
