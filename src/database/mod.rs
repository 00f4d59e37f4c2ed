use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document, Regex};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::models::{
    Country, DeleteAck, InsertAck, Place, PlaceFields, TextOrNumber, UpdateAck, User,
};
use crate::utils::AppError;

#[cfg(test)]
pub mod memory;

pub const PLACES_COLLECTION: &str = "touristsPlace";
pub const USERS_COLLECTION: &str = "userData";
pub const COUNTRIES_COLLECTION: &str = "countryData";

/// Quantidade de lugares exibidos na home
pub const RECENT_PLACES_LIMIT: i64 = 6;

/// Operações de armazenamento usadas pelas rotas.
/// Cada método é uma única query/mutação, sem transação entre chamadas.
#[async_trait]
pub trait TourStore: Send + Sync {
    async fn list_places(&self) -> Result<Vec<Place>, AppError>;
    /// Mais recentes primeiro (ordem decrescente de `_id`)
    async fn recent_places(&self, limit: i64) -> Result<Vec<Place>, AppError>;
    async fn find_place(&self, id: ObjectId) -> Result<Option<Place>, AppError>;
    async fn places_by_email(&self, email: &str) -> Result<Vec<Place>, AppError>;
    /// Igualdade exata ignorando maiúsculas/minúsculas
    async fn places_by_country(&self, country: &str) -> Result<Vec<Place>, AppError>;
    async fn insert_place(&self, place: Place) -> Result<InsertAck, AppError>;
    /// Sobrescreve o conjunto fixo de campos; cria o registro com `id` se não existir
    async fn upsert_place(&self, id: ObjectId, fields: PlaceFields) -> Result<UpdateAck, AppError>;
    async fn delete_place(&self, id: ObjectId) -> Result<DeleteAck, AppError>;

    async fn find_user(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn insert_user(&self, user: User) -> Result<InsertAck, AppError>;
    /// Atualiza só `lastLoggedAt`; sem match não é erro
    async fn touch_user(
        &self,
        email: &str,
        last_logged_at: Option<TextOrNumber>,
    ) -> Result<UpdateAck, AppError>;

    async fn insert_country(&self, country: Country) -> Result<InsertAck, AppError>;
    async fn list_countries(&self) -> Result<Vec<Country>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Cria os índices das buscas por email e país
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes = [
            (PLACES_COLLECTION, "userEmail"),
            (PLACES_COLLECTION, "countryName"),
            (USERS_COLLECTION, "email"),
        ];

        for (collection, field) in indexes {
            let mut keys = Document::new();
            keys.insert(field, 1);
            let model = IndexModel::builder().keys(keys).build();

            match self.collection::<Document>(collection).create_index(model).await {
                Ok(_) => log::info!("   ✅ Index created: {}({})", collection, field),
                Err(e) => log::debug!("   ℹ️  Index not created for {}({}): {}", collection, field, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    fn places(&self) -> Collection<Place> {
        self.collection(PLACES_COLLECTION)
    }

    fn users(&self) -> Collection<User> {
        self.collection(USERS_COLLECTION)
    }

    fn countries(&self) -> Collection<Country> {
        self.collection(COUNTRIES_COLLECTION)
    }
}

/// Regex ancorada e case-insensitive; o texto do usuário é escapado
fn exact_case_insensitive(value: &str) -> Regex {
    Regex {
        pattern: format!("^{}$", regex::escape(value)),
        options: "i".to_string(),
    }
}

#[async_trait]
impl TourStore for MongoDB {
    async fn list_places(&self) -> Result<Vec<Place>, AppError> {
        let cursor = self.places().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn recent_places(&self, limit: i64) -> Result<Vec<Place>, AppError> {
        let cursor = self
            .places()
            .find(doc! {})
            .sort(doc! { "_id": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_place(&self, id: ObjectId) -> Result<Option<Place>, AppError> {
        Ok(self.places().find_one(doc! { "_id": id }).await?)
    }

    async fn places_by_email(&self, email: &str) -> Result<Vec<Place>, AppError> {
        let cursor = self.places().find(doc! { "userEmail": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn places_by_country(&self, country: &str) -> Result<Vec<Place>, AppError> {
        let filter = doc! { "countryName": exact_case_insensitive(country) };
        let cursor = self.places().find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_place(&self, place: Place) -> Result<InsertAck, AppError> {
        Ok(self.places().insert_one(place).await?.into())
    }

    async fn upsert_place(&self, id: ObjectId, fields: PlaceFields) -> Result<UpdateAck, AppError> {
        let result = self
            .places()
            .update_one(doc! { "_id": id }, doc! { "$set": fields.to_set_document() })
            .upsert(true)
            .await?;
        Ok(result.into())
    }

    async fn delete_place(&self, id: ObjectId) -> Result<DeleteAck, AppError> {
        Ok(self.places().delete_one(doc! { "_id": id }).await?.into())
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn insert_user(&self, user: User) -> Result<InsertAck, AppError> {
        Ok(self.users().insert_one(user).await?.into())
    }

    async fn touch_user(
        &self,
        email: &str,
        last_logged_at: Option<TextOrNumber>,
    ) -> Result<UpdateAck, AppError> {
        let result = self
            .users()
            .update_one(
                doc! { "email": email },
                doc! { "$set": { "lastLoggedAt": last_logged_at } },
            )
            .await?;
        Ok(result.into())
    }

    async fn insert_country(&self, country: Country) -> Result<InsertAck, AppError> {
        Ok(self.countries().insert_one(country).await?.into())
    }

    async fn list_countries(&self) -> Result<Vec<Country>, AppError> {
        let cursor = self.countries().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
