//! Store em memória usado pelos testes das rotas.
//! Segue a semântica do MongoDB para as operações de `TourStore`.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::TourStore;
use crate::models::{
    Country, DeleteAck, InsertAck, Place, PlaceFields, TextOrNumber, UpdateAck, User,
};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    places: RwLock<Vec<Place>>,
    users: RwLock<Vec<User>>,
    countries: RwLock<Vec<Country>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn place_count(&self) -> usize {
        self.places.read().await.len()
    }
}

fn inserted(id: ObjectId) -> InsertAck {
    InsertAck {
        acknowledged: true,
        inserted_id: id.to_hex(),
    }
}

#[async_trait]
impl TourStore for MemoryStore {
    async fn list_places(&self) -> Result<Vec<Place>, AppError> {
        Ok(self.places.read().await.clone())
    }

    async fn recent_places(&self, limit: i64) -> Result<Vec<Place>, AppError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        // Vec em ordem de inserção: o fim é o mais recente
        Ok(self.places.read().await.iter().rev().take(limit).cloned().collect())
    }

    async fn find_place(&self, id: ObjectId) -> Result<Option<Place>, AppError> {
        Ok(self
            .places
            .read()
            .await
            .iter()
            .find(|p| p.id == Some(id))
            .cloned())
    }

    async fn places_by_email(&self, email: &str) -> Result<Vec<Place>, AppError> {
        Ok(self
            .places
            .read()
            .await
            .iter()
            .filter(|p| p.fields.user_email.as_deref() == Some(email))
            .cloned()
            .collect())
    }

    async fn places_by_country(&self, country: &str) -> Result<Vec<Place>, AppError> {
        let wanted = country.to_lowercase();
        Ok(self
            .places
            .read()
            .await
            .iter()
            .filter(|p| {
                p.fields
                    .country_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase() == wanted)
            })
            .cloned()
            .collect())
    }

    async fn insert_place(&self, mut place: Place) -> Result<InsertAck, AppError> {
        let id = ObjectId::new();
        place.id = Some(id);
        self.places.write().await.push(place);
        Ok(inserted(id))
    }

    async fn upsert_place(&self, id: ObjectId, fields: PlaceFields) -> Result<UpdateAck, AppError> {
        let mut places = self.places.write().await;

        if let Some(existing) = places.iter_mut().find(|p| p.id == Some(id)) {
            let modified = existing.fields != fields;
            existing.fields = fields;
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        places.push(Place {
            id: Some(id),
            fields,
            ..Default::default()
        });

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id.to_hex()),
        })
    }

    async fn delete_place(&self, id: ObjectId) -> Result<DeleteAck, AppError> {
        let mut places = self.places.write().await;
        let before = places.len();
        if let Some(pos) = places.iter().position(|p| p.id == Some(id)) {
            places.remove(pos);
        }
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: (before - places.len()) as u64,
        })
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn insert_user(&self, mut user: User) -> Result<InsertAck, AppError> {
        let id = ObjectId::new();
        user.id = Some(id);
        self.users.write().await.push(user);
        Ok(inserted(id))
    }

    async fn touch_user(
        &self,
        email: &str,
        last_logged_at: Option<TextOrNumber>,
    ) -> Result<UpdateAck, AppError> {
        let mut users = self.users.write().await;
        let mut ack = UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 0,
            upserted_id: None,
        };

        if let Some(user) = users.iter_mut().find(|u| u.email.as_deref() == Some(email)) {
            ack.matched_count = 1;
            if user.last_logged_at != last_logged_at {
                user.last_logged_at = last_logged_at;
                ack.modified_count = 1;
            }
        }

        Ok(ack)
    }

    async fn insert_country(&self, mut country: Country) -> Result<InsertAck, AppError> {
        let id = ObjectId::new();
        country.id = Some(id);
        self.countries.write().await.push(country);
        Ok(inserted(id))
    }

    async fn list_countries(&self) -> Result<Vec<Country>, AppError> {
        Ok(self.countries.read().await.clone())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_in(country: &str) -> Place {
        Place {
            fields: PlaceFields {
                country_name: Some(country.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[actix_rt::test]
    async fn recent_places_are_newest_first_and_limited() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for i in 0..8 {
            let ack = store.insert_place(place_in(&format!("C{}", i))).await.unwrap();
            ids.push(ack.inserted_id);
        }

        let recent = store.recent_places(6).await.unwrap();
        let got: Vec<String> = recent.iter().map(|p| p.id.unwrap().to_hex()).collect();
        let expected: Vec<String> = ids.iter().rev().take(6).cloned().collect();
        assert_eq!(got, expected);
    }

    #[actix_rt::test]
    async fn upsert_updates_then_inserts() {
        let store = MemoryStore::new();
        let ack = store.insert_place(place_in("Japan")).await.unwrap();
        let id = ObjectId::parse_str(&ack.inserted_id).unwrap();

        let fields = PlaceFields {
            spot_name: Some("Kyoto".into()),
            ..Default::default()
        };
        let updated = store.upsert_place(id, fields.clone()).await.unwrap();
        assert_eq!((updated.matched_count, updated.modified_count), (1, 1));

        let fresh = ObjectId::new();
        let upserted = store.upsert_place(fresh, fields).await.unwrap();
        assert_eq!(upserted.upserted_id, Some(fresh.to_hex()));
        assert_eq!(store.place_count().await, 2);
    }

    #[actix_rt::test]
    async fn delete_of_unknown_id_is_a_no_op() {
        let store = MemoryStore::new();
        store.insert_place(place_in("Peru")).await.unwrap();

        let ack = store.delete_place(ObjectId::new()).await.unwrap();
        assert_eq!(ack.deleted_count, 0);
        assert_eq!(store.place_count().await, 1);
    }
}
