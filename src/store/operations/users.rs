use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub language: String,
    pub subscription: Subscription,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    Free,
    Premium,
}

impl Subscription {
    pub fn daily_lesson_limit(&self) -> u32 {
        match self {
            Subscription::Free => crate::constants::DAILY_LESSON_LIMIT_FREE,
            Subscription::Premium => crate::constants::DAILY_LESSON_LIMIT_PREMIUM,
        }
    }
}

impl Store {
    pub fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let key = keys::user_key(&user.id);
        let user_bytes = Self::serialize(user)?;

        // CAS keeps first-contact registration idempotent under races: the
        // second writer for the same id sees a Conflict, not a silent overwrite.
        let cas_result = self
            .users
            .compare_and_swap(key.as_bytes(), None::<&[u8]>, Some(user_bytes))
            .map_err(StoreError::Sled)?;

        if cas_result.is_err() {
            return Err(StoreError::Conflict {
                entity: "user".to_string(),
                key: user.id.clone(),
            });
        }

        Ok(())
    }

    pub fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        let key = keys::user_key(user_id);
        match self.users.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn update_user(&self, user: &User) -> Result<(), StoreError> {
        self.get_user_by_id(&user.id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "user".to_string(),
                key: user.id.clone(),
            })?;

        let key = keys::user_key(&user.id);
        self.users.insert(key.as_bytes(), Self::serialize(user)?)?;
        Ok(())
    }
}
