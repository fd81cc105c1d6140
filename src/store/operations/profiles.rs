use crate::leveling::types::UserProfile;
use crate::store::keys;
use crate::store::{Store, StoreError};

impl Store {
    pub fn create_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let key = keys::profile_key(&profile.user_id);
        let profile_bytes = Self::serialize(profile)?;

        // Atomic compare-and-swap: only insert if no profile exists for this
        // user yet. Two concurrent first-contact requests for the same user id
        // would otherwise both pass an existence check and race the insert.
        let cas_result = self
            .profiles
            .compare_and_swap(key.as_bytes(), None::<&[u8]>, Some(profile_bytes))
            .map_err(StoreError::Sled)?;

        if cas_result.is_err() {
            return Err(StoreError::Conflict {
                entity: "profile".to_string(),
                key: profile.user_id.clone(),
            });
        }

        Ok(())
    }

    pub fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let key = keys::profile_key(user_id);
        match self.profiles.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let key = keys::profile_key(&profile.user_id);
        self.profiles
            .insert(key.as_bytes(), Self::serialize(profile)?)?;
        Ok(())
    }

    /// Top `limit` profiles ordered by total XP descending. Full scan; the
    /// profile tree is one record per user.
    pub fn top_profiles_by_xp(&self, limit: usize) -> Result<Vec<UserProfile>, StoreError> {
        let mut profiles = Vec::new();
        for item in self.profiles.iter() {
            let (_, value) = item?;
            profiles.push(Self::deserialize::<UserProfile>(&value)?);
        }

        profiles.sort_by(|a, b| b.stats.total_xp.cmp(&a.stats.total_xp));
        profiles.truncate(limit);
        Ok(profiles)
    }
}
