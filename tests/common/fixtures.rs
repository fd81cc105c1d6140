use chrono::Utc;

use tutor_backend::leveling::engine::compute_level;
use tutor_backend::leveling::types::UserProfile;
use tutor_backend::store::operations::users::{Subscription, User};
use tutor_backend::store::Store;

pub fn seed_user(store: &Store, id: &str, username: &str, subscription: Subscription) -> User {
    let user = User {
        id: id.to_string(),
        username: username.to_string(),
        first_name: String::new(),
        language: "en".to_string(),
        subscription,
        created_at: Utc::now(),
    };
    store.create_user(&user).expect("create seed user");

    let profile = UserProfile::new(id, user.created_at);
    store.create_profile(&profile).expect("create seed profile");

    user
}

/// Put a seeded user's profile into a known XP/streak position, with the
/// derived level kept consistent the way the engine would leave it.
pub fn set_profile_position(store: &Store, user_id: &str, total_xp: u64, streak: u32) {
    let mut profile = store
        .get_profile(user_id)
        .expect("load seed profile")
        .expect("seed profile exists");

    profile.stats.total_xp = total_xp;
    profile.stats.global_level = compute_level(total_xp);
    profile.stats.current_streak = streak;
    profile.stats.longest_streak = profile.stats.longest_streak.max(streak);

    store.save_profile(&profile).expect("save seed profile");
}
