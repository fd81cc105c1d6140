pub fn user_key(user_id: &str) -> String {
    user_id.to_string()
}

pub fn profile_key(user_id: &str) -> String {
    user_id.to_string()
}
