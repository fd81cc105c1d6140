pub const USERS: &str = "users";
pub const PROFILES: &str = "profiles";
