mod groups;

pub use groups::{CallerGroups, DEFAULT_ADMIN_GROUP, FORBIDDEN_MESSAGE};
