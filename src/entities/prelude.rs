pub use super::session_results::Entity as SessionResults;
pub use super::session_searches::Entity as SessionSearches;
pub use super::sessions::Entity as Sessions;
