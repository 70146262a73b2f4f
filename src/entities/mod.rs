pub mod prelude;

pub mod session_results;
pub mod session_searches;
pub mod sessions;
