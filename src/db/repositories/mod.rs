pub mod result;
pub mod search;
pub mod session;
