pub mod issue;
pub mod result;
pub mod session;
