pub mod error;
pub mod headers;
pub mod user_agent;
