pub mod common;
pub mod error;
pub mod logger;
pub mod validation;
