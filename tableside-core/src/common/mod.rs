//! Common utilities and shared infrastructure
//!
//! - Error handling
//! - Logging setup
//! - Result types

pub mod error;
pub mod logger;

pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use logger::{init_logger, init_logger_with_file};
