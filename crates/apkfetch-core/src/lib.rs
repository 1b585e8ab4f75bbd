pub mod config;
pub mod logging;

pub mod acquire;
pub mod cancel;
pub mod checksum;
pub mod error;
pub mod fetch;
pub mod model;
pub mod naming;
pub mod report;

pub use error::{ErrorKind, FetchError};
