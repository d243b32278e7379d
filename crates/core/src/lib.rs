pub mod config;
pub mod content;
pub mod error;
pub mod record;

pub use config::Config;
pub use content::*;
pub use error::*;
pub use record::*;
