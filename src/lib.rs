pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::random::{SeededSource, ThreadRngSource};
pub use crate::app::{FormService, PrefixChoice};
pub use crate::config::toml_config::{OutputFormat, TomlConfig};
pub use crate::core::codec::{is_valid, FormReferenceCodec};
pub use crate::domain::model::{FormCategory, FormReferenceNumber, PrefixRegistry, FORM_PREFIXES};
pub use crate::domain::ports::NumberSource;
pub use crate::utils::error::{FormRefError, Result};
