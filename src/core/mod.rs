pub mod codec;

pub use crate::domain::model::{FormCategory, FormReferenceNumber, PrefixRegistry, FORM_PREFIXES};
pub use crate::domain::ports::NumberSource;
pub use crate::utils::error::Result;
