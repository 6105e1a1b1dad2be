pub mod service;

pub use service::{FormService, GenerateReport, PrefixChoice, ValidationEntry, ValidationReport};
