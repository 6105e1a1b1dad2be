use crate::adapters::random::ThreadRngSource;
use crate::config::toml_config::{OutputFormat, TomlConfig};
use crate::core::codec::FormReferenceCodec;
use crate::core::{NumberSource, PrefixRegistry};
use crate::utils::error::Result;
use crate::utils::validation::validate_prefix;
use serde::Serialize;

/// 產生時要使用的前綴
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixChoice {
    /// 沒指定任何前綴，改用設定檔的預設類別（若有）
    Default,
    Bare,
    Category(String),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    pub prefix: Option<String>,
    pub distinct: bool,
    pub numbers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationEntry {
    pub candidate: String,
    pub valid: bool,
    pub prefix: Option<String>,
    /// 前綴是否在對照表中，只供參考，不影響 `valid`
    pub known_prefix: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub entries: Vec<ValidationEntry>,
    pub valid_count: usize,
    pub invalid_count: usize,
}

impl ValidationReport {
    pub fn all_valid(&self) -> bool {
        self.invalid_count == 0
    }
}

/// 表單建立與匯入流程使用的入口，組合 codec 與前綴對照表
pub struct FormService<S: NumberSource = ThreadRngSource> {
    codec: FormReferenceCodec<S>,
    registry: PrefixRegistry,
    default_category: Option<String>,
}

impl<S: NumberSource> FormService<S> {
    pub fn new(codec: FormReferenceCodec<S>, registry: PrefixRegistry) -> Self {
        Self {
            codec,
            registry,
            default_category: None,
        }
    }

    pub fn from_config(codec: FormReferenceCodec<S>, config: &TomlConfig) -> Result<Self> {
        let registry = config.prefix_registry()?;
        Ok(Self {
            codec,
            registry,
            default_category: config.default_category().map(str::to_string),
        })
    }

    pub fn with_default_category(mut self, category: Option<String>) -> Self {
        self.default_category = category;
        self
    }

    pub fn registry(&self) -> &PrefixRegistry {
        &self.registry
    }

    pub fn resolve_prefix(&self, choice: &PrefixChoice) -> Result<Option<String>> {
        match choice {
            PrefixChoice::Bare => Ok(None),
            PrefixChoice::Category(name) => Ok(Some(self.registry.resolve(name)?.to_string())),
            PrefixChoice::Raw(prefix) => {
                validate_prefix(prefix)?;
                if !self.registry.is_known_code(prefix) {
                    tracing::warn!("Prefix {} is not a registered category code", prefix);
                }
                Ok(Some(prefix.clone()))
            }
            PrefixChoice::Default => match &self.default_category {
                Some(name) => Ok(Some(self.registry.resolve(name)?.to_string())),
                None => Ok(None),
            },
        }
    }

    pub fn generate(&self, choice: &PrefixChoice, count: usize, distinct: bool) -> Result<GenerateReport> {
        let prefix = self.resolve_prefix(choice)?;
        tracing::debug!(
            "Generating {} form number(s), prefix: {:?}, distinct: {}",
            count,
            prefix,
            distinct
        );

        let numbers = if distinct {
            self.codec.generate_distinct_batch(prefix.as_deref(), count)?
        } else {
            self.codec.generate_batch(prefix.as_deref(), count)
        };

        Ok(GenerateReport {
            prefix,
            distinct,
            numbers,
        })
    }

    pub fn validate<I, T>(&self, candidates: I) -> ValidationReport
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let entries: Vec<ValidationEntry> = candidates
            .into_iter()
            .map(|candidate| {
                let candidate = candidate.as_ref();
                let prefix = candidate
                    .split_once(crate::core::codec::SEPARATOR)
                    .map(|(p, _)| p.to_string());
                let known_prefix = prefix
                    .as_deref()
                    .map(|p| self.registry.is_known_code(p))
                    .unwrap_or(false);
                ValidationEntry {
                    candidate: candidate.to_string(),
                    valid: self.codec.is_valid(candidate),
                    prefix,
                    known_prefix,
                }
            })
            .collect();

        let valid_count = entries.iter().filter(|e| e.valid).count();
        let invalid_count = entries.len() - valid_count;

        ValidationReport {
            entries,
            valid_count,
            invalid_count,
        }
    }
}

pub fn render_generate(report: &GenerateReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.numbers.join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

pub fn render_validation(report: &ValidationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report
            .entries
            .iter()
            .map(|e| {
                format!(
                    "{}\t{}",
                    if e.valid { "valid" } else { "invalid" },
                    e.candidate
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

pub fn render_prefixes(registry: &PrefixRegistry, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(registry
            .iter()
            .map(|(name, code)| format!("{}\t{}", code, name))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let map: std::collections::BTreeMap<&str, &str> = registry.iter().collect();
            Ok(serde_json::to_string_pretty(&map)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::random::SeededSource;

    fn service() -> FormService<SeededSource> {
        FormService::new(
            FormReferenceCodec::with_source(SeededSource::new(9)),
            PrefixRegistry::default(),
        )
    }

    #[test]
    fn test_resolve_prefix() {
        let service = service();
        assert_eq!(service.resolve_prefix(&PrefixChoice::Bare).unwrap(), None);
        assert_eq!(service.resolve_prefix(&PrefixChoice::Default).unwrap(), None);
        assert_eq!(
            service
                .resolve_prefix(&PrefixChoice::Category("labour".to_string()))
                .unwrap(),
            Some("LB".to_string())
        );
        assert_eq!(
            service
                .resolve_prefix(&PrefixChoice::Raw("ZZ".to_string()))
                .unwrap(),
            Some("ZZ".to_string())
        );
        assert!(service
            .resolve_prefix(&PrefixChoice::Raw(String::new()))
            .is_err());
        assert!(service
            .resolve_prefix(&PrefixChoice::Category("payroll".to_string()))
            .is_err());
    }

    #[test]
    fn test_default_category_applies() {
        let service = service().with_default_category(Some("diary".to_string()));
        let report = service.generate(&PrefixChoice::Default, 2, false).unwrap();
        assert_eq!(report.prefix.as_deref(), Some("DY"));
        assert!(report.numbers.iter().all(|n| n.starts_with("DY-")));
    }

    #[test]
    fn test_validate_report() {
        let report = service().validate(["SF-123456", "XX-654321", "12345", "SF-123456-extra"]);
        assert_eq!(report.valid_count, 2);
        assert_eq!(report.invalid_count, 2);
        assert!(!report.all_valid());
        assert!(report.entries[0].known_prefix);
        assert!(!report.entries[1].known_prefix);
        assert!(report.entries[1].valid);
        assert_eq!(report.entries[2].prefix, None);
    }

    #[test]
    fn test_render_text_outputs() {
        let report = ValidationReport {
            entries: vec![ValidationEntry {
                candidate: "SF-1".to_string(),
                valid: false,
                prefix: Some("SF".to_string()),
                known_prefix: true,
            }],
            valid_count: 0,
            invalid_count: 1,
        };
        assert_eq!(
            render_validation(&report, OutputFormat::Text).unwrap(),
            "invalid\tSF-1"
        );

        let prefixes = render_prefixes(&PrefixRegistry::default(), OutputFormat::Text).unwrap();
        assert!(prefixes.lines().any(|l| l == "SF\tSAFETY"));
        assert_eq!(prefixes.lines().count(), 4);
    }

    #[test]
    fn test_render_generate_json() {
        let report = GenerateReport {
            prefix: Some("CL".to_string()),
            distinct: true,
            numbers: vec!["CL-123456".to_string()],
        };
        let json = render_generate(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["numbers"][0], "CL-123456");
        assert_eq!(value["prefix"], "CL");
    }
}
