use crate::domain::model::PrefixRegistry;
use crate::utils::error::{FormRefError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_prefix_code, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub codec: CodecConfig,
    /// 類別名稱 -> 代號，會覆蓋或擴充內建的對照表
    #[serde(default)]
    pub prefixes: BTreeMap<String, String>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    pub default_category: Option<String>,
    pub replace_default_prefixes: Option<bool>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FormRefError::IoError)?;
        tracing::info!("Loaded configuration from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FormRefError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FORM_DEFAULT_CATEGORY})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        result.to_string()
    }

    /// 建立前綴對照表：內建表加上設定檔中的項目
    pub fn prefix_registry(&self) -> Result<PrefixRegistry> {
        let mut registry = if self.codec.replace_default_prefixes.unwrap_or(false) {
            PrefixRegistry::empty()
        } else {
            PrefixRegistry::default()
        };

        for (name, code) in &self.prefixes {
            registry.insert(name, code)?;
        }

        Ok(registry)
    }

    pub fn default_category(&self) -> Option<&str> {
        self.codec.default_category.as_deref()
    }

    pub fn seed(&self) -> Option<u64> {
        self.codec.seed
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        for (name, code) in &self.prefixes {
            let field = format!("prefixes.{}", name);
            validate_non_empty_string(&field, name)?;
            validate_prefix_code(&field, code)?;
        }

        let registry = self.prefix_registry()?;

        if registry.is_empty() {
            return Err(FormRefError::InvalidConfigValueError {
                field: "codec.replace_default_prefixes".to_string(),
                value: "true".to_string(),
                reason: "No prefixes left after replacing the defaults".to_string(),
            });
        }

        // 預設類別必須能在對照表中找到
        if let Some(category) = self.default_category() {
            validate_non_empty_string("codec.default_category", category)?;
            registry
                .resolve(category)
                .map_err(|_| FormRefError::InvalidConfigValueError {
                    field: "codec.default_category".to_string(),
                    value: category.to_string(),
                    reason: "Category is not registered in [prefixes] or the defaults".to_string(),
                })?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[codec]
default_category = "safety"
seed = 42

[prefixes]
PERMIT = "PT"

[output]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.default_category(), Some("safety"));
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.output_format(), OutputFormat::Json);

        let registry = config.prefix_registry().unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.resolve("permit").unwrap(), "PT");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.default_category(), None);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.prefix_registry().unwrap(), PrefixRegistry::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FORM_REF_TEST_CATEGORY", "diary");

        let toml_content = r#"
[codec]
default_category = "${FORM_REF_TEST_CATEGORY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.default_category(), Some("diary"));

        std::env::remove_var("FORM_REF_TEST_CATEGORY");
    }

    #[test]
    fn test_config_validation() {
        let bad_code = r#"
[prefixes]
PERMIT = "p-t"
"#;
        let config = TomlConfig::from_toml_str(bad_code).unwrap();
        assert!(config.validate().is_err());

        let unknown_default = r#"
[codec]
default_category = "payroll"
"#;
        let config = TomlConfig::from_toml_str(unknown_default).unwrap();
        assert!(config.validate().is_err());

        let shadowed_code = r#"
[prefixes]
SF = "XX"
"#;
        let config = TomlConfig::from_toml_str(shadowed_code).unwrap();
        assert!(config.validate().is_err());
        assert!(config.prefix_registry().is_err());

        let nothing_left = r#"
[codec]
replace_default_prefixes = true
"#;
        let config = TomlConfig::from_toml_str(nothing_left).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_replace_default_prefixes() {
        let toml_content = r#"
[codec]
replace_default_prefixes = true
default_category = "permit"

[prefixes]
PERMIT = "PT"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let registry = config.prefix_registry().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("safety").is_err());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[codec\nseed = 1").unwrap_err();
        assert!(matches!(err, FormRefError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[codec]
default_category = "LB"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.default_category(), Some("LB"));
    }
}
