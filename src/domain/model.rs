use crate::core::codec::{is_valid, SEPARATOR};
use crate::utils::error::{FormRefError, Result};
use crate::utils::validation::validate_prefix_code;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 各表單類別與其兩碼代號
pub const FORM_PREFIXES: [(&str, &str); 4] = [
    ("SAFETY", "SF"),
    ("CLEANSING", "CL"),
    ("LABOUR", "LB"),
    ("DIARY", "DY"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormCategory {
    Safety,
    Cleansing,
    Labour,
    Diary,
}

impl FormCategory {
    pub const ALL: [FormCategory; 4] = [
        FormCategory::Safety,
        FormCategory::Cleansing,
        FormCategory::Labour,
        FormCategory::Diary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormCategory::Safety => "SAFETY",
            FormCategory::Cleansing => "CLEANSING",
            FormCategory::Labour => "LABOUR",
            FormCategory::Diary => "DIARY",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FormCategory::Safety => "SF",
            FormCategory::Cleansing => "CL",
            FormCategory::Labour => "LB",
            FormCategory::Diary => "DY",
        }
    }
}

impl fmt::Display for FormCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormCategory {
    type Err = FormRefError;

    /// 接受類別名稱或代號，不分大小寫
    fn from_str(s: &str) -> Result<Self> {
        FormCategory::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s) || c.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| FormRefError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// 表單編號，可能是 `123456` 或 `SF-123456`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormReferenceNumber {
    value: String,
}

impl FormReferenceNumber {
    pub fn parse(candidate: &str) -> Result<Self> {
        if !is_valid(candidate) {
            return Err(FormRefError::InvalidFormNumber {
                value: candidate.to_string(),
            });
        }
        Ok(Self {
            value: candidate.to_string(),
        })
    }

    pub fn prefix(&self) -> Option<&str> {
        self.value.split_once(SEPARATOR).map(|(prefix, _)| prefix)
    }

    pub fn digits(&self) -> &str {
        match self.value.split_once(SEPARATOR) {
            Some((_, digits)) => digits,
            None => &self.value,
        }
    }

    pub fn is_prefixed(&self) -> bool {
        self.prefix().is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for FormReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for FormReferenceNumber {
    type Err = FormRefError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FormReferenceNumber {
    type Error = FormRefError;

    fn try_from(value: String) -> Result<Self> {
        if !is_valid(&value) {
            return Err(FormRefError::InvalidFormNumber { value });
        }
        Ok(Self { value })
    }
}

impl From<FormReferenceNumber> for String {
    fn from(number: FormReferenceNumber) -> Self {
        number.value
    }
}

/// 類別名稱到代號的對照表，預設內容為 `FORM_PREFIXES`，可由設定檔擴充
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRegistry {
    entries: BTreeMap<String, String>,
}

impl PrefixRegistry {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, code: &str) -> Result<()> {
        let field = format!("prefixes.{}", name);
        crate::utils::validation::validate_non_empty_string(&field, name)?;
        validate_prefix_code(&field, code)?;

        let name = name.trim().to_ascii_uppercase();

        // 名稱與代號共用同一個查詢空間，不能互相遮蔽
        if self
            .entries
            .iter()
            .any(|(other, other_code)| *other != name && *other_code == name)
        {
            return Err(FormRefError::InvalidConfigValueError {
                field,
                value: name,
                reason: "Category name collides with an existing prefix code".to_string(),
            });
        }
        if self.entries.contains_key(code) && code != name {
            return Err(FormRefError::InvalidConfigValueError {
                field,
                value: code.to_string(),
                reason: "Prefix code collides with an existing category name".to_string(),
            });
        }

        if let Some(previous) = self.entries.insert(name.clone(), code.to_string()) {
            if previous != code {
                tracing::debug!("Prefix for {} overridden: {} -> {}", name, previous, code);
            }
        }
        Ok(())
    }

    /// 依類別名稱或代號找出代號，不分大小寫
    pub fn resolve(&self, name_or_code: &str) -> Result<&str> {
        let key = name_or_code.trim().to_ascii_uppercase();
        if let Some(code) = self.entries.get(&key) {
            return Ok(code.as_str());
        }
        self.entries
            .values()
            .find(|code| code.as_str() == key)
            .map(String::as_str)
            .ok_or_else(|| FormRefError::UnknownCategory {
                name: name_or_code.to_string(),
            })
    }

    pub fn is_known_code(&self, code: &str) -> bool {
        self.entries.values().any(|c| c == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, code)| (name.as_str(), code.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PrefixRegistry {
    fn default() -> Self {
        let entries = FORM_PREFIXES
            .iter()
            .map(|(name, code)| (name.to_string(), code.to_string()))
            .collect();
        Self { entries }
    }
}
