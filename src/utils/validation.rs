use crate::utils::error::{FormRefError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 檢查前綴：不可為空、不可含 `-` 或空白，大小寫不限
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(FormRefError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: "Prefix cannot be empty".to_string(),
        });
    }

    if prefix.contains('-') {
        return Err(FormRefError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: "Prefix cannot contain the '-' separator".to_string(),
        });
    }

    if prefix.chars().any(char::is_whitespace) {
        return Err(FormRefError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: "Prefix cannot contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// 設定檔中的代碼要求更嚴格：只允許大寫字母與數字
pub fn validate_prefix_code(field_name: &str, code: &str) -> Result<()> {
    validate_prefix(code).map_err(|e| FormRefError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: code.to_string(),
        reason: e.to_string(),
    })?;

    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(FormRefError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: code.to_string(),
            reason: "Prefix codes must be uppercase ASCII letters or digits".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(FormRefError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FormRefError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
