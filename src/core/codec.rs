use crate::adapters::random::ThreadRngSource;
use crate::domain::model::{FormCategory, FormReferenceNumber};
use crate::domain::ports::NumberSource;
use crate::utils::error::{FormRefError, Result};
use crate::utils::validation::validate_prefix;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// 最小的六位數編號，保證不會有前導零
pub const BARE_MIN: u32 = 100_000;
pub const BARE_MAX: u32 = 999_999;
/// 可產生的編號總數
pub const BARE_CAPACITY: usize = (BARE_MAX - BARE_MIN + 1) as usize;
pub const SEPARATOR: char = '-';

// `\d` 會匹配 Unicode 數字，這裡只接受 ASCII
static NUMBER_PART: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

/// 把亂數來源的結果折回 `[BARE_MIN, BARE_MAX]`，範圍內的值原樣保留
fn fold_into_range(value: u32) -> u32 {
    let capacity = BARE_CAPACITY as u32;
    if value < BARE_MIN {
        BARE_MIN + value % capacity
    } else {
        BARE_MIN + (value - BARE_MIN) % capacity
    }
}

/// 檢查表單編號格式
///
/// 有 `-` 時只看第一個 `-` 之後的部分，所以 `SF-123456-extra` 不合法。
pub fn is_valid(candidate: &str) -> bool {
    let number_part = match candidate.split_once(SEPARATOR) {
        Some((_, rest)) => rest,
        None => candidate,
    };
    NUMBER_PART.is_match(number_part)
}

/// 產生與驗證六位數表單編號
///
/// 單次產生不保證唯一，需要不重複的編號請用 [`FormReferenceCodec::generate_distinct_batch`]。
#[derive(Debug, Clone, Default)]
pub struct FormReferenceCodec<S: NumberSource = ThreadRngSource> {
    source: S,
}

impl FormReferenceCodec<ThreadRngSource> {
    pub fn new() -> Self {
        Self {
            source: ThreadRngSource,
        }
    }
}

impl<S: NumberSource> FormReferenceCodec<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    pub fn generate_bare_number(&self) -> String {
        let drawn = self.source.draw(BARE_MIN, BARE_MAX);
        let value = fold_into_range(drawn);
        if value != drawn {
            tracing::warn!("Number source returned {} outside the form number range", drawn);
        }
        let number = value.to_string();
        tracing::debug!("Generated form number {}", number);
        number
    }

    /// 不檢查前綴是否在 `FORM_PREFIXES` 中
    pub fn generate_prefixed_number(&self, prefix: &str) -> String {
        format!("{}{}{}", prefix, SEPARATOR, self.generate_bare_number())
    }

    pub fn is_valid(&self, candidate: &str) -> bool {
        let valid = is_valid(candidate);
        if !valid {
            tracing::debug!("Rejected form number candidate {:?}", candidate);
        }
        valid
    }

    /// 與 `generate_prefixed_number` 相同，但會先檢查前綴
    pub fn generate_checked(&self, prefix: &str) -> Result<FormReferenceNumber> {
        validate_prefix(prefix)?;
        FormReferenceNumber::try_from(self.generate_prefixed_number(prefix))
    }

    pub fn generate_for_category(&self, category: FormCategory) -> Result<FormReferenceNumber> {
        FormReferenceNumber::try_from(self.generate_prefixed_number(category.code()))
    }

    fn generate_one(&self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) => self.generate_prefixed_number(prefix),
            None => self.generate_bare_number(),
        }
    }

    /// 連續產生 `count` 個編號，可能重複
    pub fn generate_batch(&self, prefix: Option<&str>, count: usize) -> Vec<String> {
        (0..count).map(|_| self.generate_one(prefix)).collect()
    }

    /// 產生 `count` 個彼此不重複的編號，重複時重抽
    pub fn generate_distinct_batch(&self, prefix: Option<&str>, count: usize) -> Result<Vec<String>> {
        if count > BARE_CAPACITY {
            return Err(FormRefError::BatchTooLarge {
                requested: count,
                capacity: BARE_CAPACITY,
            });
        }

        let mut seen = HashSet::with_capacity(count);
        let mut numbers = Vec::with_capacity(count);
        let mut redraws = 0usize;

        while numbers.len() < count {
            let bare = self.generate_bare_number();
            if !seen.insert(bare.clone()) {
                redraws += 1;
                continue;
            }
            numbers.push(match prefix {
                Some(prefix) => format!("{}{}{}", prefix, SEPARATOR, bare),
                None => bare,
            });
        }

        if redraws > 0 {
            tracing::debug!("Distinct batch of {} needed {} redraws", count, redraws);
        }
        Ok(numbers)
    }
}
