//! 规则操作符定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;

/// 条件操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    // 包含检查
    Include,
    Exclude,

    // 数值比较
    IsLargerThan,
    IsSmallerThan,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Self::Include,
        Self::Exclude,
        Self::IsLargerThan,
        Self::IsSmallerThan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::IsLargerThan => "is_larger_than",
            Self::IsSmallerThan => "is_smaller_than",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operator {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| RuleError::UnknownOperator(s.to_string()))
    }
}
