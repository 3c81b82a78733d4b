//! 规则引擎领域模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;
use crate::operators::Operator;

/// 评估上下文：新增场景（来自外部目录）或清理场景（本地库）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleContext {
    AddScenes,
    CleanScenes,
}

impl RuleContext {
    pub const ALL: [RuleContext; 2] = [Self::AddScenes, Self::CleanScenes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddScenes => "add_scenes",
            Self::CleanScenes => "clean_scenes",
        }
    }

    /// 另一个上下文（同步目标）
    pub fn other(&self) -> Self {
        match self {
            Self::AddScenes => Self::CleanScenes,
            Self::CleanScenes => Self::AddScenes,
        }
    }

    /// 无规则匹配时的保守默认动作
    ///
    /// 新增默认拒绝，清理默认保留。
    pub fn default_action(&self) -> Action {
        match self {
            Self::AddScenes => Action::Reject,
            Self::CleanScenes => Action::Accept,
        }
    }
}

impl fmt::Display for RuleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleContext {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add_scenes" | "add" => Ok(Self::AddScenes),
            "clean_scenes" | "clean" => Ok(Self::CleanScenes),
            _ => Err(RuleError::UnknownContext(s.to_string())),
        }
    }
}

/// 规则动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Accept,
    Reject,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            _ => Err(RuleError::UnknownAction(s.to_string())),
        }
    }
}

/// 存储层中的动作大小写不统一，无法识别的值（包括非字符串）视为未设置
fn deserialize_action<'de, D>(deserializer: D) -> Result<Option<Action>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(|s| s.parse().ok()))
}

/// null 或非字符串视为空串，交由编译器按缺失处理
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

/// 规则定义
///
/// `field` 与 `operator` 保留存储中的原始字符串，缺失或非法时由编译器报告，
/// 评估时跳过该规则而不是中断整个决策。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub field: String,
    #[serde(default, alias = "match", deserialize_with = "deserialize_text")]
    pub operator: String,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_action")]
    pub action: Option<Action>,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
        action: Action,
    ) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            operator: operator.to_string(),
            value: Some(value.into()),
            action: Some(action),
        }
    }

    /// 用于日志的规则名，未命名时使用序号
    pub fn display_name(&self, position: usize) -> String {
        if self.name.trim().is_empty() {
            format!("Rule {}", position + 1)
        } else {
            self.name.clone()
        }
    }
}

/// 命中的规则
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRule {
    /// 规则在上下文中的优先级（从 0 开始）
    pub position: usize,
    pub name: String,
}

/// 场景决策结果
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    pub context: RuleContext,
    pub action: Action,
    pub reason: String,
    pub matched_rule: Option<MatchedRule>,
    pub evaluation_trace: Vec<String>,
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        self.action == Action::Accept
    }

    pub fn is_default(&self) -> bool {
        self.matched_rule.is_none()
    }
}

/// 规则同步方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncDirection {
    #[default]
    AddToClean,
    CleanToAdd,
    Bidirectional,
}

impl SyncDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddToClean => "add_to_clean",
            Self::CleanToAdd => "clean_to_add",
            Self::Bidirectional => "bidirectional",
        }
    }

    /// 单向同步的源上下文，双向同步返回 None
    pub fn source(&self) -> Option<RuleContext> {
        match self {
            Self::AddToClean => Some(RuleContext::AddScenes),
            Self::CleanToAdd => Some(RuleContext::CleanScenes),
            Self::Bidirectional => None,
        }
    }
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SyncDirection {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add_to_clean" => Ok(Self::AddToClean),
            "clean_to_add" => Ok(Self::CleanToAdd),
            "bidirectional" => Ok(Self::Bidirectional),
            _ => Err(RuleError::UnknownDirection(s.to_string())),
        }
    }
}

/// 规则同步设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SyncSettings {
    pub enabled: bool,
    pub direction: SyncDirection,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 两个上下文规则集的一致性检查结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncCheck {
    pub in_sync: bool,
    pub reason: String,
}

impl SyncCheck {
    pub fn in_sync(reason: impl Into<String>) -> Self {
        Self {
            in_sync: true,
            reason: reason.into(),
        }
    }

    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self {
            in_sync: false,
            reason: reason.into(),
        }
    }
}
