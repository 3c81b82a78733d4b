//! 规则引擎错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("规则缺少字段: {rule}")]
    MissingField { rule: String },

    #[error("规则缺少操作符: {rule}")]
    MissingOperator { rule: String },

    #[error("未知的操作符: {0}")]
    UnknownOperator(String),

    #[error("字段 {field} 不属于上下文 {context}")]
    UnknownField { field: String, context: String },

    #[error("字段 {field} 不支持操作符 {operator}")]
    OperatorNotAllowed { field: String, operator: String },

    #[error("未知的上下文: {0}")]
    UnknownContext(String),

    #[error("未知的动作: {0}")]
    UnknownAction(String),

    #[error("未知的同步方向: {0}")]
    UnknownDirection(String),

    #[error("规则未找到: context={context} index={index}")]
    RuleNotFound { context: String, index: usize },

    #[error("无效的排序: {0}")]
    InvalidOrder(String),

    #[error("上下文 {0} 当前为只读（规则同步已开启）")]
    ReadOnlyContext(String),

    #[error("Rules must be in sync before enabling Rule Synchronization. {0}")]
    SyncMismatch(String),

    #[error("规则存储错误: {0}")]
    Storage(String),

    #[error("JSON 序列化错误: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RuleError {
    /// 配置类错误：评估时跳过该规则并继续
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::MissingOperator { .. } | Self::UnknownOperator(_)
        )
    }
}

impl From<RuleError> for scene_shared::SceneError {
    fn from(err: RuleError) -> Self {
        use scene_shared::SceneError;

        match err {
            RuleError::SyncMismatch(reason) => SceneError::SyncConflict(reason),
            RuleError::RuleNotFound { context, index } => SceneError::NotFound {
                entity: format!("{} rule", context),
                id: index.to_string(),
            },
            RuleError::JsonError(e) => SceneError::Json(e),
            RuleError::Storage(msg) => SceneError::Internal(msg),
            other => SceneError::Validation(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;
