//! 统一错误处理模块
//!
//! 定义系统中共享的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum SceneError {
    // ==================== 配置错误 ====================
    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    // ==================== 文件与序列化错误 ====================
    #[error("文件读取失败: {path} - {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    // ==================== 业务逻辑错误 ====================
    #[error("参数验证失败: {0}")]
    Validation(String),

    #[error("规则同步冲突: {0}")]
    SyncConflict(String),

    #[error("记录未找到: {entity} id={id}")]
    NotFound { entity: String, id: String },

    // ==================== 通用错误 ====================
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, SceneError>;

impl SceneError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::SyncConflict(_) => "SYNC_CONFLICT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否由调用方输入引起（可由用户修正后重试）
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::SyncConflict(_) | Self::NotFound { .. }
        )
    }
}
