//! 共享库
//!
//! 包含场景过滤服务共用的配置加载、错误处理与日志初始化代码。

pub mod config;
pub mod error;
pub mod io;
pub mod observability;

pub use config::AppConfig;
pub use error::{Result, SceneError};
