//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::observability::ObservabilityConfig;

/// 规则引擎配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 是否在决策结果中记录逐条规则的评估追踪
    pub trace_enabled: bool,
    /// 规则文件路径（JSON，按上下文分组）
    pub rules_path: Option<PathBuf>,
    /// 待评估场景文件路径（JSON 数组）
    pub records_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trace_enabled: false,
            rules_path: None,
            records_path: None,
        }
    }
}

/// 规则同步的初始配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub enabled: bool,
    /// add_to_clean | clean_to_add | bidirectional
    pub direction: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            direction: "add_to_clean".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub observability: ObservabilityConfig,
    pub engine: EngineConfig,
    pub sync: SyncConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（SCENE_ 前缀，如 SCENE_ENGINE__TRACE_ENABLED -> engine.trace_enabled）
    pub fn load(service_name: &str) -> Result<Self> {
        let env = std::env::var("SCENE_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(Path::new(&config_dir), service_name, &env)
    }

    /// 从指定目录加载配置
    pub fn load_from(config_dir: &Path, service_name: &str, env: &str) -> Result<Self> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            .add_source(
                Environment::with_prefix("SCENE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        // 可观测性配置中的服务名始终与应用保持一致
        config.observability.service_name = config.service_name.clone();

        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.engine.trace_enabled);
        assert!(!config.sync.enabled);
        assert_eq!(config.sync.direction, "add_to_clean");
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path(), "scene-rules", "test").unwrap();

        assert_eq!(config.service_name, "scene-rules");
        assert_eq!(config.environment, "test");
        assert_eq!(config.observability.service_name, "scene-rules");
        assert!(!config.is_production());
    }

    #[test]
    fn test_layered_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [engine]
            trace_enabled = false
            rules_path = "rules.json"

            [sync]
            direction = "bidirectional"
            "#,
        )
        .unwrap();
        fs::write(
            dir.path().join("production.toml"),
            r#"
            [engine]
            trace_enabled = true

            [observability]
            json_logs = true
            "#,
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path(), "scene-rules", "production").unwrap();

        assert!(config.is_production());
        assert!(config.engine.trace_enabled);
        assert_eq!(config.engine.rules_path, Some(PathBuf::from("rules.json")));
        assert_eq!(config.sync.direction, "bidirectional");
        assert!(config.observability.json_logs);
    }
}
