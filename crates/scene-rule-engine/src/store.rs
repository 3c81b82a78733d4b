//! 规则与同步设置存储
//!
//! 持久化属于外部协作方，这里只定义最小存储接口，并提供线程安全的内存实现。
//! 规则在每个上下文内按优先级严格排序，优先级连续且从 0 开始。

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Rule, RuleContext, SyncDirection, SyncSettings};

/// 规则存储接口
pub trait RuleRepository: Send + Sync {
    /// 按优先级顺序读取上下文的全部规则
    fn get_rules(&self, context: RuleContext) -> Result<Vec<Rule>>;

    /// 用给定顺序整体替换上下文的规则，顺序即新的优先级
    fn save_rules(&self, context: RuleContext, rules: Vec<Rule>) -> Result<()>;

    /// 删除上下文的全部规则
    fn delete_rules_for_context(&self, context: RuleContext) -> Result<()>;
}

/// 同步设置存储接口
pub trait SyncSettingsRepository: Send + Sync {
    /// 读取同步设置，首次访问时返回（并记录）默认值
    fn get_sync_settings(&self) -> Result<SyncSettings>;

    fn set_sync_settings(&self, enabled: bool, direction: SyncDirection) -> Result<SyncSettings>;
}

/// 存储中的规则
#[derive(Debug, Clone, Serialize)]
pub struct StoredRule {
    pub id: Uuid,
    pub priority: usize,
    pub rule: Rule,
}

/// 内存规则存储
#[derive(Clone, Default)]
pub struct InMemoryRuleStore {
    rules: Arc<DashMap<RuleContext, Vec<StoredRule>>>,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带优先级与 ID 的规则列表
    pub fn list_stored(&self, context: RuleContext) -> Vec<StoredRule> {
        self.rules
            .get(&context)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    /// 上下文中的规则数量
    pub fn len(&self, context: RuleContext) -> usize {
        self.rules.get(&context).map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, context: RuleContext) -> bool {
        self.len(context) == 0
    }
}

impl RuleRepository for InMemoryRuleStore {
    fn get_rules(&self, context: RuleContext) -> Result<Vec<Rule>> {
        let rules: Vec<Rule> = self
            .list_stored(context)
            .into_iter()
            .map(|stored| stored.rule)
            .collect();

        debug!(context = %context, count = rules.len(), "Loaded rules");
        Ok(rules)
    }

    #[instrument(skip(self, rules), fields(count = rules.len()))]
    fn save_rules(&self, context: RuleContext, rules: Vec<Rule>) -> Result<()> {
        let stored = rules
            .into_iter()
            .enumerate()
            .map(|(priority, rule)| StoredRule {
                id: Uuid::new_v4(),
                priority,
                rule,
            })
            .collect();

        self.rules.insert(context, stored);
        info!("Rules saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete_rules_for_context(&self, context: RuleContext) -> Result<()> {
        let removed = self.rules.remove(&context).map(|(_, r)| r.len()).unwrap_or(0);
        info!(removed, "Rules deleted");
        Ok(())
    }
}

/// 内存同步设置存储
#[derive(Clone, Default)]
pub struct InMemorySyncSettingsStore {
    settings: Arc<RwLock<Option<SyncSettings>>>,
}

impl InMemorySyncSettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SyncSettingsRepository for InMemorySyncSettingsStore {
    fn get_sync_settings(&self) -> Result<SyncSettings> {
        if let Some(settings) = self.settings.read().as_ref() {
            return Ok(settings.clone());
        }

        let mut guard = self.settings.write();
        Ok(guard.get_or_insert_with(SyncSettings::default).clone())
    }

    #[instrument(skip(self))]
    fn set_sync_settings(&self, enabled: bool, direction: SyncDirection) -> Result<SyncSettings> {
        let settings = SyncSettings {
            enabled,
            direction,
            updated_at: Some(Utc::now()),
        };

        *self.settings.write() = Some(settings.clone());
        info!("Sync settings updated");
        Ok(settings)
    }
}
