//! 场景规则服务
//!
//! 调用方入口：绑定规则存储与同步设置存储，每次评估读取最新规则快照。

use serde_json::Value;
use std::sync::Arc;
use tracing::error;

use crate::editor::RuleEditor;
use crate::engine::SceneRuleEngine;
use crate::error::Result;
use crate::models::{Decision, RuleContext, SyncCheck, SyncDirection, SyncSettings};
use crate::store::{InMemoryRuleStore, InMemorySyncSettingsStore, RuleRepository, SyncSettingsRepository};
use crate::sync::RuleSynchronizer;

/// 场景规则服务
#[derive(Clone)]
pub struct SceneRuleService {
    rules: Arc<dyn RuleRepository>,
    synchronizer: RuleSynchronizer,
    trace_enabled: bool,
}

impl SceneRuleService {
    pub fn new(rules: Arc<dyn RuleRepository>, settings: Arc<dyn SyncSettingsRepository>) -> Self {
        let synchronizer = RuleSynchronizer::new(rules.clone(), settings);
        Self {
            rules,
            synchronizer,
            trace_enabled: false,
        }
    }

    /// 使用内存存储创建服务
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRuleStore::new()),
            Arc::new(InMemorySyncSettingsStore::new()),
        )
    }

    /// 决策中附带评估追踪
    pub fn with_trace(mut self) -> Self {
        self.trace_enabled = true;
        self
    }

    pub fn rules(&self) -> &Arc<dyn RuleRepository> {
        &self.rules
    }

    pub fn synchronizer(&self) -> &RuleSynchronizer {
        &self.synchronizer
    }

    /// 评估场景
    ///
    /// 规则存储不可用时退回上下文默认决策，保证每个场景都有确定结果。
    pub fn evaluate(&self, context: RuleContext, record: &Value) -> Decision {
        let engine = match SceneRuleEngine::load(context, self.rules.as_ref()) {
            Ok(engine) => engine,
            Err(e) => {
                error!(context = %context, error = %e, "Failed to load rules, using default decision");
                SceneRuleEngine::new(context, &[])
            }
        };

        let engine = if self.trace_enabled { engine.with_trace() } else { engine };
        engine.decide(record)
    }

    /// 以当前规则为源执行一次同步
    pub fn synchronize(&self, source: RuleContext) -> Result<usize> {
        let rules = self.rules.get_rules(source)?;
        self.synchronizer.sync(source, &rules)
    }

    pub fn check_sync(&self) -> Result<SyncCheck> {
        self.synchronizer.are_in_sync()
    }

    pub fn sync_settings(&self) -> Result<SyncSettings> {
        self.synchronizer.settings()
    }

    pub fn update_sync_settings(&self, enabled: bool, direction: SyncDirection) -> Result<SyncSettings> {
        self.synchronizer.update_settings(enabled, direction)
    }

    /// 上下文的规则编辑器
    pub fn editor(&self, context: RuleContext) -> RuleEditor {
        RuleEditor::new(context, self.rules.clone(), self.synchronizer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use crate::models::{Action, Rule};
    use crate::operators::Operator;
    use serde_json::json;

    struct BrokenStore;

    impl RuleRepository for BrokenStore {
        fn get_rules(&self, _context: RuleContext) -> Result<Vec<Rule>> {
            Err(RuleError::Storage("connection refused".to_string()))
        }

        fn save_rules(&self, _context: RuleContext, _rules: Vec<Rule>) -> Result<()> {
            Err(RuleError::Storage("connection refused".to_string()))
        }

        fn delete_rules_for_context(&self, _context: RuleContext) -> Result<()> {
            Err(RuleError::Storage("connection refused".to_string()))
        }
    }

    #[test]
    fn test_evaluate_uses_latest_rules() {
        let service = SceneRuleService::in_memory();
        let record = json!({"title": "Official Trailer"});

        assert_eq!(service.evaluate(RuleContext::CleanScenes, &record).action, Action::Accept);

        service
            .editor(RuleContext::CleanScenes)
            .add(Rule::new("trailers", "title", Operator::Include, "trailer", Action::Reject))
            .unwrap();

        let decision = service.evaluate(RuleContext::CleanScenes, &record);
        assert_eq!(decision.action, Action::Reject);
        assert_eq!(decision.reason, "Rejected: Title include Official Trailer");
    }

    #[test]
    fn test_evaluate_degrades_on_store_error() {
        let service = SceneRuleService::new(Arc::new(BrokenStore), Arc::new(InMemorySyncSettingsStore::new()));
        let record = json!({"title": "Anything"});

        let add = service.evaluate(RuleContext::AddScenes, &record);
        assert_eq!(add.action, Action::Reject);
        assert!(add.is_default());

        let clean = service.evaluate(RuleContext::CleanScenes, &record);
        assert_eq!(clean.action, Action::Accept);
    }

    #[test]
    fn test_synchronize_and_check() {
        let service = SceneRuleService::in_memory();
        service
            .editor(RuleContext::CleanScenes)
            .add(Rule::new("gender", "performers.gender", Operator::Exclude, "female", Action::Reject))
            .unwrap();

        assert!(!service.check_sync().unwrap().in_sync);

        let count = service.synchronize(RuleContext::CleanScenes).unwrap();
        assert_eq!(count, 1);

        let add = service.rules().get_rules(RuleContext::AddScenes).unwrap();
        assert_eq!(add[0].field, "performers.performer.gender");
        assert!(service.check_sync().unwrap().in_sync);

        let settings = service.update_sync_settings(true, SyncDirection::CleanToAdd).unwrap();
        assert!(settings.enabled);
        assert_eq!(service.sync_settings().unwrap().direction, SyncDirection::CleanToAdd);
    }

    #[test]
    fn test_with_trace() {
        let service = SceneRuleService::in_memory().with_trace();
        service
            .editor(RuleContext::AddScenes)
            .add(Rule::new("x", "title", Operator::Include, "teaser", Action::Accept))
            .unwrap();

        let decision = service.evaluate(RuleContext::AddScenes, &json!({"title": "Trailer"}));
        assert_eq!(decision.evaluation_trace.len(), 1);
    }
}
