//! 场景规则引擎
//!
//! 决定外部目录中的场景是否加入本地库（新增），以及本地库中的场景是否保留（清理）：
//! - 字段路径解析与列表广播
//! - 三围字符串解析与罩杯模糊匹配
//! - 按优先级第一条命中的规则决定结果，未命中时使用保守默认值
//! - 两个上下文之间的规则映射与同步

pub mod compiler;
pub mod editor;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod mapping;
pub mod measurements;
pub mod models;
pub mod operators;
pub mod resolver;
pub mod service;
pub mod store;
pub mod sync;
pub mod vocabulary;

pub use compiler::{CompiledRule, RuleCompiler, SkippedRule};
pub use editor::RuleEditor;
pub use engine::SceneRuleEngine;
pub use error::{Result, RuleError};
pub use evaluator::{ConditionEvaluator, ConditionOutcome, ExpectedValue};
pub use executor::RuleExecutor;
pub use mapping::FieldMapping;
pub use measurements::Measurements;
pub use models::{
    Action, Decision, MatchedRule, Rule, RuleContext, SyncCheck, SyncDirection, SyncSettings,
};
pub use operators::Operator;
pub use resolver::FieldResolver;
pub use service::SceneRuleService;
pub use store::{
    InMemoryRuleStore, InMemorySyncSettingsStore, RuleRepository, StoredRule,
    SyncSettingsRepository,
};
pub use sync::{check_rule_sets, RuleSynchronizer};

/// 注册引擎指标说明
pub fn describe_metrics() {
    metrics::describe_counter!(
        "scene_rule_decisions_total",
        "Scene decisions by context and action"
    );
    metrics::describe_counter!(
        "scene_rule_skipped_total",
        "Malformed rules skipped during evaluation"
    );
}
