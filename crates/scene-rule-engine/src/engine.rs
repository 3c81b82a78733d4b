//! 场景规则引擎
//!
//! 每个上下文一份有序规则快照，按优先级逐条评估，第一条命中的规则决定结果；
//! 全部未命中时使用上下文的保守默认值：新增默认拒绝，清理默认保留。

use serde_json::Value;
use tracing::{debug, warn};

use crate::compiler::{CompiledRule, RuleCompiler, SkippedRule};
use crate::error::Result;
use crate::executor::RuleExecutor;
use crate::models::{Action, Decision, MatchedRule, Rule, RuleContext};
use crate::store::RuleRepository;
use crate::vocabulary;

/// 一次评估的最终归属
enum Resolution<'a> {
    /// 某条规则命中
    Rule {
        rule: &'a CompiledRule,
        sample: Option<Value>,
    },
    /// 没有规则命中，使用上下文默认值
    Default,
}

/// 场景规则引擎
pub struct SceneRuleEngine {
    context: RuleContext,
    rules: Vec<CompiledRule>,
    skipped: Vec<SkippedRule>,
    executor: RuleExecutor,
}

impl SceneRuleEngine {
    /// 基于规则快照创建引擎，非法规则被跳过并记录告警
    pub fn new(context: RuleContext, rules: &[Rule]) -> Self {
        let (compiled, skipped) = RuleCompiler::new(context).compile_all(rules);

        for s in &skipped {
            warn!(
                context = %context,
                rule = %s.name,
                position = s.position,
                error = %s.error,
                "Skipping malformed rule"
            );
            metrics::counter!("scene_rule_skipped_total", "context" => context.as_str())
                .increment(1);
        }

        if compiled.is_empty() {
            warn!(
                context = %context,
                default = %context.default_action(),
                "No usable rules - every scene gets the default decision"
            );
        }

        Self {
            context,
            rules: compiled,
            skipped,
            executor: RuleExecutor::new(),
        }
    }

    /// 从规则存储读取最新快照创建引擎
    pub fn load(context: RuleContext, store: &dyn RuleRepository) -> Result<Self> {
        let rules = store.get_rules(context)?;
        Ok(Self::new(context, &rules))
    }

    /// 启用评估追踪
    pub fn with_trace(mut self) -> Self {
        self.executor = self.executor.with_trace();
        self
    }

    pub fn context(&self) -> RuleContext {
        self.context
    }

    /// 可执行的规则数量
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// 被跳过的规则
    pub fn skipped(&self) -> &[SkippedRule] {
        &self.skipped
    }

    /// 对场景做出决策
    pub fn decide(&self, record: &Value) -> Decision {
        let mut trace = Vec::new();
        let title = record.get("title").and_then(Value::as_str).unwrap_or("Untitled");

        let resolution = self
            .rules
            .iter()
            .find_map(|rule| {
                let outcome = self.executor.execute(rule, record, &mut trace);
                outcome.matched.then_some(Resolution::Rule {
                    rule,
                    sample: outcome.sample,
                })
            })
            .unwrap_or(Resolution::Default);

        let decision = match resolution {
            Resolution::Rule { rule, sample } => {
                let label = vocabulary::label(self.context, rule.field());
                let detail = format!("{} {} {}", label, rule.operator, display_sample(sample.as_ref()));
                let reason = match rule.action {
                    Action::Accept => format!("Accepted: {}", detail),
                    Action::Reject => format!("Rejected: {}", detail),
                };

                debug!(
                    context = %self.context,
                    scene = %title,
                    rule = %rule.name(),
                    action = %rule.action,
                    "{}",
                    reason
                );

                Decision {
                    context: self.context,
                    action: rule.action,
                    reason,
                    matched_rule: Some(MatchedRule {
                        position: rule.position,
                        name: rule.name(),
                    }),
                    evaluation_trace: trace,
                }
            }
            Resolution::Default => {
                let action = self.context.default_action();
                let reason = match action {
                    Action::Reject => "No rules matched - default reject",
                    Action::Accept => "No rules matched - default keep",
                };

                debug!(context = %self.context, scene = %title, action = %action, "{}", reason);

                Decision {
                    context: self.context,
                    action,
                    reason: reason.to_string(),
                    matched_rule: None,
                    evaluation_trace: trace,
                }
            }
        };

        metrics::counter!(
            "scene_rule_decisions_total",
            "context" => self.context.as_str(),
            "action" => decision.action.as_str()
        )
        .increment(1);

        decision
    }
}

/// 决策说明中的代表值：带 name 的对象显示名称，缺失值显示 none
fn display_sample(sample: Option<&Value>) -> String {
    match sample {
        None => "none".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(map)) => match map.get("name") {
            Some(Value::String(name)) => name.clone(),
            _ => Value::Object(map.clone()).to_string(),
        },
        Some(other) => other.to_string(),
    }
}
