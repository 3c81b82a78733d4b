//! 规则执行器
//!
//! 对单条编译后的规则执行"解析字段 + 评估条件"，可选记录评估追踪。

use serde_json::Value;

use crate::compiler::CompiledRule;
use crate::evaluator::{ConditionEvaluator, ConditionOutcome};
use crate::resolver::FieldResolver;

/// 规则执行器
pub struct RuleExecutor {
    /// 是否记录详细评估追踪
    trace_enabled: bool,
}

impl RuleExecutor {
    pub fn new() -> Self {
        Self {
            trace_enabled: false,
        }
    }

    /// 启用评估追踪
    pub fn with_trace(mut self) -> Self {
        self.trace_enabled = true;
        self
    }

    /// 执行规则评估
    pub fn execute(
        &self,
        rule: &CompiledRule,
        record: &Value,
        trace: &mut Vec<String>,
    ) -> ConditionOutcome {
        let resolved = FieldResolver::resolve(record, rule.field());

        let outcome =
            ConditionEvaluator::evaluate(resolved.as_ref(), rule.operator, &rule.expected, rule.field());

        if self.trace_enabled {
            trace.push(format!(
                "rule[{}] {}: {} {} {} => {}",
                rule.position,
                rule.name(),
                rule.field(),
                rule.operator,
                rule.expected.display,
                if outcome.matched { "MATCHED" } else { "NOT_MATCHED" }
            ));
        }

        outcome
    }
}

impl Default for RuleExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::RuleCompiler;
    use crate::models::{Action, Rule, RuleContext};
    use crate::operators::Operator;
    use serde_json::json;

    fn compile(rule: Rule) -> CompiledRule {
        RuleCompiler::new(RuleContext::AddScenes).compile(0, &rule).unwrap()
    }

    #[test]
    fn test_execute_match() {
        let rule = compile(Rule::new("alice", "performers.performer.name", Operator::Include, "alice", Action::Accept));
        let record = json!({"performers": [{"performer": {"name": "Alice"}}]});

        let mut trace = Vec::new();
        let outcome = RuleExecutor::new().execute(&rule, &record, &mut trace);

        assert!(outcome.matched);
        assert!(trace.is_empty());
    }

    #[test]
    fn test_execute_with_trace() {
        let rule = compile(Rule::new("alice", "title", Operator::Include, "alice", Action::Accept));
        let record = json!({"title": "Bob"});

        let mut trace = Vec::new();
        let outcome = RuleExecutor::new().with_trace().execute(&rule, &record, &mut trace);

        assert!(!outcome.matched);
        assert_eq!(trace, vec!["rule[0] alice: title include alice => NOT_MATCHED"]);
    }
}
