//! 规则编译器
//!
//! 将存储中的规则校验并编译为可直接执行的形式：解析操作符、预先规整比较值、
//! 确定命中后的动作。编译失败的规则属于配置错误，由引擎跳过。

use crate::error::{Result, RuleError};
use crate::evaluator::ExpectedValue;
use crate::models::{Action, Rule, RuleContext};
use crate::operators::Operator;

/// 编译后的规则
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// 原始规则
    pub rule: Rule,
    /// 在上下文中的优先级（从 0 开始）
    pub position: usize,
    pub operator: Operator,
    pub expected: ExpectedValue,
    /// 命中后的动作，规则未设置时取上下文默认动作
    pub action: Action,
}

impl CompiledRule {
    pub fn name(&self) -> String {
        self.rule.display_name(self.position)
    }

    pub fn field(&self) -> &str {
        &self.rule.field
    }
}

/// 被跳过的规则
#[derive(Debug)]
pub struct SkippedRule {
    pub position: usize,
    pub name: String,
    pub error: RuleError,
}

/// 规则编译器
pub struct RuleCompiler {
    context: RuleContext,
}

impl RuleCompiler {
    pub fn new(context: RuleContext) -> Self {
        Self { context }
    }

    /// 编译单条规则
    pub fn compile(&self, position: usize, rule: &Rule) -> Result<CompiledRule> {
        let name = rule.display_name(position);

        if rule.field.trim().is_empty() {
            return Err(RuleError::MissingField { rule: name });
        }

        if rule.operator.trim().is_empty() {
            return Err(RuleError::MissingOperator { rule: name });
        }

        let operator: Operator = rule.operator.parse()?;

        Ok(CompiledRule {
            rule: rule.clone(),
            position,
            operator,
            expected: ExpectedValue::from_rule_value(rule.value.as_ref()),
            action: rule.action.unwrap_or_else(|| self.context.default_action()),
        })
    }

    /// 按顺序编译规则列表，返回可执行规则与被跳过的规则
    pub fn compile_all(&self, rules: &[Rule]) -> (Vec<CompiledRule>, Vec<SkippedRule>) {
        let mut compiled = Vec::with_capacity(rules.len());
        let mut skipped = Vec::new();

        for (position, rule) in rules.iter().enumerate() {
            match self.compile(position, rule) {
                Ok(c) => compiled.push(c),
                Err(error) => skipped.push(SkippedRule {
                    position,
                    name: rule.display_name(position),
                    error,
                }),
            }
        }

        (compiled, skipped)
    }
}
