//! 规则编辑
//!
//! 单个上下文内的规则增删改与排序。每次修改都会先检查上下文是否只读、
//! 再按字段表校验，保存后在需要时同步到另一个上下文。

use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{Result, RuleError};
use crate::models::{Rule, RuleContext};
use crate::operators::Operator;
use crate::store::RuleRepository;
use crate::sync::RuleSynchronizer;
use crate::vocabulary;

/// 规则编辑器
pub struct RuleEditor {
    context: RuleContext,
    rules: Arc<dyn RuleRepository>,
    synchronizer: RuleSynchronizer,
}

impl RuleEditor {
    pub fn new(context: RuleContext, rules: Arc<dyn RuleRepository>, synchronizer: RuleSynchronizer) -> Self {
        Self {
            context,
            rules,
            synchronizer,
        }
    }

    pub fn context(&self) -> RuleContext {
        self.context
    }

    /// 按优先级列出规则
    pub fn list(&self) -> Result<Vec<Rule>> {
        self.rules.get_rules(self.context)
    }

    /// 追加规则（最低优先级）
    #[instrument(skip(self, rule), fields(context = %self.context, rule = %rule.name))]
    pub fn add(&self, rule: Rule) -> Result<Vec<Rule>> {
        self.ensure_writable()?;
        self.validate(&rule)?;

        let mut rules = self.list()?;
        rules.push(rule);
        self.commit(rules)
    }

    /// 替换指定位置的规则
    #[instrument(skip(self, rule), fields(context = %self.context))]
    pub fn update(&self, index: usize, rule: Rule) -> Result<Vec<Rule>> {
        self.ensure_writable()?;
        self.validate(&rule)?;

        let mut rules = self.list()?;
        let slot = rules.get_mut(index).ok_or_else(|| self.not_found(index))?;
        *slot = rule;
        self.commit(rules)
    }

    /// 删除指定位置的规则，后续规则优先级依次前移
    #[instrument(skip(self), fields(context = %self.context))]
    pub fn delete(&self, index: usize) -> Result<Vec<Rule>> {
        self.ensure_writable()?;

        let mut rules = self.list()?;
        if index >= rules.len() {
            return Err(self.not_found(index));
        }
        rules.remove(index);
        self.commit(rules)
    }

    /// 重新排序，`order[i]` 为新位置 i 上的原规则下标
    #[instrument(skip(self), fields(context = %self.context))]
    pub fn reorder(&self, order: &[usize]) -> Result<Vec<Rule>> {
        self.ensure_writable()?;

        let rules = self.list()?;
        if order.len() != rules.len() {
            return Err(RuleError::InvalidOrder(format!(
                "expected {} indices, got {}",
                rules.len(),
                order.len()
            )));
        }

        let mut seen = vec![false; rules.len()];
        for &index in order {
            match seen.get_mut(index) {
                Some(flag) if !*flag => *flag = true,
                Some(_) => return Err(RuleError::InvalidOrder(format!("duplicate index {}", index))),
                None => return Err(RuleError::InvalidOrder(format!("index {} out of range", index))),
            }
        }

        let reordered = order.iter().map(|&i| rules[i].clone()).collect();
        self.commit(reordered)
    }

    /// 整体替换规则集
    #[instrument(skip(self, rules), fields(context = %self.context, count = rules.len()))]
    pub fn replace_all(&self, rules: Vec<Rule>) -> Result<Vec<Rule>> {
        self.ensure_writable()?;
        for rule in &rules {
            self.validate(rule)?;
        }
        self.commit(rules)
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.synchronizer.is_read_only(self.context)? {
            return Err(RuleError::ReadOnlyContext(self.context.to_string()));
        }
        Ok(())
    }

    /// 按上下文字段表校验规则
    fn validate(&self, rule: &Rule) -> Result<()> {
        if rule.field.trim().is_empty() {
            return Err(RuleError::MissingField { rule: rule.name.clone() });
        }
        if rule.operator.trim().is_empty() {
            return Err(RuleError::MissingOperator { rule: rule.name.clone() });
        }

        let field = vocabulary::lookup(self.context, &rule.field).ok_or_else(|| RuleError::UnknownField {
            field: rule.field.clone(),
            context: self.context.to_string(),
        })?;

        let operator: Operator = rule.operator.parse()?;
        if !field.allows(operator) {
            return Err(RuleError::OperatorNotAllowed {
                field: rule.field.clone(),
                operator: operator.to_string(),
            });
        }

        Ok(())
    }

    /// 保存并在需要时同步，返回保存后的规则
    fn commit(&self, rules: Vec<Rule>) -> Result<Vec<Rule>> {
        self.rules.save_rules(self.context, rules)?;
        let saved = self.list()?;

        if self.synchronizer.should_sync(self.context)? {
            self.synchronizer.sync(self.context, &saved)?;
        }

        info!(context = %self.context, count = saved.len(), "Rules updated");
        Ok(saved)
    }

    fn not_found(&self, index: usize) -> RuleError {
        RuleError::RuleNotFound {
            context: self.context.to_string(),
            index,
        }
    }
}
