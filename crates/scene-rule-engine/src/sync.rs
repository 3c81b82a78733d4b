//! 规则同步
//!
//! 在两个上下文之间复制规则集。同步是破坏性的：目标上下文的规则先被全部删除，
//! 再按源顺序写入转换后的规则。开启同步前两边规则必须一致。

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{Result, RuleError};
use crate::mapping::FieldMapping;
use crate::models::{Action, Rule, RuleContext, SyncCheck, SyncDirection, SyncSettings};
use crate::store::{RuleRepository, SyncSettingsRepository};

/// 规则同步器
#[derive(Clone)]
pub struct RuleSynchronizer {
    rules: Arc<dyn RuleRepository>,
    settings: Arc<dyn SyncSettingsRepository>,
}

impl RuleSynchronizer {
    pub fn new(rules: Arc<dyn RuleRepository>, settings: Arc<dyn SyncSettingsRepository>) -> Self {
        Self { rules, settings }
    }

    /// 当前同步设置
    pub fn settings(&self) -> Result<SyncSettings> {
        self.settings.get_sync_settings()
    }

    /// 检查两个上下文的规则是否一致
    pub fn are_in_sync(&self) -> Result<SyncCheck> {
        let add = self.rules.get_rules(RuleContext::AddScenes)?;
        let clean = self.rules.get_rules(RuleContext::CleanScenes)?;
        Ok(check_rule_sets(&add, &clean))
    }

    /// 更新同步设置
    ///
    /// 只在从关闭切换到开启时检查一致性，已开启时修改方向不再检查。
    #[instrument(skip(self))]
    pub fn update_settings(&self, enabled: bool, direction: SyncDirection) -> Result<SyncSettings> {
        let current = self.settings()?;

        if enabled && !current.enabled {
            let check = self.are_in_sync()?;
            if !check.in_sync {
                warn!(reason = %check.reason, "Refusing to enable rule synchronization");
                return Err(RuleError::SyncMismatch(check.reason));
            }
        }

        let updated = self.settings.set_sync_settings(enabled, direction)?;
        info!(enabled, direction = %direction, "Rule synchronization settings updated");
        Ok(updated)
    }

    /// 源上下文的改动是否需要同步到另一侧
    pub fn should_sync(&self, source: RuleContext) -> Result<bool> {
        let settings = self.settings()?;
        Ok(settings.enabled
            && settings
                .direction
                .source()
                .map_or(true, |s| s == source))
    }

    /// 上下文是否只读（单向同步的目标侧）
    pub fn is_read_only(&self, context: RuleContext) -> Result<bool> {
        let settings = self.settings()?;
        Ok(settings.enabled
            && settings
                .direction
                .source()
                .is_some_and(|s| s.other() == context))
    }

    /// 将源上下文的规则同步到另一个上下文，返回写入的规则数
    #[instrument(skip(self, rules), fields(count = rules.len()))]
    pub fn sync(&self, source: RuleContext, rules: &[Rule]) -> Result<usize> {
        let target = source.other();

        let converted: Vec<Rule> = rules
            .iter()
            .map(|rule| FieldMapping::convert(rule, source, target))
            .collect();
        let count = converted.len();

        self.rules.delete_rules_for_context(target)?;
        self.rules.save_rules(target, converted)?;

        info!(source = %source, target = %target, count, "Rules synchronized");
        Ok(count)
    }
}

/// 按位置比较两个规则集，新增侧字段先映射到清理侧
pub fn check_rule_sets(add: &[Rule], clean: &[Rule]) -> SyncCheck {
    if add.is_empty() && clean.is_empty() {
        return SyncCheck::in_sync("Both contexts have no rules");
    }

    if add.len() != clean.len() {
        return SyncCheck::mismatch(format!(
            "Rule count mismatch: {} add rules vs {} clean rules",
            add.len(),
            clean.len()
        ));
    }

    for (i, (a, c)) in add.iter().zip(clean).enumerate() {
        let converted = FieldMapping::convert(a, RuleContext::AddScenes, RuleContext::CleanScenes);

        let diff = if converted.field != c.field {
            Some(("field", converted.field.clone(), c.field.clone()))
        } else if converted.operator != c.operator {
            Some(("operator", converted.operator.clone(), c.operator.clone()))
        } else if converted.value != c.value {
            Some(("value", value_text(converted.value.as_ref()), value_text(c.value.as_ref())))
        } else if converted.action != c.action {
            Some(("action", action_text(converted.action), action_text(c.action)))
        } else {
            None
        };

        if let Some((what, left, right)) = diff {
            return SyncCheck::mismatch(format!(
                "Rule {} mismatch: {} differs (add: {} vs clean: {})",
                i + 1,
                what,
                left,
                right
            ));
        }
    }

    SyncCheck::in_sync("All rules are in sync")
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "none".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn action_text(action: Option<Action>) -> String {
    action.map_or_else(|| "none".to_string(), |a| a.to_string())
}
