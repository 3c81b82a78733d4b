//! 上下文之间的字段映射
//!
//! 新增场景与清理场景的记录结构不同：外部目录的表演者属性嵌套在
//! `performer` 下，三围是结构化对象；本地库直接挂在表演者上。
//! 映射表是双向的，未登记的字段原样透传。

use crate::models::{Rule, RuleContext};

/// 新增场景字段 -> 清理场景字段
const ADD_TO_CLEAN: &[(&str, &str)] = &[
    ("performers.performer.name", "performers.name"),
    ("performers.performer.ethnicity", "performers.ethnicity"),
    ("performers.performer.gender", "performers.gender"),
    ("performers.performer.measurements.cup_size", "performers.cup_size"),
    ("performers.performer.measurements.waist", "performers.waist"),
    ("performers.performer.measurements.hip", "performers.hip"),
    ("studio.name", "studio.name"),
    ("title", "title"),
    ("date", "date"),
    ("tags", "tags"),
    ("performers.count", "performers.count"),
];

/// 字段映射
pub struct FieldMapping;

impl FieldMapping {
    /// 全部映射项（新增字段, 清理字段）
    pub fn entries() -> &'static [(&'static str, &'static str)] {
        ADD_TO_CLEAN
    }

    /// 将字段路径从一个上下文映射到另一个上下文
    pub fn map_field(field: &str, from: RuleContext, to: RuleContext) -> &str {
        match (from, to) {
            (RuleContext::AddScenes, RuleContext::CleanScenes) => ADD_TO_CLEAN
                .iter()
                .find(|(add, _)| *add == field)
                .map(|(_, clean)| *clean)
                .unwrap_or(field),
            (RuleContext::CleanScenes, RuleContext::AddScenes) => ADD_TO_CLEAN
                .iter()
                .find(|(_, clean)| *clean == field)
                .map(|(add, _)| *add)
                .unwrap_or(field),
            _ => field,
        }
    }

    /// 将规则转换到目标上下文：只改写字段，其余原样保留
    pub fn convert(rule: &Rule, from: RuleContext, to: RuleContext) -> Rule {
        Rule {
            field: Self::map_field(&rule.field, from, to).to_string(),
            ..rule.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;
    use crate::operators::Operator;
    use crate::vocabulary;

    #[test]
    fn test_map_add_to_clean() {
        assert_eq!(
            FieldMapping::map_field(
                "performers.performer.measurements.cup_size",
                RuleContext::AddScenes,
                RuleContext::CleanScenes
            ),
            "performers.cup_size"
        );
        assert_eq!(
            FieldMapping::map_field("title", RuleContext::AddScenes, RuleContext::CleanScenes),
            "title"
        );
    }

    #[test]
    fn test_map_clean_to_add() {
        assert_eq!(
            FieldMapping::map_field("performers.name", RuleContext::CleanScenes, RuleContext::AddScenes),
            "performers.performer.name"
        );
    }

    #[test]
    fn test_unmapped_field_passes_through() {
        assert_eq!(
            FieldMapping::map_field("studio.parent.name", RuleContext::AddScenes, RuleContext::CleanScenes),
            "studio.parent.name"
        );
        assert_eq!(
            FieldMapping::map_field("performers.name", RuleContext::CleanScenes, RuleContext::CleanScenes),
            "performers.name"
        );
    }

    #[test]
    fn test_mapping_covers_both_vocabularies() {
        for def in vocabulary::fields(RuleContext::AddScenes) {
            let mapped = FieldMapping::map_field(def.path, RuleContext::AddScenes, RuleContext::CleanScenes);
            assert!(
                vocabulary::lookup(RuleContext::CleanScenes, mapped).is_some(),
                "{} maps to unknown clean field {}",
                def.path,
                mapped
            );
        }

        for def in vocabulary::fields(RuleContext::CleanScenes) {
            let mapped = FieldMapping::map_field(def.path, RuleContext::CleanScenes, RuleContext::AddScenes);
            assert!(vocabulary::lookup(RuleContext::AddScenes, mapped).is_some());
        }
    }

    #[test]
    fn test_mapping_round_trip() {
        for (add, _) in FieldMapping::entries() {
            let clean = FieldMapping::map_field(add, RuleContext::AddScenes, RuleContext::CleanScenes);
            let back = FieldMapping::map_field(clean, RuleContext::CleanScenes, RuleContext::AddScenes);
            assert_eq!(back, *add);
        }
    }

    #[test]
    fn test_convert_rule_keeps_everything_but_field() {
        let rule = Rule::new("cups", "performers.performer.measurements.cup_size", Operator::Include, "C, D", Action::Reject);
        let converted = FieldMapping::convert(&rule, RuleContext::AddScenes, RuleContext::CleanScenes);

        assert_eq!(converted.field, "performers.cup_size");
        assert_eq!(converted.name, rule.name);
        assert_eq!(converted.operator, rule.operator);
        assert_eq!(converted.value, rule.value);
        assert_eq!(converted.action, rule.action);
    }
}
