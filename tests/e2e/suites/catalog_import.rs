//! 外部目录导入测试套件
//!
//! 对一批外部场景做新增决策，验证第一条命中规则与默认拒绝。

use crate::data::*;

use rule_engine::{Action, RuleContext, SceneRuleService};

#[cfg(test)]
mod import_tests {
    use super::*;

    fn service() -> SceneRuleService {
        let service = SceneRuleService::in_memory();
        service
            .editor(RuleContext::AddScenes)
            .replace_all(TestRules::catalog_import())
            .unwrap();
        service
    }

    #[test]
    fn test_trailer_is_rejected_by_tag() {
        let decision = service().evaluate(RuleContext::AddScenes, &CatalogScenes::trailer());

        assert_eq!(decision.action, Action::Reject);
        assert_eq!(decision.reason, "Rejected: Tags include Trailer");
        assert_eq!(decision.matched_rule.unwrap().position, 0);
    }

    #[test]
    fn test_solo_scene_is_accepted() {
        let decision = service().evaluate(RuleContext::AddScenes, &CatalogScenes::solo("Eve", "DD", 24));

        assert!(decision.is_accepted());
        assert_eq!(decision.reason, "Accepted: Performer Count include 1");
    }

    #[test]
    fn test_unmatched_scene_defaults_to_reject() {
        let decision = service().evaluate(RuleContext::AddScenes, &CatalogScenes::group());

        assert_eq!(decision.action, Action::Reject);
        assert!(decision.is_default());
        assert_eq!(decision.reason, "No rules matched - default reject");
    }

    #[test]
    fn test_batch_import() {
        let service = service();
        let scenes = vec![
            CatalogScenes::trailer(),
            CatalogScenes::solo("Eve", "DD", 24),
            CatalogScenes::solo("Fay", "B", 23),
            CatalogScenes::group(),
        ];

        let accepted: Vec<bool> = scenes
            .iter()
            .map(|scene| service.evaluate(RuleContext::AddScenes, scene).is_accepted())
            .collect();

        assert_eq!(accepted, vec![false, true, true, false]);
    }
}
