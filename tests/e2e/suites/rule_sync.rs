//! 规则同步测试套件
//!
//! 验证同步后两个上下文对同一位表演者给出一致的决策。

use crate::data::*;

use rule_engine::{RuleContext, RuleError, RuleRepository, SceneRuleService, SyncDirection};

#[cfg(test)]
mod sync_tests {
    use super::*;

    #[test]
    fn test_synced_rules_agree_across_schemas() {
        let service = SceneRuleService::in_memory();
        service
            .editor(RuleContext::AddScenes)
            .replace_all(TestRules::catalog_import())
            .unwrap();

        assert_eq!(service.synchronize(RuleContext::AddScenes).unwrap(), 3);
        assert!(service.check_sync().unwrap().in_sync);

        let add = service.evaluate(RuleContext::AddScenes, &CatalogScenes::solo("Eve", "DD", 24));
        let clean = service.evaluate(
            RuleContext::CleanScenes,
            &LibraryScenes::with_measurements("Eve Solo", "34DD-24-35"),
        );

        assert_eq!(add.action, clean.action);
        assert_eq!(add.reason, clean.reason);
    }

    #[test]
    fn test_enable_sync_requires_equal_rule_sets() {
        let service = SceneRuleService::in_memory();
        service
            .editor(RuleContext::CleanScenes)
            .replace_all(TestRules::library_cleanup())
            .unwrap();

        let err = service
            .update_sync_settings(true, SyncDirection::CleanToAdd)
            .unwrap_err();
        assert!(matches!(err, RuleError::SyncMismatch(_)));
        assert!(err.to_string().contains("Rule count mismatch: 0 add rules vs 2 clean rules"));

        service.synchronize(RuleContext::CleanScenes).unwrap();
        let settings = service
            .update_sync_settings(true, SyncDirection::CleanToAdd)
            .unwrap();
        assert!(settings.enabled);

        // 新增上下文成为只读
        let err = service
            .editor(RuleContext::AddScenes)
            .replace_all(TestRules::catalog_import())
            .unwrap_err();
        assert!(matches!(err, RuleError::ReadOnlyContext(_)));
    }

    #[test]
    fn test_bidirectional_edits_flow_both_ways() {
        let service = SceneRuleService::in_memory();
        service
            .update_sync_settings(true, SyncDirection::Bidirectional)
            .unwrap();

        service
            .editor(RuleContext::CleanScenes)
            .replace_all(TestRules::library_cleanup())
            .unwrap();
        assert!(service.check_sync().unwrap().in_sync);

        service.editor(RuleContext::AddScenes).delete(0).unwrap();
        let clean = service.rules().get_rules(RuleContext::CleanScenes).unwrap();
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].field, "performers.waist");
    }
}
