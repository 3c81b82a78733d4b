//! 本地库清理测试套件
//!
//! 清理上下文默认保留，只有明确命中删除规则的场景被移除。

use crate::data::*;

use rule_engine::{Action, RuleContext, SceneRuleService};

#[cfg(test)]
mod cleanup_tests {
    use super::*;

    fn service() -> SceneRuleService {
        let service = SceneRuleService::in_memory();
        service
            .editor(RuleContext::CleanScenes)
            .replace_all(TestRules::library_cleanup())
            .unwrap();
        service
    }

    #[test]
    fn test_ordinary_scene_is_kept() {
        let scene = LibraryScenes::with_measurements("Quiet Evening", "36DD-24-35");
        let decision = service().evaluate(RuleContext::CleanScenes, &scene);

        assert_eq!(decision.action, Action::Accept);
        assert_eq!(decision.reason, "No rules matched - default keep");
    }

    #[test]
    fn test_parsed_waist_triggers_removal() {
        let scene = LibraryScenes::with_measurements("Late Night", "40DD-32-40");
        let decision = service().evaluate(RuleContext::CleanScenes, &scene);

        assert_eq!(decision.action, Action::Reject);
        assert_eq!(decision.reason, "Rejected: Waist Size is_larger_than 32");
    }

    #[test]
    fn test_untagged_scene_is_removed() {
        let decision = service().evaluate(RuleContext::CleanScenes, &LibraryScenes::bare("Untitled Upload"));

        assert_eq!(decision.action, Action::Reject);
        assert_eq!(
            decision.reason,
            "Rejected: Tags exclude does not contain indoor, outdoor"
        );
    }

    #[test]
    fn test_unparseable_measurements_keep_scene() {
        let scene = LibraryScenes::with_measurements("Mystery", "unknown");
        let decision = service().evaluate(RuleContext::CleanScenes, &scene);

        assert!(decision.is_accepted());
        assert!(decision.is_default());
    }
}
