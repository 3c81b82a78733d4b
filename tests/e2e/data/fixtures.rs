//! 测试数据 Fixtures
//!
//! 预定义的场景与规则集，用于快速创建测试场景。

use rule_engine::{Action, Operator, Rule};
use serde_json::{json, Value};

/// 外部目录中的场景
pub struct CatalogScenes;

impl CatalogScenes {
    /// 预告片
    pub fn trailer() -> Value {
        json!({
            "title": "Official Trailer",
            "date": "2024-02-01",
            "studio": {"name": "Blue Harbor"},
            "tags": [{"name": "Trailer"}],
            "performers": [
                {"performer": {"name": "Alice", "gender": "FEMALE"}}
            ]
        })
    }

    /// 指定表演者的单人场景
    pub fn solo(name: &str, cup_size: &str, waist: u32) -> Value {
        json!({
            "title": format!("{} Solo", name),
            "date": "2024-03-15",
            "studio": {"name": "Pier Studios"},
            "tags": [{"name": "Solo"}, {"name": "Indoor"}],
            "performers": [
                {"performer": {
                    "name": name,
                    "gender": "FEMALE",
                    "measurements": {"cup_size": cup_size, "waist": waist, "hip": 35}
                }}
            ]
        })
    }

    /// 多人场景，没有三围数据
    pub fn group() -> Value {
        json!({
            "title": "Harbor Party",
            "date": "2024-04-20",
            "studio": {"name": "Blue Harbor"},
            "tags": [{"name": "Outdoor"}],
            "performers": [
                {"performer": {"name": "Bob", "gender": "MALE"}},
                {"performer": {"name": "Carol", "gender": "FEMALE"}},
                {"performer": {"name": "Dana", "gender": "FEMALE"}}
            ]
        })
    }
}

/// 本地库中的场景
pub struct LibraryScenes;

impl LibraryScenes {
    pub fn with_measurements(title: &str, measurements: &str) -> Value {
        json!({
            "title": title,
            "date": "2023-11-02",
            "studio": {"name": "Pier Studios"},
            "tags": [{"name": "Indoor"}],
            "performers": [
                {"name": "Alice", "gender": "FEMALE", "measurements": measurements}
            ]
        })
    }

    /// 没有任何表演者与标签
    pub fn bare(title: &str) -> Value {
        json!({"title": title, "tags": [], "performers": []})
    }
}

/// 规则集
pub struct TestRules;

impl TestRules {
    /// 新增场景：排除预告片，收录单人 D 罩杯场景
    pub fn catalog_import() -> Vec<Rule> {
        vec![
            Rule::new("no trailers", "tags", Operator::Include, "trailer", Action::Reject),
            Rule::new("solo", "performers.count", Operator::Include, "1", Action::Accept),
            Rule::new(
                "d cups",
                "performers.performer.measurements.cup_size",
                Operator::Include,
                "D",
                Action::Accept,
            ),
        ]
    }

    /// 清理场景：删除没有标签的场景与腰围过大的场景
    pub fn library_cleanup() -> Vec<Rule> {
        vec![
            Rule::new("untagged", "tags", Operator::Exclude, "indoor, outdoor", Action::Reject),
            Rule::new("waist", "performers.waist", Operator::IsLargerThan, 30, Action::Reject),
        ]
    }
}
