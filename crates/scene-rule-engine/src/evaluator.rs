//! 条件评估器
//!
//! 实现 include / exclude / is_larger_than / is_smaller_than 的评估逻辑。
//! 所有解析值先规整为列表，标量与多值字段走同一条路径。

use serde_json::Value;

use crate::operators::Operator;

/// 规则比较值
///
/// 非列表的比较值按逗号拆分，逐项去空白并转小写。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectedValue {
    pub literals: Vec<String>,
    /// 原始比较值的展示文本，用于 exclude 的决策说明
    pub display: String,
}

impl ExpectedValue {
    pub fn from_rule_value(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        let literals = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items
                .iter()
                .map(|item| scalar_text(item).to_lowercase().trim().to_string())
                .collect(),
            other => scalar_text(other)
                .to_lowercase()
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
        };

        let display = match value {
            Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
            other => scalar_text(other),
        };

        Self { literals, display }
    }
}

/// 条件评估结果
///
/// `sample` 是用于审计展示的代表值，不参与决策。
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionOutcome {
    pub matched: bool,
    pub sample: Option<Value>,
}

impl ConditionOutcome {
    fn matched(sample: Value) -> Self {
        Self {
            matched: true,
            sample: Some(sample),
        }
    }

    fn not_matched() -> Self {
        Self {
            matched: false,
            sample: None,
        }
    }
}

/// 条件评估器
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// 评估条件
    ///
    /// # Arguments
    /// * `resolved` - 从场景中解析出的字段值，None 表示数据缺失
    /// * `operator` - 操作符
    /// * `expected` - 规则中定义的比较值
    /// * `field` - 字段路径，决定是否按标签方式比较
    pub fn evaluate(
        resolved: Option<&Value>,
        operator: Operator,
        expected: &ExpectedValue,
        field: &str,
    ) -> ConditionOutcome {
        // 数据缺失：include 永不匹配，exclude 永远匹配（两者并非互补）
        let Some(resolved) = resolved else {
            return match operator {
                Operator::Exclude => ConditionOutcome {
                    matched: true,
                    sample: None,
                },
                _ => ConditionOutcome::not_matched(),
            };
        };

        let elements: Vec<&Value> = match resolved {
            Value::Array(items) => items.iter().collect(),
            single => vec![single],
        };

        let tag_like = is_tag_field(field);

        match operator {
            Operator::Include => Self::include(&elements, &expected.literals, tag_like),
            Operator::Exclude => Self::exclude(&elements, expected, tag_like),
            Operator::IsLargerThan => Self::compare(&elements, &expected.literals, |a, b| a > b),
            Operator::IsSmallerThan => Self::compare(&elements, &expected.literals, |a, b| a < b),
        }
    }

    /// 任一元素匹配任一比较值
    fn include(elements: &[&Value], literals: &[String], tag_like: bool) -> ConditionOutcome {
        for element in elements {
            let text = element_text(element, tag_like);

            let hit = literals.iter().any(|literal| {
                if tag_like {
                    *literal == text
                } else {
                    is_cup_size_match(&text, literal) || text.contains(literal.as_str())
                }
            });

            if hit {
                return ConditionOutcome::matched((*element).clone());
            }
        }

        ConditionOutcome::not_matched()
    }

    /// 没有任何元素匹配任何比较值
    fn exclude(elements: &[&Value], expected: &ExpectedValue, tag_like: bool) -> ConditionOutcome {
        for element in elements {
            let text = element_text(element, tag_like);

            let found = expected.literals.iter().any(|literal| {
                if tag_like {
                    *literal == text
                } else {
                    text.contains(literal.as_str())
                }
            });

            if found {
                return ConditionOutcome::not_matched();
            }
        }

        ConditionOutcome::matched(Value::String(format!(
            "does not contain {}",
            expected.display
        )))
    }

    /// 数值比较：只取第一个元素与第一个比较值
    fn compare<F>(elements: &[&Value], literals: &[String], cmp: F) -> ConditionOutcome
    where
        F: Fn(f64, f64) -> bool,
    {
        let (Some(first), Some(literal)) = (elements.first(), literals.first()) else {
            return ConditionOutcome::not_matched();
        };

        let (Some(actual), Ok(threshold)) = (as_f64(first), literal.parse::<f64>()) else {
            return ConditionOutcome::not_matched();
        };

        if cmp(actual, threshold) {
            ConditionOutcome::matched((*first).clone())
        } else {
            ConditionOutcome::not_matched()
        }
    }
}

/// 标签类字段按名称精确比较
fn is_tag_field(field: &str) -> bool {
    field.contains("tags")
}

/// 罩杯模糊匹配：单字母比较值匹配以该字母开头的纯字母罩杯（d 匹配 d、dd、ddd）
fn is_cup_size_match(scene_cup: &str, rule_cup: &str) -> bool {
    let mut chars = rule_cup.chars();
    let (Some(letter), None) = (chars.next(), chars.next()) else {
        return false;
    };

    letter.is_alphabetic()
        && !scene_cup.is_empty()
        && scene_cup.chars().all(char::is_alphabetic)
        && scene_cup
            .to_lowercase()
            .starts_with(&letter.to_lowercase().to_string())
}

/// 元素的小写比较文本；标签类字段优先使用对象的 name
fn element_text(element: &Value, tag_like: bool) -> String {
    if tag_like {
        if let Some(name) = element.get("name") {
            return scalar_text(name).to_lowercase();
        }
    }
    scalar_text(element).to_lowercase()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "none".to_string(),
        other => other.to_string(),
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
