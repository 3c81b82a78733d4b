//! 字段路径解析
//!
//! 按点号分隔的路径从场景记录中取值。路径途经数组时，剩余路径会作用于数组的
//! 每个元素并把结果展平，从而实现"至少一位表演者满足"的语义。
//! 数据缺失不是错误，统一返回 None。

use serde_json::Value;

use crate::measurements::{MeasurementComponent, Measurements};

/// 表演者数量（合成字段）
pub const PERFORMER_COUNT: &str = "performers.count";

const PERFORMERS: &str = "performers";
const MEASUREMENTS: &str = "measurements";

/// 字段解析器
pub struct FieldResolver;

impl FieldResolver {
    /// 解析字段路径
    ///
    /// 除通用路径外，支持以下合成路径：
    /// - `performers.count`：表演者数量
    /// - `performers.cup_size` / `performers.waist` / `performers.hip`：
    ///   从每位表演者的 measurements 字符串中解析出的分量
    pub fn resolve(record: &Value, path: &str) -> Option<Value> {
        if path == PERFORMER_COUNT {
            return Some(Value::from(Self::performer_count(record)));
        }

        if let Some(component) = Self::measurement_component(path) {
            return Self::resolve_measurements(record, component);
        }

        let segments: Vec<&str> = path.split('.').collect();
        Self::walk(record, &segments)
    }

    fn performer_count(record: &Value) -> usize {
        match record.get(PERFORMERS) {
            Some(Value::Array(performers)) => performers.len(),
            _ => 0,
        }
    }

    fn measurement_component(path: &str) -> Option<MeasurementComponent> {
        let key = path.strip_prefix("performers.")?;
        MeasurementComponent::from_key(key)
    }

    /// 逐个解析表演者的三围，收集非空分量
    fn resolve_measurements(record: &Value, component: MeasurementComponent) -> Option<Value> {
        let Some(Value::Array(performers)) = record.get(PERFORMERS) else {
            return None;
        };

        let values: Vec<Value> = performers
            .iter()
            .filter_map(|performer| performer.get(MEASUREMENTS)?.as_str())
            .filter_map(|raw| Measurements::parse(raw).component(component))
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(Value::Array(values))
        }
    }

    fn walk(record: &Value, segments: &[&str]) -> Option<Value> {
        let mut current = record;

        for (i, key) in segments.iter().enumerate() {
            match current {
                Value::Array(items) => return Some(Self::broadcast(items, &segments[i..])),
                Value::Object(map) => current = map.get(*key)?,
                _ => return None,
            }
        }

        match current {
            Value::Null => None,
            value => Some(value.clone()),
        }
    }

    /// 剩余路径作用于数组每个元素，展平并丢弃空值
    fn broadcast(items: &[Value], remaining: &[&str]) -> Value {
        let mut results = Vec::new();

        for item in items {
            match Self::walk(item, remaining) {
                Some(Value::Array(values)) => results.extend(values),
                Some(value) => results.push(value),
                None => {}
            }
        }

        Value::Array(results)
    }
}
