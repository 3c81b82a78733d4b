//! 三围字符串解析
//!
//! 本地库中表演者的 measurements 是 "36DD-24-35" 或 "36-24-35" 形式的字符串，
//! 这里只提取罩杯、腰围、臀围，胸围数字丢弃。

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::warn;

static WITH_CUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)([A-Za-z]+)-([0-9]+)-([0-9]+)").expect("valid regex"));

static WITHOUT_CUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-([0-9]+)-([0-9]+)").expect("valid regex"));

/// 可从三围中解析出的分量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementComponent {
    CupSize,
    Waist,
    Hip,
}

impl MeasurementComponent {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "cup_size" => Some(Self::CupSize),
            "waist" => Some(Self::Waist),
            "hip" => Some(Self::Hip),
            _ => None,
        }
    }
}

/// 解析后的三围
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Measurements {
    pub cup_size: Option<String>,
    pub waist: Option<u32>,
    pub hip: Option<u32>,
}

impl Measurements {
    /// 解析三围字符串，无法识别时所有分量为 None（记录告警，不报错）
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        if let Some(caps) = WITH_CUP.captures(trimmed) {
            if let (Ok(waist), Ok(hip)) = (caps[3].parse(), caps[4].parse()) {
                return Self {
                    cup_size: Some(caps[2].to_uppercase()),
                    waist: Some(waist),
                    hip: Some(hip),
                };
            }
        } else if let Some(caps) = WITHOUT_CUP.captures(trimmed) {
            if let (Ok(waist), Ok(hip)) = (caps[2].parse(), caps[3].parse()) {
                return Self {
                    cup_size: None,
                    waist: Some(waist),
                    hip: Some(hip),
                };
            }
        }

        warn!(measurements = %raw, "Could not parse measurements");
        Self::default()
    }

    /// 取出指定分量，转换为记录值
    pub fn component(&self, component: MeasurementComponent) -> Option<Value> {
        match component {
            MeasurementComponent::CupSize => self.cup_size.clone().map(Value::String),
            MeasurementComponent::Waist => self.waist.map(Value::from),
            MeasurementComponent::Hip => self.hip.map(Value::from),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cup_size.is_none() && self.waist.is_none() && self.hip.is_none()
    }
}
