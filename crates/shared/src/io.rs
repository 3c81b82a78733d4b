//! JSON 文件读取工具

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Result, SceneError};

/// 读取并反序列化 JSON 文件
pub fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}
