use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 服務 manifest：對應 YAML 檔案中的五個欄位
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceManifest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub endpoint: BTreeMap<String, String>,
}

/// `list` 回應中的一筆資料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceListEntry {
    pub service: String,
    #[serde(default)]
    pub instances: Vec<String>,
}
