use crate::domain::model::ServiceManifest;
use crate::utils::error::{CraneError, Result};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Source token meaning "read the manifest from standard input".
pub const STDIN_SOURCE: &str = "-";

pub const TEMPLATE_FILE: &str = "manifest.yaml";

const PLACEHOLDER_LEN: usize = 16;

/// 從檔案或標準輸入載入 manifest
pub fn load<R: Read + ?Sized>(source: &str, stdin: &mut R) -> Result<ServiceManifest> {
    let raw = if source == STDIN_SOURCE {
        tracing::debug!("Reading manifest from standard input");
        let mut buf = Vec::new();
        stdin
            .read_to_end(&mut buf)
            .map_err(|source| CraneError::ReadError {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        buf
    } else {
        tracing::debug!("Reading manifest from {}", source);
        std::fs::read(source).map_err(|e| CraneError::ReadError {
            path: PathBuf::from(source),
            source: e,
        })?
    };

    parse(&raw)
}

/// 解析 YAML 內容；空白輸入視為空的 manifest
pub fn parse(raw: &[u8]) -> Result<ServiceManifest> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(ServiceManifest::default());
    }
    Ok(serde_yaml::from_slice(raw)?)
}

pub fn template() -> ServiceManifest {
    let mut endpoint = BTreeMap::new();
    endpoint.insert(
        "production".to_string(),
        "production-endpoint.com".to_string(),
    );

    ServiceManifest {
        id: "servicename".to_string(),
        username: Some("username_to_auth".to_string()),
        password: Some(placeholder_password()),
        team: Some("team_responsible_to_provide_service".to_string()),
        endpoint,
    }
}

// Letters only, so the value is always emitted as a plain YAML scalar.
fn placeholder_password() -> String {
    uuid::Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(PLACEHOLDER_LEN)
        .map(|b| (b'a' + b % 26) as char)
        .collect()
}

/// 產生 manifest 範本；目標檔案已存在時不覆寫
pub fn write_template(path: &Path) -> Result<()> {
    let content = serde_yaml::to_string(&template())?;
    let content = content.trim_end_matches('\n');

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => CraneError::TemplateExistsError {
                path: path.to_path_buf(),
            },
            _ => CraneError::WriteError {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

    file.write_all(content.as_bytes())
        .map_err(|e| CraneError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::info!("Manifest template written to {}", path.display());
    Ok(())
}
