use crate::domain::model::ServiceManifest;
use crate::domain::ports::{ApiRequest, Method, RequestBody};

const SERVICES: &str = "services";
const DOC: &str = "doc";

pub fn create_service(manifest: &ServiceManifest) -> ApiRequest {
    ApiRequest {
        method: Method::Post,
        segments: vec![SERVICES.to_string()],
        body: RequestBody::Form(manifest_form(manifest)),
    }
}

/// Updates are keyed by the `id` form field, not by the path.
pub fn update_service(manifest: &ServiceManifest) -> ApiRequest {
    ApiRequest {
        method: Method::Put,
        segments: vec![SERVICES.to_string()],
        body: RequestBody::Form(manifest_form(manifest)),
    }
}

pub fn remove_service(name: &str) -> ApiRequest {
    ApiRequest {
        method: Method::Delete,
        segments: vec![SERVICES.to_string(), name.to_string()],
        body: RequestBody::Empty,
    }
}

pub fn list_services() -> ApiRequest {
    ApiRequest {
        method: Method::Get,
        segments: vec![SERVICES.to_string()],
        body: RequestBody::Empty,
    }
}

pub fn get_doc(name: &str) -> ApiRequest {
    ApiRequest {
        method: Method::Get,
        segments: vec![SERVICES.to_string(), name.to_string(), DOC.to_string()],
        body: RequestBody::Empty,
    }
}

pub fn add_doc(name: &str, doc: Vec<u8>) -> ApiRequest {
    ApiRequest {
        method: Method::Put,
        segments: vec![SERVICES.to_string(), name.to_string(), DOC.to_string()],
        body: RequestBody::Raw(doc),
    }
}

/// 將 manifest 編碼為表單欄位；endpoint 以 `endpoint[<env>]` 子鍵展開
pub fn manifest_form(manifest: &ServiceManifest) -> Vec<(String, String)> {
    let mut fields = vec![("id".to_string(), manifest.id.clone())];

    let optional = [
        ("username", &manifest.username),
        ("password", &manifest.password),
        ("team", &manifest.team),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            fields.push((key.to_string(), value.clone()));
        }
    }

    for (env, url) in &manifest.endpoint {
        fields.push((format!("endpoint[{}]", env), url.clone()));
    }

    fields
}
