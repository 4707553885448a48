//! Document tags.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/partner/documents/{id}/tags/` | [`Tags::list`] |
//! | PUT    | `/partner/documents/{id}/tags/` | [`Tags::add`] |
//! | POST   | `/partner/documents/{id}/tags/` | [`Tags::add_many`] |
//! | PUT    | `/partner/documents/{id}/` | [`Tags::replace`] |
//! | DELETE | `/partner/documents/{id}/tags/{tag_id}/` | [`Tags::delete`] |
//! | DELETE | `/partner/documents/{id}/tags/` | [`Tags::delete_all`] |
//! | GET    | `/partner/tags/` | [`Tags::list_all`] |

use serde_json::{Map, Value};

use crate::error::VeryfiError;
use crate::kinds::{Document, Documents};
use crate::resource::DocumentKind;
use crate::transport::Transport;

const ACCOUNT_TAGS_PATH: &str = "/partner/tags/";

/// Client for tags on documents.
#[derive(Debug, Clone)]
pub struct Tags {
    transport: Transport,
}

impl Tags {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn document_tags_path(document_id: u64) -> String {
        format!("{}{document_id}/tags/", Document::PATH)
    }

    /// Tags on one document.
    pub async fn list(&self, document_id: u64) -> Result<String, VeryfiError> {
        self.transport
            .get(&Self::document_tags_path(document_id), &Map::new())
            .await
    }

    /// Every tag defined on the account.
    pub async fn list_all(&self) -> Result<String, VeryfiError> {
        self.transport.get(ACCOUNT_TAGS_PATH, &Map::new()).await
    }

    /// Attach a single tag by name.
    pub async fn add(&self, document_id: u64, name: &str) -> Result<String, VeryfiError> {
        let name = non_blank(name)?;
        let mut body = Map::new();
        body.insert("name".into(), Value::String(name.to_string()));
        self.transport
            .put_json(&Self::document_tags_path(document_id), &body)
            .await
    }

    /// Attach several tags, keeping the ones already present.
    pub async fn add_many(&self, document_id: u64, names: &[String]) -> Result<String, VeryfiError> {
        let body = tags_body(names)?;
        self.transport
            .post_json(&Self::document_tags_path(document_id), &body)
            .await
    }

    /// Replace the document's tags with `names`.
    pub async fn replace(&self, document_id: u64, names: &[String]) -> Result<String, VeryfiError> {
        let body = tags_body(names)?;
        self.transport
            .put_json(&Documents::item_path(document_id), &body)
            .await
    }

    pub async fn delete(&self, document_id: u64, tag_id: u64) -> Result<String, VeryfiError> {
        let path = format!("{}{tag_id}/", Self::document_tags_path(document_id));
        self.transport.delete(&path).await
    }

    pub async fn delete_all(&self, document_id: u64) -> Result<String, VeryfiError> {
        self.transport
            .delete(&Self::document_tags_path(document_id))
            .await
    }
}

fn non_blank(name: &str) -> Result<&str, VeryfiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(VeryfiError::InvalidRequest("tag name must not be blank".into()));
    }
    Ok(trimmed)
}

fn tags_body(names: &[String]) -> Result<Map<String, Value>, VeryfiError> {
    let tags = names
        .iter()
        .map(|n| non_blank(n).map(|n| Value::String(n.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    if tags.is_empty() {
        return Err(VeryfiError::InvalidRequest("at least one tag is required".into()));
    }
    let mut body = Map::new();
    body.insert("tags".into(), Value::Array(tags));
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_body_trims_names() {
        let body = tags_body(&[" travel ".into(), "q3".into()]).unwrap();
        assert_eq!(Value::Object(body), json!({"tags": ["travel", "q3"]}));
    }

    #[test]
    fn tags_body_rejects_empty_and_blank() {
        assert!(tags_body(&[]).is_err());
        assert!(tags_body(&["ok".into(), " ".into()]).is_err());
    }

    #[test]
    fn document_tags_path_is_under_documents() {
        assert_eq!(Tags::document_tags_path(3), "/partner/documents/3/tags/");
    }
}
