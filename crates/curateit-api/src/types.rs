//! Wire types for the CurateIt API.
//!
//! Field names mirror the backend's JSON exactly (a mix of snake_case and
//! camelCase), so every divergence is an explicit `#[serde(rename)]`.

use serde::{Deserialize, Serialize};

/// Successful login response: `POST /api/auth/local`.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub jwt: String,
    pub user: AuthUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// An authenticated CurateIt session: bearer token plus user identity.
///
/// The token is opaque; no validation is performed on its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Bearer token for subsequent API calls.
    pub jwt: String,
    /// Numeric user id, used as the gem author.
    pub user_id: i64,
    /// Display name, used to personalize assistant replies.
    pub username: String,
}

/// One user collection: `GET /api/get-user-collections`.
#[derive(Debug, Deserialize)]
pub(crate) struct Collection {
    pub id: i64,
}

/// Input for creating a gem from a captured link.
#[derive(Debug, Clone)]
pub struct NewGem {
    /// Page title (`og:title`), if present.
    pub title: Option<String>,
    /// Page description (`og:description`), if present.
    pub description: Option<String>,
    /// The saved URL itself.
    pub url: String,
    /// Cover image URL (`og:image`), if present.
    pub cover: Option<String>,
    /// Authoring user id from the active session.
    pub author: i64,
    /// Target collection id, if one was resolved.
    pub collection_id: Option<i64>,
}

/// Request body for `POST /api/gems?populate=tags`.
#[derive(Debug, Serialize)]
pub(crate) struct GemPayload {
    pub data: GemData,
}

#[derive(Debug, Serialize)]
pub(crate) struct GemData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub expander: Vec<serde_json::Value>,
    pub media_type: String,
    pub author: i64,
    pub url: String,
    pub media: GemMedia,
    #[serde(rename = "metaData")]
    pub meta_data: GemMetaData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_gems: Option<i64>,
    pub remarks: String,
    pub tags: Vec<serde_json::Value>,
    pub is_favourite: bool,
    #[serde(rename = "showThumbnail")]
    pub show_thumbnail: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct GemMedia {
    pub covers: Vec<Option<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GemMetaData {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub icon: String,
    pub url: String,
    pub covers: Vec<Option<String>>,
    #[serde(rename = "isYoutube")]
    pub is_youtube: bool,
}

impl From<&NewGem> for GemPayload {
    fn from(gem: &NewGem) -> Self {
        Self {
            data: GemData {
                title: gem.title.clone(),
                description: gem.description.clone(),
                expander: Vec::new(),
                media_type: "Link".to_string(),
                author: gem.author,
                url: gem.url.clone(),
                media: GemMedia {
                    covers: vec![gem.cover.clone()],
                },
                meta_data: GemMetaData {
                    kind: "Link".to_string(),
                    title: gem.title.clone(),
                    icon: String::new(),
                    url: gem.url.clone(),
                    covers: vec![gem.cover.clone()],
                    is_youtube: false,
                },
                collection_gems: gem.collection_id,
                remarks: String::new(),
                tags: Vec::new(),
                is_favourite: false,
                show_thumbnail: true,
            },
        }
    }
}

/// Response for `GET /api/filter-search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    /// Total number of matching gems.
    #[serde(rename = "totalCount", default)]
    pub total_count: u64,
    /// Result page; the first entry is what the bot reports.
    #[serde(rename = "finalRes", default)]
    pub final_res: Vec<GemHit>,
}

/// One search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct GemHit {
    /// Gem title.
    #[serde(default)]
    pub title: String,
    /// Gem URL.
    #[serde(default)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_gem() -> NewGem {
        NewGem {
            title: Some("Example".to_string()),
            description: Some("A page".to_string()),
            url: "https://example.com/post".to_string(),
            cover: Some("https://example.com/img.png".to_string()),
            author: 7,
            collection_id: Some(42),
        }
    }

    #[test]
    fn gem_payload_matches_wire_shape() {
        let payload = GemPayload::from(&sample_gem());
        let json = serde_json::to_value(&payload).unwrap();

        let data = &json["data"];
        assert_eq!(data["title"], "Example");
        assert_eq!(data["description"], "A page");
        assert_eq!(data["media_type"], "Link");
        assert_eq!(data["author"], 7);
        assert_eq!(data["url"], "https://example.com/post");
        assert_eq!(data["media"]["covers"][0], "https://example.com/img.png");
        assert_eq!(data["metaData"]["type"], "Link");
        assert_eq!(data["metaData"]["isYoutube"], false);
        assert_eq!(data["collection_gems"], 42);
        assert_eq!(data["is_favourite"], false);
        assert_eq!(data["showThumbnail"], true);
        assert_eq!(data["expander"], serde_json::json!([]));
        assert_eq!(data["tags"], serde_json::json!([]));
        assert_eq!(data["remarks"], "");
    }

    #[test]
    fn gem_payload_omits_absent_metadata() {
        let gem = NewGem {
            title: None,
            description: None,
            cover: None,
            collection_id: None,
            ..sample_gem()
        };
        let json = serde_json::to_value(GemPayload::from(&gem)).unwrap();

        let data = json["data"].as_object().unwrap();
        assert!(!data.contains_key("title"));
        assert!(!data.contains_key("description"));
        assert!(!data.contains_key("collection_gems"));
        // A missing cover still produces a one-element covers array.
        assert_eq!(data["media"]["covers"], serde_json::json!([null]));
    }

    #[test]
    fn search_results_deserialize() {
        let json = r#"{"totalCount": 1, "finalRes": [{"title": "X", "url": "http://y"}]}"#;
        let results: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.total_count, 1);
        assert_eq!(results.final_res[0].title, "X");
        assert_eq!(results.final_res[0].url, "http://y");
    }

    #[test]
    fn search_results_tolerate_missing_fields() {
        let results: SearchResults = serde_json::from_str("{}").unwrap();
        assert_eq!(results.total_count, 0);
        assert!(results.final_res.is_empty());
    }

    #[test]
    fn auth_response_deserialize() {
        let json = r#"{"jwt": "abc.def.ghi", "user": {"id": 3, "username": "ankur"}}"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.jwt, "abc.def.ghi");
        assert_eq!(resp.user.id, 3);
        assert_eq!(resp.user.username, "ankur");
    }
}
