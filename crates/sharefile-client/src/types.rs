//! Request and response types for the ShareFile API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A file or folder
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item ID
    #[serde(rename = "Id", alias = "id")]
    pub id: String,
    /// Creation timestamp as sent by the service
    #[serde(rename = "CreationDate", default)]
    pub creation_date: String,
    /// Display name
    #[serde(rename = "Name")]
    pub name: String,
    /// Children, only populated when the request expanded them
    #[serde(rename = "Children", default)]
    pub children: Vec<ChildItem>,
}

/// Reduced projection of an [`Item`] used inside `Children`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildItem {
    /// Item ID
    #[serde(rename = "Id", alias = "id")]
    pub id: String,
    /// Creation timestamp as sent by the service
    #[serde(rename = "CreationDate", default)]
    pub creation_date: String,
    /// Display name
    #[serde(rename = "Name")]
    pub name: String,
}

/// A client user of the account
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUser {
    #[serde(rename = "Id", alias = "id")]
    pub id: String,
    #[serde(rename = "Email", default)]
    pub email: String,
}

/// Envelope of `GET /sf/v3/Accounts/Clients`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ClientList {
    #[serde(default)]
    pub value: Vec<ClientUser>,
}

/// Body of folder create and update calls
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderRequest {
    pub name: String,
    pub description: String,
}

impl FolderRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Body of `POST /sf/v3/Users` for client users
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserCreateRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub client_password: String,
    pub can_reset_password: bool,
    pub can_view_my_settings: bool,
}

/// Upload specification returned by `GET /sf/v3/Items({id})/Upload`.
///
/// Only `ChunkUri` is interpreted, every other key is kept as sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadConfig(pub Map<String, Value>);

impl UploadConfig {
    /// Key holding the chunk upload endpoint
    pub const CHUNK_URI: &'static str = "ChunkUri";

    /// Non-empty chunk URI, if the service granted one
    pub fn chunk_uri(&self) -> Option<&str> {
        self.0
            .get(Self::CHUNK_URI)
            .and_then(Value::as_str)
            .filter(|uri| !uri.is_empty())
    }

    /// Raw value of any other key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}
