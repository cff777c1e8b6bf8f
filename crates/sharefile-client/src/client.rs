//! Main client implementation

use crate::{
    session::{parse_token_response, Credentials, Session},
    types::*,
    ClientError, Config, Result,
};
use bytes::Bytes;
use futures::StreamExt;
use parking_lot::RwLock;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client, Method, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// Projection used by [`ShareFileClient::get_item_with_children`]
pub const CHILDREN_SELECT: &str = "Id,Name,Children/Id,Children/Name,Children/CreationDate";

/// ShareFile API client
///
/// Holds at most one [`Session`]. Every authorized operation reads it first and
/// fails with [`ClientError::NotAuthenticated`] without touching the network
/// when none is present.
pub struct ShareFileClient {
    config: Config,
    http: Client,
    session: RwLock<Option<Session>>,
}

impl ShareFileClient {
    /// Create a new client with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ClientError::Config(format!("invalid user agent: {e}")))?,
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            config,
            http,
            session: RwLock::new(None),
        })
    }

    /// Create a client that reuses an existing session
    pub fn with_session(config: Config, session: Session) -> Result<Self> {
        let client = Self::new(config)?;
        client.set_session(session);
        Ok(client)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Current session, if any
    pub fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    /// Replace the current session
    pub fn set_session(&self, session: Session) {
        *self.session.write() = Some(session);
    }

    /// Forget the current session
    pub fn clear_session(&self) {
        *self.session.write() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().as_ref().is_some_and(Session::is_valid)
    }

    pub(crate) fn require_session(&self) -> Result<Session> {
        self.session
            .read()
            .as_ref()
            .filter(|s| s.is_valid())
            .cloned()
            .ok_or(ClientError::NotAuthenticated)
    }

    // ==================== Authentication ====================

    /// Run the OAuth password grant and store the resulting session
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let url = credentials.token_url();
        debug!("Sending POST request to {}", url);

        let response = self
            .http
            .post(&url)
            .form(&credentials.form())
            .send()
            .await
            .map_err(|e| ClientError::Auth(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Auth(format!("failed to read token response: {e}")))?;

        if !status.is_success() {
            return Err(ClientError::Auth(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                String::from_utf8_lossy(&body)
            )));
        }

        let session = parse_token_response(&body).map_err(ClientError::Auth)?;
        info!(subdomain = session.subdomain(), "Authenticated");
        self.set_session(session.clone());
        Ok(session)
    }

    // ==================== Item Operations ====================

    /// Get the root item shared with the user
    #[instrument(skip(self))]
    pub async fn get_root(&self, expand_children: bool) -> Result<Item> {
        let mut path = "/sf/v3/Items(allshared)".to_string();
        if expand_children {
            path.push_str("?$expand=Children");
        }
        self.get_json(&path).await
    }

    /// Get a single item
    #[instrument(skip(self))]
    pub async fn get_item(&self, item_id: &str) -> Result<Item> {
        self.get_json(&item_path(item_id)).await
    }

    /// Get a folder with its children, selecting only ids, names and creation dates
    #[instrument(skip(self))]
    pub async fn get_item_with_children(&self, item_id: &str) -> Result<Item> {
        let path = format!(
            "{}?$expand=Children&$select={}",
            item_path(item_id),
            CHILDREN_SELECT
        );
        self.get_json(&path).await
    }

    /// Create a folder under `parent_id`
    #[instrument(skip(self, description))]
    pub async fn create_folder(
        &self,
        parent_id: &str,
        name: &str,
        description: &str,
    ) -> Result<Item> {
        let path = format!("{}/Folder", item_path(parent_id));
        let body = FolderRequest::new(name, description);
        self.send_json(Method::POST, &path, &body).await
    }

    /// Update the name and description of an item
    #[instrument(skip(self, description))]
    pub async fn update_item(&self, item_id: &str, name: &str, description: &str) -> Result<Item> {
        let path = format!("{}/Folder", item_path(item_id));
        let body = FolderRequest::new(name, description);
        self.send_json(Method::PATCH, &path, &body).await
    }

    /// Delete an item. Only `204 No Content` counts as success.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &item_path(item_id), None, None)
            .await?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Stream an item's content into `dest`, creating or truncating it.
    ///
    /// Folders are delivered as zip archives; name the destination accordingly.
    /// Returns the number of bytes written.
    #[instrument(skip(self, dest), fields(dest = %dest.as_ref().display()))]
    pub async fn download_item(&self, item_id: &str, dest: impl AsRef<Path>) -> Result<u64> {
        let path = format!("{}/Download", item_path(item_id));
        let response = self.request(Method::GET, &path, None, None).await?;

        let mut file = tokio::fs::File::create(dest.as_ref()).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!("Downloaded {} bytes", written);
        Ok(written)
    }

    // ==================== Client User Operations ====================

    /// List the client users of the account
    #[instrument(skip(self))]
    pub async fn list_clients(&self) -> Result<Vec<ClientUser>> {
        let list: ClientList = self.get_json("/sf/v3/Accounts/Clients").await?;
        Ok(list.value)
    }

    /// Create a client user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_client(&self, request: &UserCreateRequest) -> Result<ClientUser> {
        self.send_json(Method::POST, "/sf/v3/Users", request).await
    }

    // ==================== Helper Methods ====================

    /// Send an authorized request to an API path (query string included).
    ///
    /// Any 2xx response is returned undecoded; other statuses become
    /// [`ClientError::Http`].
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
        body: Option<Bytes>,
    ) -> Result<Response> {
        let session = self.require_session()?;
        let url = self.config.api_url(&session.hostname(), path);

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(header::AUTHORIZATION, session.authorization_header());

        if let Some(hdrs) = headers {
            req = req.headers(hdrs);
        }

        if let Some(data) = body {
            req = req.body(data);
        }

        debug!("Sending {} request to {}", method, url);
        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path, None, None).await?;
        decode(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)
            .map_err(|e| ClientError::Config(format!("failed to encode request body: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let response = self
            .request(method, path, Some(headers), Some(Bytes::from(payload)))
            .await?;
        decode(response).await
    }
}

/// `/sf/v3/Items({id})`
pub(crate) fn item_path(item_id: &str) -> String {
    format!("/sf/v3/Items({})", item_id)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| ClientError::malformed(std::any::type_name::<T>(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path() {
        assert_eq!(item_path("fo123"), "/sf/v3/Items(fo123)");
        assert_eq!(item_path("allshared"), "/sf/v3/Items(allshared)");
    }

    #[test]
    fn test_session_store() {
        let client = ShareFileClient::new(Config::default()).unwrap();
        assert!(!client.is_authenticated());
        assert!(client.require_session().unwrap_err().is_not_authenticated());

        client.set_session(Session::new("", "acme"));
        assert!(!client.is_authenticated());
        assert!(client.require_session().is_err());

        client.set_session(Session::new("tok", "acme"));
        assert!(client.is_authenticated());
        assert_eq!(client.require_session().unwrap().hostname(), "acme.sf-api.com");

        client.clear_session();
        assert!(client.session().is_none());
    }

    #[test]
    fn test_rejects_invalid_user_agent() {
        let config = Config::default().with_user_agent("bad\nagent");
        assert!(matches!(
            ShareFileClient::new(config),
            Err(ClientError::Config(_))
        ));
    }
}
