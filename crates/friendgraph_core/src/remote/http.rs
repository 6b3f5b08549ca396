//! HTTP implementation of the remote graph store contract.

use crate::config::RemoteConfig;
use crate::model::input::{UserInput, UserPatch};
use crate::remote::{GraphRemote, RemoteError, RemoteResult, RemoteUser};
use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use url::Url;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FriendRef<'a> {
    friend_id: &'a str,
}

/// REST client for `/api/graph` and `/api/users`.
#[derive(Debug, Clone)]
pub struct HttpGraphRemote {
    client: Client,
    base_url: Url,
}

impl HttpGraphRemote {
    /// Builds a client with the configured request timeout.
    pub fn new(config: &RemoteConfig) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RemoteError::Transport(format!("base url `{}` cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(
            "event=remote_rejected module=remote status={} body_bytes={}",
            status.as_u16(),
            body.len()
        );
        Err(RemoteError::from_response(status.as_u16(), &body))
    }
}

impl GraphRemote for HttpGraphRemote {
    async fn fetch_graph(&self) -> RemoteResult<Value> {
        let url = self.endpoint(&["api", "graph"])?;
        Ok(self.send(self.client.get(url)).await?.json().await?)
    }

    async fn create_user(&self, input: &UserInput) -> RemoteResult<RemoteUser> {
        let url = self.endpoint(&["api", "users"])?;
        Ok(self.send(self.client.post(url).json(input)).await?.json().await?)
    }

    async fn update_user(&self, user_id: &str, patch: &UserPatch) -> RemoteResult<RemoteUser> {
        let url = self.endpoint(&["api", "users", user_id])?;
        Ok(self.send(self.client.put(url).json(patch)).await?.json().await?)
    }

    async fn delete_user(&self, user_id: &str) -> RemoteResult<()> {
        let url = self.endpoint(&["api", "users", user_id])?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn link_users(&self, user_id: &str, friend_id: &str) -> RemoteResult<()> {
        let url = self.endpoint(&["api", "users", user_id, "link"])?;
        let body = FriendRef { friend_id };
        self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    async fn unlink_users(&self, user_id: &str, friend_id: &str) -> RemoteResult<()> {
        let url = self.endpoint(&["api", "users", user_id, "unlink"])?;
        let body = FriendRef { friend_id };
        self.send(self.client.delete(url).json(&body)).await?;
        Ok(())
    }
}
