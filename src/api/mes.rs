//! HTTP client for the MES layout server.
//!
//! The server exposes three JSON collections under `/api`:
//!
//! | Resource        | Path                        |
//! |-----------------|-----------------------------|
//! | Equipment       | `/api/equipments[/:id]`     |
//! | Process titles  | `/api/processTitles[/:id]`  |
//! | Line names      | `/api/lineNames[/:id]`      |
//!
//! Each supports `GET`, `POST`, `PUT` and `DELETE`. A `PUT` of an equipment
//! with a `status` field makes the server append `{status, time, user}` to
//! that equipment's history.

use super::RemoteSink;
use crate::db::outbox::{OutboxEntry, RemoteMethod};
use anyhow::{bail, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Collections served by the MES API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Resource {
    Equipments,
    ProcessTitles,
    LineNames,
}

impl Resource {
    pub fn collection(&self) -> &'static str {
        match self {
            Resource::Equipments => "equipments",
            Resource::ProcessTitles => "processTitles",
            Resource::LineNames => "lineNames",
        }
    }

    /// Request path, optionally addressing one item.
    pub fn path(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("/api/{}/{}", self.collection(), id),
            None => format!("/api/{}", self.collection()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MesClient {
    client: Client,
    api_url: String,
}

impl MesClient {
    pub fn new(api_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Fetches a whole collection.
    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>> {
        let response = self.client.get(self.url(&resource.path(None))).send().await?;
        if !response.status().is_success() {
            bail!("GET {} returned {}", resource.path(None), response.status());
        }
        Ok(response.json::<Vec<T>>().await?)
    }

    pub async fn send(&self, method: RemoteMethod, path: &str, payload: &serde_json::Value) -> Result<()> {
        let url = self.url(path);
        let request = match method {
            RemoteMethod::Post => self.client.post(&url).json(payload),
            RemoteMethod::Put => self.client.put(&url).json(payload),
            RemoteMethod::Delete => self.client.delete(&url),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("{} {} returned {}: {}", method, path, status, body.trim());
        }
        tracing::debug!(method = %method, path, status = %status, "remote write accepted");
        Ok(())
    }
}

impl RemoteSink for MesClient {
    async fn push(&self, entry: &OutboxEntry) -> Result<()> {
        self.send(entry.method, &entry.path, &entry.payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_paths() {
        assert_eq!(Resource::Equipments.path(None), "/api/equipments");
        assert_eq!(Resource::Equipments.path(Some("E7")), "/api/equipments/E7");
        assert_eq!(Resource::ProcessTitles.path(Some("3")), "/api/processTitles/3");
        assert_eq!(Resource::LineNames.path(None), "/api/lineNames");
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let client = MesClient::new("http://mes.local:3000/");
        assert_eq!(client.url("/api/equipments"), "http://mes.local:3000/api/equipments");
    }
}
