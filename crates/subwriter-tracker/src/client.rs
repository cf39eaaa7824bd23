//! Blocking client for the tracker REST API.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use subwriter_model::{Playlist, Project, Shot, VersionRecord};

use crate::Tracker;
use crate::error::{Result, TrackerError};
use crate::settings::TrackerSettings;
use crate::types::{
    ErrorResponse, PageResponse, PageRequest, RestRecord, SearchRequest, SingleResponse,
    TokenResponse, is_filter,
};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("subwriter/", env!("CARGO_PKG_VERSION"));

/// Content type for search bodies whose filters are plain arrays.
const SEARCH_CONTENT_TYPE: &str = "application/vnd+shotgun.api3_array+json";

/// Records requested per search page.
const PAGE_SIZE: u32 = 500;

/// Tokens are refreshed this long before the server expires them.
const TOKEN_MARGIN: Duration = Duration::from_secs(30);

/// Token lifetime assumed when the server does not report one.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    refresh_at: Instant,
}

/// Tracker client authenticated as a script user.
#[derive(Debug)]
pub struct ShotgunClient {
    client: Client,
    api_root: String,
    script_name: String,
    api_key: String,
    project: Project,
    token: RefCell<Option<AccessToken>>,
}

impl ShotgunClient {
    /// Authenticates with the site and loads the configured project.
    pub fn connect(settings: &TrackerSettings) -> Result<Self> {
        settings.validate()?;
        let site = settings.site.trim().trim_end_matches('/');
        Url::parse(site)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| TrackerError::Network(format!("failed to create HTTP client: {e}")))?;

        let mut tracker = Self {
            client,
            api_root: format!("{site}/api/v1"),
            script_name: settings.script_name.clone(),
            api_key: settings.api_key.clone(),
            project: Project::new(settings.project_id),
            token: RefCell::new(None),
        };
        tracker.project = tracker.load_project(settings.project_id)?;
        tracing::info!(
            site,
            project = %tracker.project.label(),
            "Connected to tracker"
        );
        Ok(tracker)
    }

    fn load_project(&self, id: u64) -> Result<Project> {
        match self.read_entity("projects", id, &["name".to_string()])? {
            Some(record) => Ok(record.into_project()),
            None => Err(TrackerError::Settings(format!("project {id} not found"))),
        }
    }

    fn authenticate(&self) -> Result<AccessToken> {
        let url = format!("{}/auth/access_token", self.api_root);
        tracing::debug!("Requesting access token from {}", url);

        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "client_credentials")
            .append_pair("client_id", &self.script_name)
            .append_pair("client_secret", &self.api_key)
            .finish();
        let response = self
            .client
            .post(&url)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(body)
            .send()?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(TrackerError::Auth(error_message(response)));
        }
        let token: TokenResponse = parse_response(response)?;
        let lifetime = token
            .expires_in
            .map_or(DEFAULT_TOKEN_LIFETIME, Duration::from_secs);
        Ok(AccessToken {
            value: token.access_token,
            refresh_at: Instant::now() + lifetime.saturating_sub(TOKEN_MARGIN),
        })
    }

    fn bearer(&self) -> Result<String> {
        let mut token = self.token.borrow_mut();
        if let Some(current) = token.as_ref()
            && Instant::now() < current.refresh_at
        {
            return Ok(current.value.clone());
        }
        let fresh = self.authenticate()?;
        let value = fresh.value.clone();
        *token = Some(fresh);
        Ok(value)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(request.bearer_auth(self.bearer()?))
    }

    fn read_entity(&self, entity: &str, id: u64, fields: &[String]) -> Result<Option<RestRecord>> {
        let url = Url::parse_with_params(
            &format!("{}/entity/{entity}/{id}", self.api_root),
            &[("fields", fields.join(","))],
        )?;
        tracing::debug!("Reading {} {} from {}", entity, id, url);

        let response = self.authorized(self.client.get(url))?.send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let single: SingleResponse = parse_response(response)?;
        Ok(Some(single.data))
    }

    fn search(&self, entity: &str, filters: Vec<Value>, fields: &[String]) -> Result<Vec<RestRecord>> {
        let url = format!("{}/entity/{entity}/_search", self.api_root);
        let mut records = Vec::new();
        let mut number = 1;
        loop {
            let body = serde_json::to_string(&SearchRequest {
                filters: filters.clone(),
                fields,
                page: PageRequest {
                    number,
                    size: PAGE_SIZE,
                },
            })?;
            tracing::debug!("Searching {} page {} at {}", entity, number, url);

            let request = self
                .client
                .post(&url)
                .header(CONTENT_TYPE, HeaderValue::from_static(SEARCH_CONTENT_TYPE))
                .body(body);
            let response = self.authorized(request)?.send()?;
            let page: PageResponse = parse_response(response)?;
            let count = page.data.len();
            records.extend(page.data);
            if count < PAGE_SIZE as usize {
                break;
            }
            number += 1;
        }
        tracing::debug!(entity, count = records.len(), "Search complete");
        Ok(records)
    }

    fn project_filter(&self) -> Result<Value> {
        is_filter("project", self.project.link())
    }
}

impl Tracker for ShotgunClient {
    fn project(&self) -> &Project {
        &self.project
    }

    fn find_playlists(&self) -> Result<Vec<Playlist>> {
        let fields = ["code".to_string(), "versions".to_string()];
        self.search("playlists", vec![self.project_filter()?], &fields)?
            .into_iter()
            .map(RestRecord::into_playlist)
            .collect()
    }

    fn find_version(&self, id: u64, fields: &[String]) -> Result<Option<VersionRecord>> {
        Ok(self
            .read_entity("versions", id, fields)?
            .map(RestRecord::into_version))
    }

    fn find_shots(&self) -> Result<Vec<Shot>> {
        let fields = ["code".to_string(), "tasks".to_string()];
        self.search("shots", vec![self.project_filter()?], &fields)?
            .into_iter()
            .map(RestRecord::into_shot)
            .collect()
    }

    fn find_shot_versions(&self, shot: &Shot, fields: &[String]) -> Result<Vec<VersionRecord>> {
        let filters = vec![self.project_filter()?, is_filter("entity", shot.link())?];
        Ok(self
            .search("versions", filters, fields)?
            .into_iter()
            .map(RestRecord::into_version)
            .collect())
    }

    fn update_version(&self, id: u64, fields: &Map<String, Value>) -> Result<()> {
        let url = format!("{}/entity/versions/{id}", self.api_root);
        tracing::debug!("Updating version {} at {}", id, url);

        let request = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(serde_json::to_string(fields)?);
        let response = self.authorized(request)?.send()?;
        let _: SingleResponse = parse_response(response)?;
        Ok(())
    }
}

/// Checks the status and parses the JSON body.
fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(TrackerError::Auth(error_message(response)));
    }
    if !status.is_success() {
        return Err(TrackerError::Api {
            status: status.as_u16(),
            message: error_message(response),
        });
    }
    let text = response.text()?;
    Ok(serde_json::from_str(&text)?)
}

fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().unwrap_or_default();
    serde_json::from_str::<ErrorResponse>(&text)
        .ok()
        .and_then(|body| body.summary())
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                status.to_string()
            } else {
                text
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_rejects_incomplete_settings() {
        let settings = TrackerSettings::new("https://studio.example.com", "", "key", 5);
        let err = ShotgunClient::connect(&settings).unwrap_err();
        assert!(matches!(err, TrackerError::Settings(_)));
        assert!(err.is_connectivity());
    }

    #[test]
    fn test_connect_rejects_bad_site() {
        let settings = TrackerSettings::new("studio example", "submission", "key", 5);
        let err = ShotgunClient::connect(&settings).unwrap_err();
        assert!(err.to_string().contains("invalid site URL"));
    }
}
