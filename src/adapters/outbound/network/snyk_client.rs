use crate::config::{ApiConfig, ScanScope};
use crate::ports::outbound::AibomApi;
use crate::scanning::domain::{JobHandle, JobState, RepoType, Target};
use crate::shared::error::ScanError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Snyk REST API client for AI-BOM generation.
///
/// Implements the AibomApi port against the vendor's JSON:API shape:
/// paginated target enumeration (per organization, or across every
/// organization of a group), per-target job submission, status polling,
/// and result retrieval.
///
/// # Security
/// - Implements request timeout (30 seconds)
/// - Page fetches are retried with growing delay; auth failures never are
pub struct SnykAibomClient {
    client: Client,
    config: ApiConfig,
    max_page_retries: u32,
}

impl SnykAibomClient {
    const TIMEOUT_SECONDS: u64 = 30;
    const PAGE_RETRY_BASE_MS: u64 = 500;

    /// Creates a new client with default configuration
    pub fn new(config: ApiConfig) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("aibom-scan/{}", version);
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            max_page_retries: 3,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", format!("token {}", self.config.api_token))
            .header("Accept", "application/vnd.api+json")
    }

    /// Fetches one page of a paginated collection.
    async fn fetch_collection_page<P: DeserializeOwned>(&self, url: &str) -> Result<P> {
        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| ScanError::TargetEnumeration {
                details: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let details = response.text().await.unwrap_or_default();
            return Err(ScanError::Auth {
                status: status.as_u16(),
                details,
            }
            .into());
        }
        if !status.is_success() {
            return Err(ScanError::TargetEnumeration {
                details: format!("collection endpoint returned status {}", status),
            }
            .into());
        }

        let page: P = response
            .json()
            .await
            .map_err(|e| ScanError::TargetEnumeration {
                details: format!("malformed collection page: {}", e),
            })?;
        Ok(page)
    }

    /// Fetches a page with retry on transient failures.
    ///
    /// A lost page would silently undercount the organization, so this is
    /// the one place a network retry applies. Auth errors propagate
    /// immediately.
    async fn fetch_page_with_retry<P: DeserializeOwned>(&self, url: &str) -> Result<P> {
        let mut last_error = None;

        for attempt in 1..=self.max_page_retries {
            match self.fetch_collection_page(url).await {
                Ok(page) => return Ok(page),
                Err(e) => {
                    if matches!(e.downcast_ref::<ScanError>(), Some(ScanError::Auth { .. })) {
                        return Err(e);
                    }
                    last_error = Some(e);
                    if attempt < self.max_page_retries {
                        tokio::time::sleep(Duration::from_millis(
                            Self::PAGE_RETRY_BASE_MS * attempt as u64,
                        ))
                        .await;
                    }
                }
            }
        }

        Err(last_error.unwrap())
    }

    /// Enumerates every organization id in a group, exhausting pagination.
    async fn list_group_orgs(&self, group_id: &str) -> Result<Vec<String>> {
        let mut org_ids = Vec::new();
        let mut url = Some(self.config.group_orgs_url(group_id));

        while let Some(page_url) = url {
            let page: OrgsPage = self.fetch_page_with_retry(&page_url).await?;
            org_ids.extend(page.data.into_iter().map(|org| org.id));
            url = page.links.next.map(|next| self.config.resolve_link(&next));
        }

        Ok(org_ids)
    }

    /// Enumerates every target of one organization, exhausting pagination.
    async fn list_org_targets(&self, org_id: &str) -> Result<Vec<Target>> {
        let mut targets = Vec::new();
        let mut url = Some(self.config.targets_url(org_id));

        while let Some(page_url) = url {
            let page: TargetsPage = self.fetch_page_with_retry(&page_url).await?;
            targets.extend(
                page.data
                    .into_iter()
                    .map(|resource| into_target(resource, org_id)),
            );
            // The continuation link is relative to the base URL.
            url = page.links.next.map(|next| self.config.resolve_link(&next));
        }

        Ok(targets)
    }
}

#[async_trait]
impl AibomApi for SnykAibomClient {
    async fn list_targets(&self) -> Result<Vec<Target>> {
        let org_ids = match &self.config.scope {
            ScanScope::Organization(org_id) => vec![org_id.clone()],
            ScanScope::Group(group_id) => self.list_group_orgs(group_id).await?,
        };

        let mut targets = Vec::new();
        for org_id in org_ids {
            targets.extend(self.list_org_targets(&org_id).await?);
        }

        Ok(targets)
    }

    async fn submit_job(&self, target: &Target) -> Result<JobHandle> {
        let payload = JobCreateRequest {
            data: JobCreateData {
                resource_type: "ai_bom_scm_bundle",
                attributes: JobCreateAttributes {
                    target_id: target.id(),
                },
            },
        };

        let response = self
            .client
            .post(self.config.job_creation_url(target.org_id()))
            .header("Authorization", format!("token {}", self.config.api_token))
            .header("Content-Type", "application/vnd.api+json")
            .header("Accept", "application/vnd.api+json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            anyhow::bail!("incompatible target type (HTTP 422)");
        }
        if !status.is_success() {
            anyhow::bail!("job creation returned status {}", status);
        }

        let document: JobDocument = response.json().await?;
        let initial_status = document
            .data
            .attributes
            .status
            .as_deref()
            .map(|raw| JobState::parse(raw, document.data.attributes.error.as_deref()))
            .unwrap_or(JobState::Pending);

        Ok(JobHandle {
            job_id: document.data.id,
            org_id: target.org_id().to_string(),
            initial_status,
        })
    }

    async fn job_status(&self, job: &JobHandle) -> Result<JobState> {
        let response = self
            .get(&self.config.job_url(&job.org_id, &job.job_id))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("job status endpoint returned status {}", status);
        }

        let body: Value = response.json().await?;
        match body.pointer("/data/attributes/status").and_then(Value::as_str) {
            Some(raw) => {
                let details = body.pointer("/data/attributes/error").and_then(Value::as_str);
                Ok(JobState::parse(raw, details))
            }
            // A finished job's endpoint serves the document itself, which
            // carries no status field.
            None => Ok(JobState::Finished),
        }
    }

    async fn fetch_document(&self, job: &JobHandle) -> Result<Value> {
        let response = self
            .get(&self.config.job_url(&job.org_id, &job.job_id))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("job result endpoint returned status {}", status);
        }

        let document: Value = response.json().await?;
        Ok(document)
    }
}

fn into_target(resource: TargetResource, enumerated_org_id: &str) -> Target {
    let display_name = resource
        .attributes
        .display_name
        .unwrap_or_else(|| "Unknown Name".to_string());

    let integration_type = resource
        .relationships
        .as_ref()
        .and_then(|relationships| relationships.integration.as_ref())
        .and_then(|integration| integration.data.as_ref())
        .and_then(|data| data.attributes.as_ref())
        .and_then(|attributes| attributes.integration_type.clone());

    let repo_type = integration_type
        .map(|raw| RepoType::parse(&raw))
        .unwrap_or_else(|| RepoType::Other("unknown".to_string()));

    // The resource names its owner explicitly; fall back to the
    // organization we enumerated it under.
    let org_id = resource
        .relationships
        .as_ref()
        .and_then(|relationships| relationships.organization.as_ref())
        .and_then(|organization| organization.data.as_ref())
        .map(|data| data.id.clone())
        .unwrap_or_else(|| enumerated_org_id.to_string());

    Target::new(resource.id, display_name, org_id, repo_type)
}

// Snyk REST API request/response structures

#[derive(Debug, Serialize)]
struct JobCreateRequest<'a> {
    data: JobCreateData<'a>,
}

#[derive(Debug, Serialize)]
struct JobCreateData<'a> {
    #[serde(rename = "type")]
    resource_type: &'static str,
    attributes: JobCreateAttributes<'a>,
}

#[derive(Debug, Serialize)]
struct JobCreateAttributes<'a> {
    target_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct JobDocument {
    data: JobResource,
}

#[derive(Debug, Deserialize)]
struct JobResource {
    id: String,
    #[serde(default)]
    attributes: JobAttributes,
}

#[derive(Debug, Deserialize, Default)]
struct JobAttributes {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TargetsPage {
    #[serde(default)]
    data: Vec<TargetResource>,
    #[serde(default)]
    links: PageLinks,
}

#[derive(Debug, Deserialize)]
struct OrgsPage {
    #[serde(default)]
    data: Vec<OrgResource>,
    #[serde(default)]
    links: PageLinks,
}

#[derive(Debug, Deserialize)]
struct OrgResource {
    id: String,
}

#[derive(Debug, Deserialize, Default)]
struct PageLinks {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TargetResource {
    id: String,
    #[serde(default)]
    attributes: TargetAttributes,
    #[serde(default)]
    relationships: Option<TargetRelationships>,
}

#[derive(Debug, Deserialize, Default)]
struct TargetAttributes {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TargetRelationships {
    #[serde(default)]
    integration: Option<IntegrationRelationship>,
    #[serde(default)]
    organization: Option<OrganizationRelationship>,
}

#[derive(Debug, Deserialize)]
struct IntegrationRelationship {
    #[serde(default)]
    data: Option<IntegrationData>,
}

#[derive(Debug, Deserialize)]
struct IntegrationData {
    #[serde(default)]
    attributes: Option<IntegrationAttributes>,
}

#[derive(Debug, Deserialize)]
struct IntegrationAttributes {
    #[serde(default)]
    integration_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganizationRelationship {
    #[serde(default)]
    data: Option<OrganizationData>,
}

#[derive(Debug, Deserialize)]
struct OrganizationData {
    id: String,
}
