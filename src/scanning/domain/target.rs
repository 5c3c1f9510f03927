use std::fmt;

/// Integration kind of a target, as reported by the targets endpoint.
///
/// Only git-hosted kinds are eligible for AI-BOM generation; container
/// images and manual uploads are enumerated but never processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoType {
    GitHub,
    GitHubEnterprise,
    GitLab,
    AzureRepos,
    BitbucketCloud,
    /// Any other integration kind (container registries, CLI uploads, ...)
    Other(String),
}

impl RepoType {
    /// Parses the raw `integration_type` string from the API.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "github" => RepoType::GitHub,
            "github-enterprise" => RepoType::GitHubEnterprise,
            "gitlab" => RepoType::GitLab,
            "azure-repos" => RepoType::AzureRepos,
            "bitbucket-cloud" => RepoType::BitbucketCloud,
            other => RepoType::Other(other.to_string()),
        }
    }

    /// Whether the BOM generator can process this target kind.
    pub fn is_git_hosted(&self) -> bool {
        !matches!(self, RepoType::Other(_))
    }
}

impl fmt::Display for RepoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoType::GitHub => write!(f, "github"),
            RepoType::GitHubEnterprise => write!(f, "github-enterprise"),
            RepoType::GitLab => write!(f, "gitlab"),
            RepoType::AzureRepos => write!(f, "azure-repos"),
            RepoType::BitbucketCloud => write!(f, "bitbucket-cloud"),
            RepoType::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// A repository-like entity registered with the organization.
///
/// Immutable once fetched; created during enumeration and consumed
/// (never mutated) by the job orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    id: String,
    display_name: String,
    /// Owning organization. Needed for job URLs: in a group scan, targets
    /// from different organizations share one run.
    org_id: String,
    repo_type: RepoType,
}

impl Target {
    pub fn new(id: String, display_name: String, org_id: String, repo_type: RepoType) -> Self {
        Self {
            id,
            display_name,
            org_id,
            repo_type,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn repo_type(&self) -> &RepoType {
        &self.repo_type
    }

    /// Whether this target can be submitted to the BOM generator.
    pub fn is_eligible(&self) -> bool {
        self.repo_type.is_git_hosted()
    }
}
