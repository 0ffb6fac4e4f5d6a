use crate::error::ExportError;

pub const ORGANIZATION_VAR: &str = "AZURE_DEVOPS_ORGANIZATION";
pub const PROJECT_VAR: &str = "AZURE_DEVOPS_PROJECT";
pub const PAT_VAR: &str = "AZURE_DEVOPS_PAT";
pub const PRODUCT_PREFIX_VAR: &str = "PRODUCT_PREFIX";
pub const BASE_URL_VAR: &str = "AZURE_DEVOPS_BASE_URL";

pub const DEFAULT_PRODUCT_PREFIX: &str = "eNr";
pub const DEFAULT_BASE_URL: &str = "https://dev.azure.com";

/// Connection settings for the Azure DevOps work items API.
#[derive(Clone)]
pub struct Config {
    pub organization: String,
    pub project: String,
    pub pat: String,
    pub product_prefix: String,
    pub base_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("pat", &"[REDACTED]")
            .field("product_prefix", &self.product_prefix)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Build a config from process environment variables.
    pub fn from_env() -> Result<Self, ExportError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. Every missing required variable
    /// is reported in a single `MissingConfig` error.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ExportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let organization = get(ORGANIZATION_VAR);
        let project = get(PROJECT_VAR);
        let pat = get(PAT_VAR);

        let (Some(organization), Some(project), Some(pat)) = (organization, project, pat) else {
            let missing = [ORGANIZATION_VAR, PROJECT_VAR, PAT_VAR]
                .into_iter()
                .filter(|&name| get(name).is_none())
                .map(str::to_string)
                .collect();
            return Err(ExportError::MissingConfig { missing });
        };

        let base_url = get(BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            organization,
            project,
            pat,
            product_prefix: get(PRODUCT_PREFIX_VAR)
                .unwrap_or_else(|| DEFAULT_PRODUCT_PREFIX.to_string()),
            base_url,
        })
    }

    /// Override the product prefix used in generated filenames.
    pub fn with_product_prefix(mut self, prefix: String) -> Self {
        self.product_prefix = prefix;
        self
    }
}
