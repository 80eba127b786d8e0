use std::fmt;

pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings read from the environment
///
/// Empty variables count as unset.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub token: Option<String>,
    pub branch: String,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_url = get("GITHUB_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            owner: get("GITHUB_OWNER"),
            repo: get("GITHUB_REPO"),
            token: get("GITHUB_TOKEN"),
            branch: get("GITHUB_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            api_url,
        }
    }

    /// Browser-facing base url matching the api url
    ///
    /// `https://api.github.com` maps to `https://github.com`, an enterprise
    /// `https://host/api/v3` maps to `https://host`.
    pub fn web_url(&self) -> String {
        if let Some(base) = self.api_url.strip_suffix("/api/v3") {
            return base.to_string();
        }
        match self.api_url.split_once("://api.") {
            Some((scheme, host)) => format!("{}://{}", scheme, host),
            None => self.api_url.clone(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("branch", &self.branch)
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.owner, None);
        assert_eq!(config.repo, None);
        assert_eq!(config.token, None);
        assert_eq!(config.branch, "master");
        assert_eq!(config.api_url, "https://api.github.com");
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = config_from(&[("GITHUB_TOKEN", ""), ("GITHUB_OWNER", "  ")]);
        assert_eq!(config.token, None);
        assert_eq!(config.owner, None);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("GITHUB_OWNER", "acme"),
            ("GITHUB_REPO", "widgets"),
            ("GITHUB_TOKEN", "secret"),
            ("GITHUB_BRANCH", "main"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3/"),
        ]);
        assert_eq!(config.owner.as_deref(), Some("acme"));
        assert_eq!(config.repo.as_deref(), Some("widgets"));
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.branch, "main");
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_web_url() {
        assert_eq!(config_from(&[]).web_url(), "https://github.com");
        let enterprise = config_from(&[("GITHUB_API_URL", "https://ghe.example.com/api/v3")]);
        assert_eq!(enterprise.web_url(), "https://ghe.example.com");
        let local = config_from(&[("GITHUB_API_URL", "http://127.0.0.1:8080")]);
        assert_eq!(local.web_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = config_from(&[("GITHUB_TOKEN", "ghp_supersecret")]);
        let printed = format!("{:?}", config);
        assert!(!printed.contains("ghp_supersecret"));
        assert!(printed.contains("<redacted>"));
    }
}
