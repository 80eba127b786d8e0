use crate::remote::RepoCoordinates;
use serde::Deserialize;

/// The branch a policy is applied to
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectionTarget {
    pub coordinates: RepoCoordinates,
    pub branch: String,
}

impl ProtectionTarget {
    pub fn new(coordinates: RepoCoordinates, branch: &str) -> Self {
        Self {
            coordinates,
            branch: branch.to_string(),
        }
    }

    pub fn endpoint(&self, api_url: &str) -> String {
        format!(
            "{}/repos/{}/{}/branches/{}/protection",
            api_url.trim_end_matches('/'),
            self.coordinates.owner,
            self.coordinates.name,
            self.branch
        )
    }
}

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActiveStatusChecks {
    #[serde(default)]
    pub contexts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActiveReviews {
    #[serde(default)]
    pub required_approving_review_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EnabledFlag {
    #[serde(default)]
    pub enabled: bool,
}

/// The part of the protection read back from the API that gets reported
///
/// Sections missing or `null` in the response read as disabled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActiveProtection {
    #[serde(default)]
    pub required_status_checks: Option<ActiveStatusChecks>,
    #[serde(default)]
    pub required_pull_request_reviews: Option<ActiveReviews>,
    #[serde(default)]
    pub enforce_admins: Option<EnabledFlag>,
    #[serde(default)]
    pub required_linear_history: Option<EnabledFlag>,
}

impl ActiveProtection {
    pub fn contexts(&self) -> Vec<String> {
        self.required_status_checks
            .as_ref()
            .map(|checks| checks.contexts.clone())
            .unwrap_or_default()
    }

    pub fn approval_count(&self) -> u32 {
        self.required_pull_request_reviews
            .as_ref()
            .map_or(0, |reviews| reviews.required_approving_review_count)
    }

    pub fn admins_enforced(&self) -> bool {
        self.enforce_admins.as_ref().is_some_and(|flag| flag.enabled)
    }

    pub fn linear_history(&self) -> bool {
        self.required_linear_history
            .as_ref()
            .is_some_and(|flag| flag.enabled)
    }

    pub fn render_digest(&self) -> String {
        let mut output = String::from("Current settings:\n");
        output = format!(
            "{}  • Required status checks: [{}]\n",
            output,
            self.contexts().join(", ")
        );
        output = format!("{}  • Required approvals: {}\n", output, self.approval_count());
        output = format!("{}  • Enforce for admins: {}\n", output, self.admins_enforced());
        output = format!("{}  • Linear history: {}\n", output, self.linear_history());
        output
    }
}
