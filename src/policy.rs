use serde::Serialize;

/// Status checks that must pass before merging
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredStatusChecks {
    /// Require the branch to be up to date before merging
    pub strict: bool,
    pub contexts: Vec<String>,
}

/// Who may dismiss reviews. Empty means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DismissalRestrictions {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredPullRequestReviews {
    pub dismiss_stale_reviews: bool,
    pub require_code_owner_reviews: bool,
    pub required_approving_review_count: u32,
    pub require_last_push_approval: bool,
    pub dismissal_restrictions: DismissalRestrictions,
}

/// Users, teams and apps allowed to push
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushRestrictions {
    pub users: Vec<String>,
    pub teams: Vec<String>,
    pub apps: Vec<String>,
}

/// The full set of rules sent in a single protection request
///
/// Field order is the order of the request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectionPolicy {
    pub required_status_checks: RequiredStatusChecks,
    pub enforce_admins: bool,
    pub required_pull_request_reviews: RequiredPullRequestReviews,
    pub restrictions: Option<PushRestrictions>,
    pub required_linear_history: bool,
    pub allow_force_pushes: bool,
    pub allow_deletions: bool,
    pub required_conversation_resolution: bool,
    pub lock_branch: bool,
    pub allow_fork_syncing: bool,
}

impl ProtectionPolicy {
    /// CI jobs `quality` and `deploy` must pass, one fresh approval, linear
    /// history, no force pushes or deletions, admins included.
    pub fn default_policy() -> Self {
        Self {
            required_status_checks: RequiredStatusChecks {
                strict: true,
                contexts: vec!["quality".to_string(), "deploy".to_string()],
            },
            enforce_admins: true,
            required_pull_request_reviews: RequiredPullRequestReviews {
                dismiss_stale_reviews: true,
                require_code_owner_reviews: false,
                required_approving_review_count: 1,
                require_last_push_approval: true,
                dismissal_restrictions: DismissalRestrictions::default(),
            },
            restrictions: None,
            required_linear_history: true,
            allow_force_pushes: false,
            allow_deletions: false,
            required_conversation_resolution: true,
            lock_branch: false,
            allow_fork_syncing: true,
        }
    }

    pub fn contexts(&self) -> String {
        self.required_status_checks.contexts.join(", ")
    }

    pub fn approval_count(&self) -> u32 {
        self.required_pull_request_reviews
            .required_approving_review_count
    }

    /// Human readable list of what the policy turns on and off
    pub fn render_summary(&self) -> String {
        let checks = &self.required_status_checks;
        let reviews = &self.required_pull_request_reviews;
        let mut output = String::from("Configuration to be applied:\n\n");

        output = format!(
            "{}{} Require status checks to pass before merging\n",
            output,
            mark(!checks.contexts.is_empty())
        );
        output = format!("{}   - Required checks: {}\n", output, self.contexts());
        if checks.strict {
            output = format!("{}   - Require branch to be up to date\n", output);
        }
        output.push('\n');

        output = format!(
            "{}{} Require pull request reviews\n",
            output,
            mark(reviews.required_approving_review_count > 0)
        );
        output = format!(
            "{}   - Required approving reviews: {}\n",
            output, reviews.required_approving_review_count
        );
        if reviews.dismiss_stale_reviews {
            output = format!("{}   - Dismiss stale reviews on new commits\n", output);
        }
        if reviews.require_last_push_approval {
            output = format!("{}   - Require approval of most recent push\n", output);
        }
        if reviews.require_code_owner_reviews {
            output = format!("{}   - Require review from code owners\n", output);
        }
        output.push('\n');

        output = format!(
            "{}{} Require conversation resolution before merging\n",
            output,
            mark(self.required_conversation_resolution)
        );
        output = format!(
            "{}{} Require linear history (no merge commits)\n",
            output,
            mark(self.required_linear_history)
        );
        output = format!(
            "{}{} Enforce restrictions for administrators\n",
            output,
            mark(self.enforce_admins)
        );
        output = format!(
            "{}{} Allow force pushes\n",
            output,
            mark(self.allow_force_pushes)
        );
        output = format!("{}{} Allow branch deletion\n", output, mark(self.allow_deletions));
        if self.lock_branch {
            output = format!("{}✅ Lock branch (read-only)\n", output);
        }
        output
    }
}

fn mark(enabled: bool) -> &'static str {
    if enabled {
        "✅"
    } else {
        "❌"
    }
}
