use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtectError {
    #[error("Unable to detect repository. Please set GITHUB_OWNER and GITHUB_REPO")]
    UnresolvedRepository,

    #[error("GITHUB_TOKEN environment variable not set")]
    MissingToken,

    #[error("Git operation failed: {0}")]
    Git(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Authentication failed. Check your GITHUB_TOKEN.")]
    Unauthorized,

    #[error("Permission denied. You need admin access to this repository.")]
    Forbidden,

    #[error("Repository or branch not found: {owner}/{repo}/{branch}")]
    NotFound {
        owner: String,
        repo: String,
        branch: String,
    },

    #[error("Failed with status code: {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProtectError {
    /// Follow-up lines telling the user how to recover.
    pub fn hints(&self) -> Vec<String> {
        match self {
            ProtectError::UnresolvedRepository => vec![
                "Usage:".to_string(),
                "  export GITHUB_OWNER=your-username".to_string(),
                "  export GITHUB_REPO=your-repo".to_string(),
                "  branch-guard".to_string(),
            ],
            ProtectError::MissingToken => vec![
                "Get your token from: https://github.com/settings/tokens".to_string(),
                "Required scopes: repo (full control)".to_string(),
                "Then set it:".to_string(),
                "  export GITHUB_TOKEN=your_token_here".to_string(),
                "Or use GitHub CLI:".to_string(),
                "  export GITHUB_TOKEN=$(gh auth token)".to_string(),
            ],
            ProtectError::Unauthorized => vec![
                "Generate a token at: https://github.com/settings/tokens".to_string(),
                "Required scopes: repo (full control)".to_string(),
            ],
            ProtectError::NotFound { .. } => {
                vec!["Make sure the branch exists and you have access.".to_string()]
            }
            _ => Vec::new(),
        }
    }

    /// Failures of the protection request itself
    pub fn is_apply_failure(&self) -> bool {
        matches!(
            self,
            ProtectError::Transport(_)
                | ProtectError::Unauthorized
                | ProtectError::Forbidden
                | ProtectError::NotFound { .. }
                | ProtectError::UnexpectedStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ProtectError>;

/// Reading the protection back failed. The apply itself may still have worked.
#[derive(Error, Debug)]
pub enum VerificationFailure {
    #[error("Unable to verify settings (may still be applied)")]
    Status(u16),

    #[error("Verification request failed (settings may still be applied)")]
    Transport(String),

    #[error("Unable to parse verification response (settings may still be applied)")]
    Parse(#[from] serde_json::Error),
}
