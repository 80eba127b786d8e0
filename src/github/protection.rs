use crate::errors::{ProtectError, Result, VerificationFailure};
use crate::github::types::{ActiveProtection, ApiResponse, ProtectionTarget};
use crate::github::ProtectionApi;
use crate::policy::ProtectionPolicy;

pub struct ProtectionClient<'a, T: ProtectionApi> {
    pub api: &'a T,
    token: &'a str,
}

impl<'a, T: ProtectionApi> ProtectionClient<'a, T> {
    pub fn new(api: &'a T, token: &'a str) -> Self {
        Self { api, token }
    }

    /// Send the policy in one request and map the status to an outcome
    pub fn apply(&self, target: &ProtectionTarget, policy: &ProtectionPolicy) -> Result<()> {
        let response = self.api.put_protection(target, self.token, policy)?;
        apply_outcome(target, response)
    }

    /// Read the active protection back
    pub fn verify(
        &self,
        target: &ProtectionTarget,
    ) -> std::result::Result<ActiveProtection, VerificationFailure> {
        let response = self
            .api
            .get_protection(target, self.token)
            .map_err(|e| match e {
                ProtectError::Transport(cause) => VerificationFailure::Transport(cause),
                other => VerificationFailure::Transport(other.to_string()),
            })?;

        if response.status != 200 {
            log::debug!(
                "Verification returned status {}: {}",
                response.status,
                response.body
            );
            return Err(VerificationFailure::Status(response.status));
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

pub fn apply_outcome(target: &ProtectionTarget, response: ApiResponse) -> Result<()> {
    match response.status {
        200 => Ok(()),
        401 => Err(ProtectError::Unauthorized),
        403 => Err(ProtectError::Forbidden),
        404 => Err(ProtectError::NotFound {
            owner: target.coordinates.owner.clone(),
            repo: target.coordinates.name.clone(),
            branch: target.branch.clone(),
        }),
        status => Err(ProtectError::UnexpectedStatus {
            status,
            body: response.body,
        }),
    }
}
