use crate::{
    config::Config,
    errors::{ProtectError, Result},
    github::{ProtectionApi, ProtectionClient, ProtectionTarget},
    output::{self, Line},
    policy::ProtectionPolicy,
    prompt::Confirm,
    remote::{resolve_coordinates, RemoteLookup},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Cancelled,
}

pub struct Protect {
    pub config: Config,
    pub policy: ProtectionPolicy,
}

impl Protect {
    pub fn new(config: Config, policy: ProtectionPolicy) -> Self {
        Self { config, policy }
    }

    /// Resolve, confirm, apply and verify
    ///
    /// Errors are reported to the terminal before being returned.
    pub fn execute(
        &self,
        api: &impl ProtectionApi,
        remote: &impl RemoteLookup,
        confirm: &impl Confirm,
    ) -> Result<Outcome> {
        output::header("Branch Protection Setup");

        self.run(api, remote, confirm).map_err(|e| {
            log::debug!("Setup aborted: {:?}", e);
            for line in failure_lines(&e) {
                line.print();
            }
            if e.is_apply_failure() {
                println!();
                output::header("Setup Failed");
            }
            e
        })
    }

    fn run(
        &self,
        api: &impl ProtectionApi,
        remote: &impl RemoteLookup,
        confirm: &impl Confirm,
    ) -> Result<Outcome> {
        let coordinates = resolve_coordinates(
            self.config.owner.as_deref(),
            self.config.repo.as_deref(),
            remote,
        )?;
        let token = self.config.token.as_deref().ok_or(ProtectError::MissingToken)?;
        let target = ProtectionTarget::new(coordinates, &self.config.branch);

        println!("📦 Repository: {}", target.coordinates);
        println!("🌿 Branch: {}", target.branch);
        println!();
        print!("{}", self.policy.render_summary());
        println!();

        if !confirm.confirm("Apply these settings?")? {
            output::warning("Cancelled");
            return Ok(Outcome::Cancelled);
        }
        println!();

        let client = ProtectionClient::new(api, token);
        println!("Applying branch protection...");
        println!();
        client.apply(&target, &self.policy)?;
        output::success("Branch protection applied successfully!");

        self.print_summary(&target);
        self.verify(&client, &target);

        println!();
        output::header("Setup Complete!");
        Ok(Outcome::Applied)
    }

    fn print_summary(&self, target: &ProtectionTarget) {
        println!();
        println!("Summary:");
        println!("  • Direct pushes to '{}' are now blocked", target.branch);
        println!("  • All changes must go through Pull Requests");
        println!("  • CI jobs ({}) must pass", self.policy.contexts());
        println!("  • {} approval(s) required", self.policy.approval_count());
        println!();
        println!("View settings at:");
        println!(
            "  {}/{}/settings/branches",
            self.config.web_url(),
            target.coordinates
        );
    }

    fn verify<T: ProtectionApi>(
        &self,
        client: &ProtectionClient<'_, T>,
        target: &ProtectionTarget,
    ) {
        println!();
        println!("Verifying configuration...");
        println!();

        match client.verify(target) {
            Ok(active) => {
                output::success("Verification successful");
                println!();
                print!("{}", active.render_digest());
            }
            Err(failure) => {
                log::debug!("Verification failed: {:?}", failure);
                output::warning(&failure.to_string());
            }
        }
    }
}

/// What gets printed when setup stops on `error`
///
/// Rejected requests get their hints as info lines. Setup problems get a
/// plain usage block after a blank line.
fn failure_lines(error: &ProtectError) -> Vec<Line> {
    let mut lines = vec![Line::Error(error.to_string())];
    if let ProtectError::UnexpectedStatus { body, .. } = error {
        lines.push(Line::Error(format!("Response: {}", body)));
    }

    let hints = error.hints();
    if error.is_apply_failure() {
        lines.extend(hints.into_iter().map(Line::Info));
    } else if !hints.is_empty() {
        lines.push(Line::Plain(String::new()));
        lines.extend(hints.into_iter().map(Line::Plain));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{github::api::MockProtectionApi, prompt::FixedAnswer, remote::MockRemote};

    fn create_config(vars: &[(&str, &str)]) -> Config {
        let vars: std::collections::HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    fn full_config() -> Config {
        create_config(&[
            ("GITHUB_OWNER", "acme"),
            ("GITHUB_REPO", "widgets"),
            ("GITHUB_TOKEN", "ghp_test"),
        ])
    }

    fn protect(config: Config) -> Protect {
        Protect::new(config, ProtectionPolicy::default_policy())
    }

    #[test]
    fn test_applies_and_verifies() {
        let api = MockProtectionApi::new();
        let prompt = FixedAnswer::new("y");
        let outcome = protect(full_config())
            .execute(&api, &MockRemote::failing(), &prompt)
            .unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(prompt.asked(), 1);
        let puts = api.get_puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0.coordinates.to_string(), "acme/widgets");
        assert_eq!(puts[0].0.branch, "master");
        assert_eq!(puts[0].1, "ghp_test");
        assert_eq!(api.get_gets().len(), 1);
    }

    #[test]
    fn test_missing_token_makes_no_calls() {
        let api = MockProtectionApi::new();
        let prompt = FixedAnswer::new("y");
        let result = protect(create_config(&[
            ("GITHUB_OWNER", "acme"),
            ("GITHUB_REPO", "widgets"),
            ("GITHUB_TOKEN", ""),
        ]))
        .execute(&api, &MockRemote::failing(), &prompt);

        assert!(matches!(result, Err(ProtectError::MissingToken)));
        assert_eq!(api.call_count(), 0);
        assert_eq!(prompt.asked(), 0);
    }

    #[test]
    fn test_declined_prompt_makes_no_calls() {
        for answer in ["", "n", "no", "maybe"] {
            let api = MockProtectionApi::new();
            let outcome = protect(full_config())
                .execute(&api, &MockRemote::failing(), &FixedAnswer::new(answer))
                .unwrap();
            assert_eq!(outcome, Outcome::Cancelled);
            assert_eq!(api.call_count(), 0);
        }
    }

    #[test]
    fn test_unresolved_repository() {
        let api = MockProtectionApi::new();
        let result = protect(create_config(&[("GITHUB_TOKEN", "ghp_test")])).execute(
            &api,
            &MockRemote::new("/srv/git/widgets"),
            &FixedAnswer::new("y"),
        );

        assert!(matches!(result, Err(ProtectError::UnresolvedRepository)));
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn test_coordinates_from_remote() {
        let api = MockProtectionApi::new();
        let remote = MockRemote::new("git@github.com:acme/widgets.git");
        protect(create_config(&[("GITHUB_TOKEN", "ghp_test"), ("GITHUB_BRANCH", "main")]))
            .execute(&api, &remote, &FixedAnswer::new("yes"))
            .unwrap();

        let puts = api.get_puts();
        assert_eq!(puts[0].0.coordinates.to_string(), "acme/widgets");
        assert_eq!(puts[0].0.branch, "main");
        assert_eq!(remote.get_lookups(), vec!["origin".to_string()]);
    }

    #[test]
    fn test_apply_errors_skip_verification() {
        for status in [401, 403, 404, 500] {
            let api = MockProtectionApi::new().with_put_status(status, "{}");
            let result = protect(full_config()).execute(
                &api,
                &MockRemote::failing(),
                &FixedAnswer::new("y"),
            );

            let err = result.expect_err("apply should fail");
            assert!(err.is_apply_failure());
            assert_eq!(api.get_puts().len(), 1);
            assert!(api.get_gets().is_empty(), "status {} must not verify", status);
        }
    }

    #[test]
    fn test_transport_failure_fails_setup() {
        let api = MockProtectionApi::new().with_put_unreachable();
        let result =
            protect(full_config()).execute(&api, &MockRemote::failing(), &FixedAnswer::new("y"));

        assert!(matches!(result, Err(ProtectError::Transport(_))));
        assert!(api.get_gets().is_empty());
    }

    #[test]
    fn test_unexpected_status_reports_body_separately() {
        let err = ProtectError::UnexpectedStatus {
            status: 422,
            body: r#"{"message":"Validation Failed"}"#.to_string(),
        };
        assert_eq!(
            failure_lines(&err),
            vec![
                Line::Error("Failed with status code: 422".to_string()),
                Line::Error(r#"Response: {"message":"Validation Failed"}"#.to_string()),
            ]
        );
    }

    #[test]
    fn test_rejected_request_hints_are_info_lines() {
        let lines = failure_lines(&ProtectError::Unauthorized);
        assert_eq!(lines.len(), 3);
        assert!(matches!(&lines[0], Line::Error(text) if text.contains("Authentication failed")));
        assert!(lines[1..].iter().all(|line| matches!(line, Line::Info(_))));

        let not_found = ProtectError::NotFound {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
            branch: "master".to_string(),
        };
        assert_eq!(
            failure_lines(&not_found)[1],
            Line::Info("Make sure the branch exists and you have access.".to_string())
        );
        assert_eq!(failure_lines(&ProtectError::Forbidden).len(), 1);
    }

    #[test]
    fn test_setup_hints_follow_blank_line() {
        let lines = failure_lines(&ProtectError::MissingToken);
        assert_eq!(
            lines[0],
            Line::Error("GITHUB_TOKEN environment variable not set".to_string())
        );
        assert_eq!(lines[1], Line::Plain(String::new()));
        assert!(lines[2..].iter().all(|line| matches!(line, Line::Plain(_))));
    }

    #[test]
    fn test_verification_failure_still_succeeds() {
        let cases = [
            MockProtectionApi::new().with_get_status(500, "boom"),
            MockProtectionApi::new().with_get_status(200, "not json"),
            MockProtectionApi::new().with_get_unreachable(),
        ];
        for api in cases {
            let outcome = protect(full_config())
                .execute(&api, &MockRemote::failing(), &FixedAnswer::new("y"))
                .unwrap();
            assert_eq!(outcome, Outcome::Applied);
            assert_eq!(api.get_gets().len(), 1);
        }
    }
}
