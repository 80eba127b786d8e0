use clap::Parser;
use commands::protect::Protect;
use config::Config;
use github::HttpProtectionApi;
use policy::ProtectionPolicy;
use prompt::StdinConfirm;
use remote::GitCli;

mod commands;
mod config;
mod errors;
mod github;
mod output;
mod policy;
mod prompt;
mod remote;

const ENVIRONMENT_HELP: &str = "\
Environment:
  GITHUB_TOKEN     token with repo scope (required)
  GITHUB_OWNER     repository owner (default: detected from the origin remote)
  GITHUB_REPO      repository name (default: detected from the origin remote)
  GITHUB_BRANCH    branch to protect (default: master)
  GITHUB_API_URL   API base url (default: https://api.github.com)
  RUST_LOG         log filter, e.g. debug";

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "branch-guard", version)]
#[command(about = "Apply the branch protection policy to a GitHub repository", long_about = None)]
#[command(after_help = ENVIRONMENT_HELP)]
struct Cli {}

fn main() {
    env_logger::init();

    let _args = Cli::parse();

    if let Err(e) = ctrlc::set_handler(|| {
        println!();
        output::warning("Cancelled by user");
        std::process::exit(0);
    }) {
        log::warn!("Cannot install Ctrl-C handler: {}", e);
    }

    let config = Config::from_env();
    log::debug!("Loaded {:?}", config);

    let api = match HttpProtectionApi::new(&config.api_url) {
        Ok(api) => api,
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    let protect = Protect::new(config, ProtectionPolicy::default_policy());
    if protect.execute(&api, &GitCli::new(), &StdinConfirm).is_err() {
        std::process::exit(1);
    }
}
