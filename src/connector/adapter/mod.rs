mod git_cli;
mod github_lister;
mod pagerduty_notifier;
mod slack_notifier;
mod vault_source;

pub use git_cli::*;
pub use github_lister::*;
pub use pagerduty_notifier::*;
pub use slack_notifier::*;
pub use vault_source::*;
