mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use leakhound::{
    Config, GitCli, GithubLister, JsonFileResultStore, Notifier, OwnerKind, PagerdutyNotifier,
    RepositoryHandle, ScanFilter, ScanOwnerUseCase, ScanRepositoryUseCase, ScanSummary,
    SearchSpec, SearchTermSource, SlackNotifier, VaultSource, GITHUB_BLOB_URL_TEMPLATE,
};

use cli::Commands;

const DEFAULT_DATA_DIR: &str = "~/.leakhound";

#[derive(Parser)]
#[command(name = "leakhound")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Literal string to search for (repeatable)
    #[arg(short = 's', long = "string", global = true)]
    strings: Vec<String>,

    /// YAML config file
    #[arg(short = 'C', long, global = true)]
    config: Option<String>,

    /// Results file (default: ~/.leakhound/results/results.json)
    #[arg(long, global = true)]
    results_path: Option<String>,

    /// Directory for cloned repositories (default: ~/.leakhound/clones)
    #[arg(long, global = true)]
    clones_dir: Option<String>,

    /// Append to an existing results file instead of backing it up
    #[arg(long, global = true)]
    consolidate: bool,

    /// GitHub username for API requests and cloning
    #[arg(long, global = true)]
    git_user: Option<String>,

    /// GitHub password or token
    #[arg(long, global = true)]
    git_password: Option<String>,

    /// Extra search-term source plugin (supported: vault)
    #[arg(long = "source", global = true)]
    term_source: Vec<String>,

    /// Alert plugin to fire when matches were found (supported: pagerduty, slack)
    #[arg(long, global = true)]
    alert: Vec<String>,

    /// Do not attach hosting-service blob URLs to results
    #[arg(long, global = true)]
    no_blob_urls: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => Config::load(Path::new(&expand_tilde(path)))?,
        None => Config::default(),
    };

    let data_dir = expand_tilde(DEFAULT_DATA_DIR);
    let clones_root = cli
        .clones_dir
        .as_deref()
        .map(|p| PathBuf::from(expand_tilde(p)))
        .or_else(|| config.cloned_repos_dir.clone())
        .unwrap_or_else(|| Path::new(&data_dir).join("clones"));
    let results_path = cli
        .results_path
        .as_deref()
        .map(|p| PathBuf::from(expand_tilde(p)))
        .or_else(|| config.results_path.clone())
        .unwrap_or_else(|| Path::new(&data_dir).join("results").join("results.json"));
    let consolidate = cli.consolidate || config.consolidate.unwrap_or(false);

    let spec = build_search_spec(&cli, &config).await?;

    let credentials = cli
        .git_user
        .clone()
        .or_else(|| config.git_user.clone())
        .zip(cli.git_password.clone().or_else(|| config.git_password.clone()));

    let vcs = Arc::new(GitCli::new());
    let store = Arc::new(JsonFileResultStore::new(&results_path));
    let mut scanner = ScanRepositoryUseCase::new(vcs, store);
    if !cli.no_blob_urls {
        scanner = scanner.with_blob_url_template(GITHUB_BLOB_URL_TEMPLATE);
    }

    let records_written = match &cli.command {
        Commands::Repo {
            source,
            organization,
        } => {
            let handle = if source.contains("://") || source.starts_with("git@") {
                RepositoryHandle::from_url(source, &clones_root)?
            } else {
                let organization = organization
                    .clone()
                    .or_else(|| config.organization.clone())
                    .unwrap_or_else(|| "local".to_string());
                RepositoryHandle::from_local(Path::new(&expand_tilde(source)), &organization)?
            };

            let report = scanner.execute(&handle, &spec, consolidate).await?;
            println!(
                "Scanned {} ({} commits): {} record(s) written to {}",
                report.repository_name,
                report.commits_scanned,
                report.records_written,
                results_path.display()
            );
            print_error_summary(&report.errors);
            report.records_written
        }

        Commands::Org {
            name,
            include,
            exclude,
        } => {
            run_owner_scan(
                scanner,
                credentials,
                name,
                OwnerKind::Organization,
                &spec,
                &clones_root,
                &results_path,
                include,
                exclude,
                &config,
                consolidate,
            )
            .await?
        }

        Commands::User {
            name,
            include,
            exclude,
        } => {
            run_owner_scan(
                scanner,
                credentials,
                name,
                OwnerKind::User,
                &spec,
                &clones_root,
                &results_path,
                include,
                exclude,
                &config,
                consolidate,
            )
            .await?
        }
    };

    fire_alerts(&cli, &config, records_written, &results_path).await;

    Ok(())
}

/// Merges CLI strings, config-file strings, and plugin-discovered strings
/// into the final search spec.
async fn build_search_spec(cli: &Cli, config: &Config) -> Result<SearchSpec> {
    let mut terms = cli.strings.clone();
    terms.extend(config.search_list.iter().cloned());

    for source in &cli.term_source {
        match source.as_str() {
            "vault" => {
                let vault = config.vault.as_ref().ok_or_else(|| {
                    anyhow::anyhow!("--source vault requires a 'vault' section in the config file")
                })?;
                let source = VaultSource::new(
                    &vault.vault_url,
                    &vault.vault_token,
                    &vault.secret_path,
                    vault.key_list.clone(),
                )?;
                let discovered = source.fetch_terms().await?;
                info!("Vault supplied {} additional search term(s)", discovered.len());
                terms.extend(discovered);
            }
            other => {
                return Err(anyhow::anyhow!("Unknown search-term source: {}", other));
            }
        }
    }

    Ok(SearchSpec::new(terms)?)
}

#[allow(clippy::too_many_arguments)]
async fn run_owner_scan(
    scanner: ScanRepositoryUseCase,
    credentials: Option<(String, String)>,
    owner: &str,
    kind: OwnerKind,
    spec: &SearchSpec,
    clones_root: &Path,
    results_path: &Path,
    include: &[String],
    exclude: &[String],
    config: &Config,
    consolidate: bool,
) -> Result<usize> {
    let mut include = include.to_vec();
    include.extend(config.repos_to_check.iter().cloned());
    let mut exclude = exclude.to_vec();
    exclude.extend(config.repos_to_skip.iter().cloned());
    let filter = ScanFilter::new(include, exclude)?;

    let lister = Arc::new(GithubLister::new(credentials));
    let use_case = ScanOwnerUseCase::new(lister, scanner);

    let report = use_case
        .execute(owner, kind, spec, clones_root, &filter, consolidate)
        .await?;

    println!(
        "Scanned {} repositories of {}: {} record(s) written to {}",
        report.repositories_scanned,
        owner,
        report.records_written,
        results_path.display()
    );
    print_error_summary(&report.errors);

    Ok(report.records_written)
}

async fn fire_alerts(cli: &Cli, config: &Config, records_written: usize, results_path: &Path) {
    if cli.alert.is_empty() {
        return;
    }
    if records_written == 0 {
        info!("Results file is empty; skipping alerts");
        return;
    }

    let summary = ScanSummary {
        records_written,
        results_path: results_path.to_path_buf(),
    };

    for alert in &cli.alert {
        let outcome = match alert.as_str() {
            "pagerduty" => match config.pagerduty.as_ref() {
                Some(pd) => {
                    PagerdutyNotifier::new(&pd.api_key, &pd.service_key)
                        .notify(&summary)
                        .await
                }
                None => {
                    warn!("--alert pagerduty requires a 'pagerduty' section in the config file");
                    continue;
                }
            },
            "slack" => match config.slack.as_ref() {
                Some(slack) => {
                    let mut notifier = SlackNotifier::new(&slack.webhook_url, &slack.channel);
                    if let Some(sender) = &slack.sender_name {
                        notifier = notifier.with_sender_name(sender);
                    }
                    notifier.notify(&summary).await
                }
                None => {
                    warn!("--alert slack requires a 'slack' section in the config file");
                    continue;
                }
            },
            other => {
                warn!("Unknown alert plugin: {}", other);
                continue;
            }
        };

        if let Err(e) = outcome {
            warn!("Alert {} failed: {}", alert, e);
        }
    }
}

fn print_error_summary(errors: &[String]) {
    if !errors.is_empty() {
        info!("Summary of all errors: \n{}", errors.join("\n"));
    }
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
