pub mod application;
pub mod config;
pub mod connector;
pub mod domain;

pub use application::{
    CommitEnumerator, Notifier, OwnerScanReport, RepositoryLister, ResultNormalizer, ResultStore,
    ScanFilter, ScanOwnerUseCase, ScanReport, ScanRepositoryUseCase, ScanSummary,
    SearchTermSource, VcsClient,
};

pub use config::{Config, PagerdutyConfig, SlackConfig, VaultConfig};

pub use connector::{
    GitCli, GithubLister, InMemoryResultStore, JsonFileResultStore, PagerdutyNotifier,
    SlackNotifier, VaultSource,
};

pub use domain::{
    Branch, CommitId, CommitMeta, DomainError, MatchRecord, OwnerKind, ParsedMatch,
    RemoteRepository, RepositoryHandle, ResultRecord, SearchPredicate, SearchSpec,
    GITHUB_BLOB_URL_TEMPLATE,
};
