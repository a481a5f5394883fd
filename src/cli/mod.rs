use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a single repository (clone URL or local path)
    Repo {
        source: String,

        /// Organization name recorded for a local-path source
        #[arg(short, long)]
        organization: Option<String>,
    },

    /// Scan every public repository of a GitHub organization
    Org {
        name: String,

        /// Scan only these repositories
        #[arg(long)]
        include: Vec<String>,

        /// Scan everything except these repositories
        #[arg(long)]
        exclude: Vec<String>,
    },

    /// Scan every public repository of a GitHub user
    User {
        name: String,

        /// Scan only these repositories
        #[arg(long)]
        include: Vec<String>,

        /// Scan everything except these repositories
        #[arg(long)]
        exclude: Vec<String>,
    },
}
