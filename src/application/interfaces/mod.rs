mod notifier;
mod repository_lister;
mod result_store;
mod search_term_source;
mod vcs_client;

pub use notifier::*;
pub use repository_lister::*;
pub use result_store::*;
pub use search_term_source::*;
pub use vcs_client::*;
