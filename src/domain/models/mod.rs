mod branch;
mod commit;
mod match_record;
mod predicate;
mod repository;
mod result_record;
mod search_spec;

pub use branch::*;
pub use commit::*;
pub use match_record::*;
pub use predicate::*;
pub use repository::*;
pub use result_record::*;
pub use search_spec::*;
