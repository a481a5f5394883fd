mod enumerate;
mod normalize;
mod scan_owner;
mod scan_repository;

pub use enumerate::*;
pub use normalize::*;
pub use scan_owner::*;
pub use scan_repository::*;
