pub mod exclusion;
pub mod list;

pub use exclusion::{ANY, QueryCountExclusion};
pub use list::ExclusionList;
