pub mod deal;
pub mod query;
#[cfg(test)]
pub mod test_utils;

pub use deal::{DealItem, Deals};
pub use query::DealQuery;
