pub mod deal;

pub use deal::Category;
