// Service exports
pub mod cache;
pub mod weights;

pub use cache::{CacheError, CacheKey, ResultCache};
pub use weights::WeightStore;
