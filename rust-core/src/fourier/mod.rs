//! Magnitude spectrum engine with cached DFT tables

pub mod cache;
pub mod method;
pub mod scale;
pub mod transform;

pub use cache::{CacheEntry, TableCache};
pub use method::DftMethod;
pub use scale::{
    complex_to_norm_scale, log_scale, log_scale_custom, log_scale_custom_in_place,
    log_scale_in_place, LOG_SCALE_DIVISOR, LOG_SCALE_THRESHOLD,
};
pub use transform::Transform;
