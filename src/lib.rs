pub mod error;
pub mod math;
pub mod polygon;
pub mod ring;
pub mod simplify;

pub use error::{Result, SimplisError};
pub use polygon::{simplify_polygon, Polygon};
pub use simplify::{simplify_ring, SimplifyParams};
