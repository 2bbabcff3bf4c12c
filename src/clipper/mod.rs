//! Frustum clipping.
//!
//! - [`frustum`]: camera-space planes used to reject whole faces before
//!   projection.
//! - [`polygon`]: homogeneous clip-space polygon clipping against the six
//!   `±coord <= w` planes, run on every face that survives.

pub mod frustum;
pub mod polygon;

pub use frustum::{Frustum, FrustumPlane, Plane};
pub use polygon::{ClipVertex, Polygon, MAX_POLYGON_VERTICES};
