//! Geometry used by the culling code

pub mod aabb;
pub mod frustum;

pub use aabb::Aabb;
pub use frustum::{Plane, Frustum, SectionFrustum, OpenFrustum};
