pub mod sphere;
pub mod plane;
pub mod box_shape;

pub use box_shape::BoxGeometry;
pub use sphere::SphereGeometry;
pub use plane::PlaneGeometry;
