pub mod sphere;

pub use sphere::{EllipsoidOptions, create_ellipsoid};
