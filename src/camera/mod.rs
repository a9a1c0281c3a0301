pub mod galaxy_camera;

pub use galaxy_camera::{bob_height, GalaxyCamera};
