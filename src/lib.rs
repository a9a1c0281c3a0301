//! Animated galaxy point-cloud background.
//!
//! A few thousand particles on logarithmic spiral arms, drawn as additive
//! sprites that spin faster while the host reports a job in progress and
//! tilt toward the pointer. The platform-agnostic core lives in
//! [`GalaxyLifecycle`]; the browser host is the `GalaxyField` wasm-bindgen
//! class (feature `web`) and the desktop host is the `galaxy_viewer` binary
//! (feature `native`).

pub mod animation;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod particles;
pub mod renderer;
pub mod time;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod viewer;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use animation::{AnimationUpdater, MeshTransform, MotionState};
pub use camera::GalaxyCamera;
pub use config::GalaxyConfig;
pub use error::{GalaxyError, GalaxyResult};
pub use input::{InputState, SurfaceSize};
pub use lifecycle::GalaxyLifecycle;
pub use particles::{generate_point_cloud, PointCloud, SpriteTexture};
pub use renderer::{FrameRenderer, FrameView, PointCloudRenderer};
pub use time::{Debouncer, FrameLimiter, Throttle};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::GalaxyField;
