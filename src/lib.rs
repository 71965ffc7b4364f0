#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod app;
pub mod camera;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod renderer;
pub mod store;
pub mod utils;

pub use app::HatApp;
pub use camera::OrbitCamera;
pub use config::{HatConfig, HatType, RawHatConfig, hex_to_rgb, rgb_to_hex, validate};
pub use errors::{MillinerError, Result};
pub use geometry::{Mesh, generate};
pub use renderer::{Renderer, RendererSettings};
pub use store::{ConfigStore, FileStore};
