//! Renderer of the W' battery icon asset.
//!
//! Main features:
//!  - Anti-aliased rasterization of rounded boxes
//!  - Alpha-over compositing in the linear color space
//!  - Deterministic PNG output
//!
#![deny(warnings)]

mod canvas;
mod color;
mod error;
mod geometry;
pub mod icon;
mod image;
mod path;
mod rasterize;
mod utils;

pub use color::RGBA;
pub use error::Error;
pub use geometry::Scalar;
pub use icon::{Icon, build_icon, render_icon, write_icon};
pub use image::{Image, ImageOwned};
pub use path::{FillRule, Path, PathBuilder};

use canvas::{Canvas, RoundedRect};
use color::{Color, LinColor};
use geometry::{BBox, EPSILON, Line, PI, Point};
use image::{ImageMut, Shape};
