//! Rendering module for traitmix.
//!
//! Loads component layers, composites them in trait order and writes
//! flattened PNGs.

mod compositor;
mod layers;
mod png;
mod renderer;

pub use compositor::{composite_over, flatten, over};
pub use layers::{load_layer, LayerSet};
pub use png::write_png;
pub use renderer::LayerRenderer;
