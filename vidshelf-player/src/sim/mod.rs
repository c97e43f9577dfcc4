//! In-process stand-ins for the browser: a scrolling grid viewport that
//! reports intersections, and media surfaces that take a while to start.

pub mod geometry;
pub mod surface;
pub mod viewport;

pub use geometry::GridGeometry;
pub use surface::{SimulatedBackend, SimulatedSurface};
pub use viewport::SimulatedViewport;
