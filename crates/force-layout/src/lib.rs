pub mod body;
pub mod error;
pub mod forces;
pub mod params;
pub mod simulation;
pub mod viewport;

pub use body::{Body, Link, LinkSpec, NodeSpec};
pub use error::LayoutError;
pub use params::{ForceParams, Placement};
pub use simulation::{DragState, Simulation, StepReport};
pub use viewport::{MIN_VIEWPORT_EXTENT, Viewport};
