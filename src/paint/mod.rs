//! Incremental stroke compositing.
//!
//! Pointer samples flow through the pieces in this order:
//!
//! 1. [`PaintSession`] checks that a brush is armed and the pointer is down
//! 2. [`EventQueue`] serializes the samples
//! 3. [`StrokeTracker`] unions each sample's disc into the stroke
//! 4. [`RegionStore`] merges the finished stroke on pointer-up
//!
//! ## Module Structure
//!
//! - [`host`] - MapHost capability trait implemented by the host map
//! - [`queue`] - FIFO sample queue with a single consumer
//! - [`stroke`] - In-progress stroke geometry
//! - [`region`] - Committed region geometry
//! - [`session`] - Mode state machine and pointer session handling

pub mod host;
pub mod queue;
pub mod region;
pub mod session;
pub mod stroke;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests;

pub use host::MapHost;
pub use queue::EventQueue;
pub use region::RegionStore;
pub use session::{PaintEvent, PaintSession, ToolMode};
pub use stroke::StrokeTracker;
