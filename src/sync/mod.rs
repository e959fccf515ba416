//! State synchronization.
//!
//! The `Synchronizer` is the authoritative side: it resolves Moves and
//! emits versioned updates. `ClientView` is the receiving side. Updates are
//! either a `FullUpdate` (replace everything) or a `StateDelta` (merge by
//! field presence), and a view applies deltas strictly in version order.

pub mod delta;
pub mod synchronizer;
pub mod view;

pub use delta::StateDelta;
pub use synchronizer::{Checkpoint, FullUpdate, Published, Step, Synchronizer};
pub use view::ClientView;
