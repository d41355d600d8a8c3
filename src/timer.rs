mod clock;
#[cfg(test)]
mod stub;

pub use clock::*;
#[cfg(test)]
pub use stub::*;

use tokio::time::Instant;

/// A timer measuring request durations.
pub trait Timer: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}
