pub mod clock;
pub mod content;
pub mod media;
pub mod status;

pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::FixedClock;
pub use media::RequestContext;
pub use status::{Status, TimeRange};
