mod anomaly;
mod common;
mod event;
mod raw;
mod report;
mod stats;

pub use anomaly::*;
pub use common::*;
pub use event::*;
pub use raw::*;
pub use report::*;
pub use stats::*;
