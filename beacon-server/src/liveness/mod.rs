mod liveness_monitor;

pub use liveness_monitor::*;
