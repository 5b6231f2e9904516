mod api;
mod app;
mod config;
mod liveness;
mod lobby;
mod signaling;
mod transport;

pub use api::*;
pub use app::*;
pub use config::*;
pub use liveness::*;
pub use lobby::*;
pub use signaling::*;
pub use transport::*;
