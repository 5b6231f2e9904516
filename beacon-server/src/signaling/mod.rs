mod signal_router;
mod ws_handler;

pub use signal_router::*;
pub use ws_handler::*;
