mod connection;
mod ws_connection;

pub use connection::*;
pub use ws_connection::*;
