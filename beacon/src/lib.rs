pub use beacon_core::{ClientId, LobbyCode, RelayError};

pub mod model {
    pub use beacon_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use beacon_server::*;
}
