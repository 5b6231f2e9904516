mod lobby;
mod lobby_registry;

pub use lobby::*;
pub use lobby_registry::*;
