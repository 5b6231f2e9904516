use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque lobby code chosen by the host. Never parsed.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct LobbyCode(String);

impl LobbyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for LobbyCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LobbyCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for LobbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
