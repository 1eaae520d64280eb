//! Sides of the game

use serde::{Deserialize, Serialize};

/// A side in the pursuit game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Tries to avoid being found.
    Hider,
    /// Tries to find the hider.
    Seeker,
}

impl Role {
    pub fn opponent(self) -> Self {
        match self {
            Role::Hider => Role::Seeker,
            Role::Seeker => Role::Hider,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Hider
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Hider => write!(f, "hider"),
            Role::Seeker => write!(f, "seeker"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hider" | "h" => Ok(Role::Hider),
            "seeker" | "s" => Ok(Role::Seeker),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Role::Hider.opponent(), Role::Seeker);
        assert_eq!(Role::Seeker.opponent(), Role::Hider);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Hider".parse::<Role>(), Ok(Role::Hider));
        assert_eq!("s".parse::<Role>(), Ok(Role::Seeker));
        assert!("referee".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Seeker).unwrap(), "\"seeker\"");
        let r: Role = serde_json::from_str("\"hider\"").unwrap();
        assert_eq!(r, Role::Hider);
    }
}
