//! Commands accepted once per tick

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Symbolic commands from the command source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Command {
    /// Start from the drill section (skipped if a drill is already held)
    StartDrill,
    /// Start directly with conveyor sections
    StartConveyor,
    /// Pull the top piston back and park
    Retract,
    /// Shut everything down immediately
    Stop,
    /// Stop sequencing without touching the hardware
    Pause,
    /// Clear the status log
    ResetLog,
}

impl Command {
    /// All commands in token order
    pub const ALL: [Command; 6] = [
        Command::StartDrill,
        Command::StartConveyor,
        Command::Retract,
        Command::Stop,
        Command::Pause,
        Command::ResetLog,
    ];

    /// Wire token for this command
    pub fn token(&self) -> &'static str {
        match self {
            Command::StartDrill => "start-drill-sequence",
            Command::StartConveyor => "start-conveyor-sequence",
            Command::Retract => "retract",
            Command::Stop => "stop",
            Command::Pause => "pause",
            Command::ResetLog => "reset-log",
        }
    }

    /// Parse a token (exact, case-sensitive match)
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.token() == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tokens() {
        for cmd in Command::ALL {
            assert_eq!(Command::parse(cmd.token()), Some(cmd));
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Command::parse("STOP"), None);
        assert_eq!(Command::parse(" stop"), None);
        assert_eq!(Command::parse("start"), None);
        assert_eq!(Command::parse(""), None);
    }
}
