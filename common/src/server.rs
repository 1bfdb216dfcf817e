//! Decoded game server metadata.

use std::fmt;

/// What kind of process is answering queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerType {
    Dedicated,
    NonDedicated,
    /// SourceTV relay (proxy). Any code other than `'d'` or `'l'`.
    Relay,
}

impl ServerType {
    pub fn from_code(code: u8) -> Self {
        match code {
            b'd' => Self::Dedicated,
            b'l' => Self::NonDedicated,
            _ => Self::Relay,
        }
    }
}

impl fmt::Display for ServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Dedicated => "dedicated server",
            Self::NonDedicated => "non-dedicated server",
            Self::Relay => "SourceTV relay (proxy)",
        };
        f.write_str(label)
    }
}

/// Operating system the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Linux,
    Windows,
    /// Any code other than `'l'` or `'w'`.
    Mac,
}

impl Environment {
    pub fn from_code(code: u8) -> Self {
        match code {
            b'l' => Self::Linux,
            b'w' => Self::Windows,
            _ => Self::Mac,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Mac => "Mac",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn from_flag(flag: u8) -> Self {
        if flag != 0 { Self::Private } else { Self::Public }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Private => f.write_str("private"),
        }
    }
}

/// Valve Anti-Cheat status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AntiCheat {
    Unsecured,
    Secured,
}

impl AntiCheat {
    pub fn from_flag(flag: u8) -> Self {
        if flag != 0 { Self::Secured } else { Self::Unsecured }
    }
}

impl fmt::Display for AntiCheat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsecured => f.write_str("unsecured"),
            Self::Secured => f.write_str("secured"),
        }
    }
}

/// One entry of a player list reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    /// Slot as reported by the server. Not necessarily contiguous.
    pub index: u8,
    pub name: String,
    pub score: i32,
}

/// Decoded info reply, optionally enriched with the player list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfoRecord {
    pub name: String,
    pub map: String,
    pub folder: String,
    pub game: String,
    pub app_id: u16,
    pub players: u8,
    pub max_players: u8,
    pub bots: u8,
    pub server_type: ServerType,
    pub environment: Environment,
    pub visibility: Visibility,
    pub anti_cheat: AntiCheat,
    /// Empty unless `players > 0` and the player exchange was requested and
    /// succeeded.
    pub player_list: Vec<PlayerRecord>,
}

impl ServerInfoRecord {
    pub fn is_empty(&self) -> bool {
        self.players == 0
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
