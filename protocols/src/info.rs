//! `A2S_INFO`: the primary server information query.

use a2scan_common::server::{AntiCheat, Environment, ServerInfoRecord, ServerType, Visibility};

use crate::DecodeError;
use crate::reader::Reader;

/// Kind byte of an info request (`'T'`).
const INFO_REQUEST_KIND: u8 = 0x54;

/// Header (4 bytes), kind byte and protocol version precede the payload.
pub const INFO_PAYLOAD_OFFSET: usize = 6;

const INFO_REQUEST: [u8; 25] = *b"\xFF\xFF\xFF\xFFTSource Engine Query\0";

pub fn encode_info_request() -> [u8; 25] {
    debug_assert_eq!(INFO_REQUEST[4], INFO_REQUEST_KIND);
    INFO_REQUEST
}

/// Decodes an info reply into a record with an empty player list.
///
/// Layout from [`INFO_PAYLOAD_OFFSET`]: name, map, folder and game as
/// null-terminated strings, then app id (`u16` LE), players, max players,
/// bots, server type, environment, visibility and VAC as single bytes.
pub fn decode_info_response(bytes: &[u8]) -> Result<ServerInfoRecord, DecodeError> {
    let mut reader = Reader::at(bytes, INFO_PAYLOAD_OFFSET)?;

    let name = reader.cstring()?;
    let map = reader.cstring()?;
    let folder = reader.cstring()?;
    let game = reader.cstring()?;

    let app_id = reader.u16_le()?;
    let players = reader.u8()?;
    let max_players = reader.u8()?;
    let bots = reader.u8()?;
    let server_type = ServerType::from_code(reader.u8()?);
    let environment = Environment::from_code(reader.u8()?);
    let visibility = Visibility::from_flag(reader.u8()?);
    let anti_cheat = AntiCheat::from_flag(reader.u8()?);

    Ok(ServerInfoRecord {
        name,
        map,
        folder,
        game,
        app_id,
        players,
        max_players,
        bots,
        server_type,
        environment,
        visibility,
        anti_cheat,
        player_list: Vec::new(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
