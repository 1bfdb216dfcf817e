//! `A2S_PLAYER`: the two-step player list query.
//!
//! The client first sends a probe carrying the sentinel challenge
//! `FF FF FF FF`. The server answers with its real challenge token, which is
//! echoed back in the actual player request.

use a2scan_common::server::PlayerRecord;
use tracing::trace;

use crate::reader::Reader;
use crate::{DecodeError, SINGLE_PACKET_HEADER};

const PLAYER_REQUEST_KIND: u8 = 0x55;

/// Offset of the token in a challenge reply (after header and kind byte).
const CHALLENGE_OFFSET: usize = 5;

/// Offset of the player count in a player reply.
pub const PLAYER_PAYLOAD_OFFSET: usize = 5;

/// Bytes following a player's name, measured from the start of the score.
/// Only the leading 4-byte score is decoded.
const PLAYER_TAIL_LEN: usize = 8;
const SCORE_LEN: usize = 4;

/// Opaque 4-byte value the server requires before it answers a player query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeToken([u8; 4]);

impl ChallengeToken {
    /// Value that asks the server for a fresh challenge instead of players.
    pub const SENTINEL: Self = Self([0xFF; 4]);

    pub fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Takes the four bytes following the reply header verbatim.
    pub fn from_reply(bytes: &[u8]) -> Result<Self, DecodeError> {
        let token = bytes
            .get(CHALLENGE_OFFSET..CHALLENGE_OFFSET + 4)
            .ok_or(DecodeError::Truncated {
                offset: CHALLENGE_OFFSET,
                needed: 4,
                len: bytes.len(),
            })?;
        Ok(Self([token[0], token[1], token[2], token[3]]))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

pub fn encode_player_challenge_request() -> [u8; 9] {
    encode_player_request(ChallengeToken::SENTINEL)
}

pub fn encode_player_request(token: ChallengeToken) -> [u8; 9] {
    let mut packet = [0u8; 9];
    packet[..4].copy_from_slice(&SINGLE_PACKET_HEADER);
    packet[4] = PLAYER_REQUEST_KIND;
    packet[5..].copy_from_slice(token.as_bytes());
    packet
}

/// Decodes a player reply into records in wire order.
///
/// At most the advertised number of records is returned. Decoding stops
/// quietly at the first record that does not fit in the buffer; only a reply
/// too short to carry the count is an error.
pub fn decode_player_response(bytes: &[u8]) -> Result<Vec<PlayerRecord>, DecodeError> {
    let mut reader = Reader::at(bytes, PLAYER_PAYLOAD_OFFSET)?;
    let advertised = reader.u8()?;

    let mut players = Vec::with_capacity(usize::from(advertised));
    for _ in 0..advertised {
        match read_player(&mut reader) {
            Ok(player) => players.push(player),
            Err(e) => {
                trace!(decoded = players.len(), advertised, "player list cut short: {e}");
                break;
            }
        }
    }
    Ok(players)
}

fn read_player(reader: &mut Reader<'_>) -> Result<PlayerRecord, DecodeError> {
    let index = reader.u8()?;
    let name = reader.cstring()?;
    if reader.remaining() < PLAYER_TAIL_LEN {
        return Err(DecodeError::Truncated {
            offset: reader.position(),
            needed: PLAYER_TAIL_LEN,
            len: reader.remaining(),
        });
    }
    let score = reader.i32_le()?;
    reader.skip(PLAYER_TAIL_LEN - SCORE_LEN)?;

    Ok(PlayerRecord { index, name, score })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn player_reply(players: &[(u8, &str, i32)]) -> Vec<u8> {
        let mut buf = vec![0xFF, 0xFF, 0xFF, 0xFF, 0x44, players.len() as u8];
        for (index, name, score) in players {
            buf.push(*index);
            buf.extend_from_slice(name.as_bytes());
            buf.push(0);
            buf.extend_from_slice(&score.to_le_bytes());
            buf.extend_from_slice(&12.5f32.to_le_bytes());
        }
        buf
    }

    #[test]
    fn challenge_probe_bytes_are_fixed() {
        assert_eq!(
            encode_player_challenge_request(),
            [0xFF, 0xFF, 0xFF, 0xFF, 0x55, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn player_request_echoes_token_verbatim() {
        let reply = [0xFF, 0xFF, 0xFF, 0xFF, 0x41, 0x4B, 0xA1, 0x00, 0x7E];
        let token = ChallengeToken::from_reply(&reply).unwrap();
        assert_eq!(token, ChallengeToken::new([0x4B, 0xA1, 0x00, 0x7E]));
        assert_eq!(
            encode_player_request(token),
            [0xFF, 0xFF, 0xFF, 0xFF, 0x55, 0x4B, 0xA1, 0x00, 0x7E]
        );
    }

    #[test]
    fn short_challenge_reply_is_rejected() {
        let reply = [0xFF, 0xFF, 0xFF, 0xFF, 0x41, 0x01, 0x02];
        assert!(matches!(
            ChallengeToken::from_reply(&reply),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn decodes_records_in_wire_order() {
        let bytes = player_reply(&[(0, "alice", 12), (3, "bob", -4), (7, "", 0)]);
        let players = decode_player_response(&bytes).unwrap();

        assert_eq!(
            players,
            vec![
                PlayerRecord { index: 0, name: "alice".into(), score: 12 },
                PlayerRecord { index: 3, name: "bob".into(), score: -4 },
                PlayerRecord { index: 7, name: String::new(), score: 0 },
            ]
        );
    }

    #[test]
    fn empty_list() {
        let bytes = player_reply(&[]);
        assert_eq!(decode_player_response(&bytes), Ok(Vec::new()));
    }

    #[test]
    fn stops_at_incomplete_record() {
        let mut bytes = player_reply(&[(0, "alice", 12), (1, "bob", 5)]);
        // Cut into the second record's trailing bytes
        bytes.truncate(bytes.len() - 3);
        let players = decode_player_response(&bytes).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "alice");

        // Every shorter prefix past the count byte decodes without error
        for len in PLAYER_PAYLOAD_OFFSET + 1..bytes.len() {
            assert!(decode_player_response(&bytes[..len]).is_ok());
        }
    }

    #[test]
    fn advertised_count_bounds_the_records() {
        let mut bytes = player_reply(&[(0, "alice", 1), (1, "bob", 2)]);
        bytes[PLAYER_PAYLOAD_OFFSET] = 1;
        assert_eq!(decode_player_response(&bytes).unwrap().len(), 1);
    }

    #[test]
    fn reply_without_count_is_an_error() {
        assert!(decode_player_response(&[0xFF, 0xFF, 0xFF, 0xFF, 0x44]).is_err());
    }
}
