//! # A2S Wire Codec
//!
//! Pure encoders and decoders for the Source engine server query protocol:
//! the info query and the two-step (challenge, then players) player query.
//! No sockets live here; callers own the I/O.
//!
//! Every request starts with the 4-byte `FF FF FF FF` single-packet header
//! followed by a one byte message kind.

mod error;
mod info;
mod player;
mod reader;

pub use error::DecodeError;
pub use info::{INFO_PAYLOAD_OFFSET, decode_info_response, encode_info_request};
pub use player::{
    ChallengeToken, PLAYER_PAYLOAD_OFFSET, decode_player_response,
    encode_player_challenge_request, encode_player_request,
};
pub use reader::read_cstring;

/// Largest datagram a server sends in reply to a query.
pub const MAX_PACKET_SIZE: usize = 1400;

/// Prefix of every non-split packet.
pub const SINGLE_PACKET_HEADER: [u8; 4] = [0xFF; 4];
