#![cfg(test)]
//! Fake A2S servers and reply builders.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use a2scan_common::network::target::Target;
use a2scan_protocols::{self as a2s, ChallengeToken};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

pub struct InfoFixture {
    pub name: &'static [u8],
    pub map: &'static [u8],
    pub folder: &'static [u8],
    pub game: &'static [u8],
    pub app_id: u16,
    pub players: u8,
    pub max_players: u8,
    pub bots: u8,
    pub server_type: u8,
    pub environment: u8,
    pub visibility: u8,
    pub vac: u8,
}

impl Default for InfoFixture {
    fn default() -> Self {
        Self {
            name: b"Fake Server",
            map: b"c2m1_highway",
            folder: b"left4dead2",
            game: b"Left 4 Dead 2",
            app_id: 550,
            players: 0,
            max_players: 8,
            bots: 0,
            server_type: b'd',
            environment: b'l',
            visibility: 0,
            vac: 1,
        }
    }
}

pub fn info_reply(fixture: &InfoFixture) -> Vec<u8> {
    let mut buf = a2s::SINGLE_PACKET_HEADER.to_vec();
    buf.extend_from_slice(&[0x49, 0x11]);
    for s in [fixture.name, fixture.map, fixture.folder, fixture.game] {
        buf.extend_from_slice(s);
        buf.push(0);
    }
    buf.extend_from_slice(&fixture.app_id.to_le_bytes());
    buf.extend_from_slice(&[
        fixture.players,
        fixture.max_players,
        fixture.bots,
        fixture.server_type,
        fixture.environment,
        fixture.visibility,
        fixture.vac,
    ]);
    buf
}

pub fn player_reply(players: &[(u8, &str, i32)]) -> Vec<u8> {
    let mut buf = a2s::SINGLE_PACKET_HEADER.to_vec();
    buf.extend_from_slice(&[0x44, players.len() as u8]);
    for (index, name, score) in players {
        buf.push(*index);
        buf.extend_from_slice(name.as_bytes());
        buf.push(0);
        buf.extend_from_slice(&score.to_le_bytes());
        buf.extend_from_slice(&321.5f32.to_le_bytes());
    }
    buf
}

/// How a fake server reacts to requests.
#[derive(Clone)]
pub enum Behaviour {
    /// Counts requests, never answers.
    Silent,
    /// Answers info, challenge probe and player requests.
    Answer {
        info: Vec<u8>,
        challenge: [u8; 4],
        players: Vec<u8>,
        delay: Duration,
    },
}

impl Behaviour {
    pub fn info_only(info: Vec<u8>) -> Self {
        Behaviour::Answer {
            info,
            challenge: [0x11, 0x22, 0x33, 0x44],
            players: player_reply(&[]),
            delay: Duration::ZERO,
        }
    }
}

pub struct FakeServer {
    pub target: Target,
    requests: Arc<AtomicU32>,
    task: JoinHandle<()>,
}

impl FakeServer {
    pub async fn spawn(behaviour: Behaviour) -> anyhow::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let target = match socket.local_addr()? {
            SocketAddr::V4(v4) => Target::from(v4),
            SocketAddr::V6(v6) => anyhow::bail!("bound to unexpected address {v6}"),
        };
        let requests = Arc::new(AtomicU32::new(0));
        let counter = requests.clone();

        let task = tokio::spawn(async move {
            let mut buf = [0u8; 1400];
            while let Ok((len, client)) = socket.recv_from(&mut buf).await {
                counter.fetch_add(1, Ordering::SeqCst);
                let client = SocketAddr::from(([127, 0, 0, 1], client.port()));
                if let Some(reply) = respond(&behaviour, &buf[..len]).await {
                    let _ = socket.send_to(&reply, client).await;
                }
            }
        });

        Ok(Self {
            target,
            requests,
            task,
        })
    }

    pub fn requests(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for FakeServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn respond(behaviour: &Behaviour, request: &[u8]) -> Option<Vec<u8>> {
    let Behaviour::Answer {
        info,
        challenge,
        players,
        delay,
    } = behaviour
    else {
        return None;
    };

    let token = ChallengeToken::new(*challenge);
    if request == a2s::encode_info_request() {
        tokio::time::sleep(*delay).await;
        Some(info.clone())
    } else if request == a2s::encode_player_challenge_request() {
        let mut reply = a2s::SINGLE_PACKET_HEADER.to_vec();
        reply.push(0x41);
        reply.extend_from_slice(token.as_bytes());
        Some(reply)
    } else if request == a2s::encode_player_request(token) {
        Some(players.clone())
    } else {
        None
    }
}

#[tokio::test]
async fn fake_server_answers_only_known_requests() {
    let behaviour = Behaviour::info_only(info_reply(&InfoFixture::default()));

    let info = respond(&behaviour, &a2s::encode_info_request()).await;
    assert_eq!(info, Some(info_reply(&InfoFixture::default())));

    let challenge = respond(&behaviour, &a2s::encode_player_challenge_request())
        .await
        .unwrap();
    let token = ChallengeToken::from_reply(&challenge).unwrap();
    assert_eq!(token.as_bytes(), &[0x11, 0x22, 0x33, 0x44]);

    let players = respond(&behaviour, &a2s::encode_player_request(token)).await;
    assert_eq!(players, Some(player_reply(&[])));

    let wrong_token = a2s::encode_player_request(ChallengeToken::new([9; 4]));
    assert_eq!(respond(&behaviour, &wrong_token).await, None);
    assert_eq!(respond(&behaviour, b"\xFF\xFF\xFF\xFFV").await, None);
    assert_eq!(respond(&Behaviour::Silent, &a2s::encode_info_request()).await, None);
}
