#![cfg(test)]
use std::time::{Duration, Instant};

use a2scan_common::config::QueryConfig;
use a2scan_common::server::{AntiCheat, Environment, ServerType, Visibility};
use a2scan_core::{FailureReason, QueryEngine};

use crate::util::{info_reply, player_reply, Behaviour, FakeServer, InfoFixture};

fn config(timeout_ms: u64, max_attempts: u32, fetch_players: bool) -> QueryConfig {
    QueryConfig {
        timeout: Duration::from_millis(timeout_ms),
        max_attempts,
        fetch_players,
    }
}

/// A single answering server yields a fully decoded record.
#[tokio::test]
async fn info_reply_is_decoded_into_record() {
    let fixture = InfoFixture {
        name: "Zürich Ünited".as_bytes(),
        app_id: 240,
        players: 0,
        max_players: 24,
        bots: 3,
        server_type: b'l',
        environment: b'w',
        visibility: 1,
        vac: 0,
        ..InfoFixture::default()
    };
    let server = FakeServer::spawn(Behaviour::info_only(info_reply(&fixture)))
        .await
        .unwrap();

    let outcome = QueryEngine::new(config(500, 1, true)).run(server.target).await;

    let record = outcome.record().expect("query should succeed");
    assert_eq!(record.name, "Zürich Ünited");
    assert_eq!(record.map, "c2m1_highway");
    assert_eq!(record.folder, "left4dead2");
    assert_eq!(record.game, "Left 4 Dead 2");
    assert_eq!(record.app_id, 240);
    assert_eq!(record.max_players, 24);
    assert_eq!(record.bots, 3);
    assert_eq!(record.server_type, ServerType::NonDedicated);
    assert_eq!(record.environment, Environment::Windows);
    assert_eq!(record.visibility, Visibility::Private);
    assert_eq!(record.anti_cheat, AntiCheat::Unsecured);

    // Nobody online: the player exchange is skipped even though it was wanted
    assert!(record.player_list.is_empty());
    assert_eq!(server.requests(), 1);
}

/// A target that never answers is tried exactly `max_attempts` times, each
/// waiting the full timeout.
#[tokio::test]
async fn silent_target_times_out_after_every_attempt() {
    let server = FakeServer::spawn(Behaviour::Silent).await.unwrap();

    let started = Instant::now();
    let outcome = QueryEngine::new(config(50, 3, false)).run(server.target).await;
    let elapsed = started.elapsed();

    assert!(matches!(
        outcome.failure_reason(),
        Some(FailureReason::Timeout { attempts: 3 })
    ));
    assert_eq!(server.requests(), 3);
    assert!(elapsed >= Duration::from_millis(150), "finished after {elapsed:?}");
    assert!(elapsed < Duration::from_millis(1_500), "finished after {elapsed:?}");
}

/// Info reply with two players, followed by a successful challenge exchange.
#[tokio::test]
async fn player_list_follows_the_challenge() {
    let info = info_reply(&InfoFixture {
        players: 2,
        ..InfoFixture::default()
    });
    let server = FakeServer::spawn(Behaviour::Answer {
        info,
        challenge: [0xDE, 0xAD, 0xBE, 0xEF],
        players: player_reply(&[(1, "Ellis", 1_250), (4, "Rochelle", -30)]),
        delay: Duration::ZERO,
    })
    .await
    .unwrap();

    let outcome = QueryEngine::new(config(500, 1, true)).run(server.target).await;

    let record = outcome.record().expect("query should succeed");
    assert_eq!(record.players, 2);
    assert_eq!(record.player_list.len(), 2);
    assert_eq!(record.player_list[0].index, 1);
    assert_eq!(record.player_list[0].name, "Ellis");
    assert_eq!(record.player_list[0].score, 1_250);
    assert_eq!(record.player_list[1].index, 4);
    assert_eq!(record.player_list[1].name, "Rochelle");
    assert_eq!(record.player_list[1].score, -30);

    // info, challenge probe, player request
    assert_eq!(server.requests(), 3);
}

#[tokio::test]
async fn latency_covers_server_delay() {
    let server = FakeServer::spawn(Behaviour::Answer {
        info: info_reply(&InfoFixture::default()),
        challenge: [1, 2, 3, 4],
        players: player_reply(&[]),
        delay: Duration::from_millis(40),
    })
    .await
    .unwrap();

    let outcome = QueryEngine::new(config(1_000, 1, false)).run(server.target).await;

    assert!(outcome.is_success());
    let latency = outcome.latency.unwrap();
    assert!(latency >= Duration::from_millis(40), "latency {latency:?}");
    assert!(outcome.latency_ms().unwrap() >= 40.0);
}
