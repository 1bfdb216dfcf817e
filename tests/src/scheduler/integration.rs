#![cfg(test)]
use std::time::Duration;

use a2scan_common::config::{ConfigError, QueryConfig, ScanConfig};
use a2scan_core::scheduler;
use a2scan_core::FailureReason;

use crate::util::{info_reply, Behaviour, FakeServer, InfoFixture};

fn scan_config(timeout_ms: u64, max_attempts: u32, max_concurrency: usize) -> ScanConfig {
    ScanConfig {
        query: QueryConfig {
            timeout: Duration::from_millis(timeout_ms),
            max_attempts,
            fetch_players: false,
        },
        max_concurrency,
    }
}

/// Two targets: one answers within 10ms, the other never does.
#[tokio::test]
async fn mixed_batch_yields_one_success_and_one_timeout() {
    let answering = FakeServer::spawn(Behaviour::Answer {
        info: info_reply(&InfoFixture::default()),
        challenge: [0; 4],
        players: Vec::new(),
        delay: Duration::from_millis(5),
    })
    .await
    .unwrap();
    let silent = FakeServer::spawn(Behaviour::Silent).await.unwrap();

    let outcomes = scheduler::run_all(
        vec![answering.target, silent.target],
        &scan_config(200, 1, 2),
        None,
    )
    .await
    .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].target, answering.target);
    assert_eq!(outcomes[1].target, silent.target);

    let record = outcomes[0].record().expect("first target answers");
    assert!(record.player_list.is_empty());
    assert!(outcomes[0].latency.unwrap() > Duration::ZERO);

    assert!(matches!(
        outcomes[1].failure_reason(),
        Some(FailureReason::Timeout { attempts: 1 })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn outcomes_follow_input_order_across_many_servers() {
    let mut servers = Vec::new();
    for i in 0..12u8 {
        let behaviour = if i % 3 == 0 {
            Behaviour::Silent
        } else {
            Behaviour::Answer {
                info: info_reply(&InfoFixture {
                    players: i,
                    ..InfoFixture::default()
                }),
                challenge: [0; 4],
                players: Vec::new(),
                delay: Duration::from_millis(u64::from(12 - i) * 3),
            }
        };
        servers.push(FakeServer::spawn(behaviour).await.unwrap());
    }
    let targets: Vec<_> = servers.iter().map(|s| s.target).collect();

    let outcomes = scheduler::run_all(targets.clone(), &scan_config(150, 1, 4), None)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), targets.len());
    for (i, (outcome, target)) in outcomes.iter().zip(&targets).enumerate() {
        assert_eq!(outcome.target, *target);
        if i % 3 == 0 {
            assert!(!outcome.is_success(), "target {i} should time out");
        } else {
            assert_eq!(outcome.record().map(|r| r.players), Some(i as u8));
        }
    }
}

#[tokio::test]
async fn invalid_configuration_sends_nothing() {
    let server = FakeServer::spawn(Behaviour::Silent).await.unwrap();

    let result = scheduler::run_all(vec![server.target], &scan_config(100, 1, 0), None).await;
    assert!(matches!(result, Err(ConfigError::NonPositiveConcurrency)));

    let result = scheduler::run_all(vec![server.target], &scan_config(0, 1, 1), None).await;
    assert!(matches!(result, Err(ConfigError::NonPositiveTimeout)));

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(server.requests(), 0);
}
