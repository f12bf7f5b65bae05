// crates/status-relay-server/tests/pool.rs
// ============================================================================
// Module: Pipeline Pool Tests
// Description: Queue bounds and completion reporting of the pipeline pool.
// Purpose: Validate non-blocking submission and per-job outcomes.
// Dependencies: status-relay-server, tokio
// ============================================================================

//! ## Overview
//! Uses a gated catalog to hold pipelines open while probing the queue.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::GatedCatalog;
use common::context;
use common::resource;
use status_relay_broker::ChannelSink;
use status_relay_core::Identity;
use status_relay_core::PipelineError;
use status_relay_core::PipelineJob;
use status_relay_core::RelayContext;
use status_relay_core::ResourceKind;
use status_relay_core::ResourceTypeCache;
use status_relay_core::SourceId;
use status_relay_core::StatusPublisher;
use status_relay_core::StatusSynthesizer;
use status_relay_core::SynthesisMode;
use status_relay_server::PipelinePool;
use status_relay_server::PoolConfig;
use status_relay_server::SubmitError;
use tokio::sync::mpsc;

fn job(source_id: &str) -> PipelineJob {
    PipelineJob {
        kind: ResourceKind::Cost,
        source_id: SourceId::new(source_id),
        identity: Identity::from("aWQ="),
    }
}

#[tokio::test]
async fn full_queue_rejects_without_waiting() {
    let catalog = Arc::new(GatedCatalog::closed(Vec::new()));
    let (context, _messages) = context(catalog, SynthesisMode::Random);
    let pool = PipelinePool::start(
        context,
        PoolConfig {
            queue_capacity: 2,
            max_in_flight: 1,
        },
        None,
    );

    // The dispatcher has not run yet on this single-threaded runtime.
    assert_eq!(pool.submit(job("1")), Ok(()));
    assert_eq!(pool.submit(job("2")), Ok(()));
    assert_eq!(pool.submit(job("3")), Err(SubmitError::QueueFull));
}

#[tokio::test(flavor = "multi_thread")]
async fn every_job_reports_an_outcome() {
    let catalog = Arc::new(GatedCatalog::open(vec![
        resource("10", "a", "1"),
        resource("20", "b", "1"),
    ]));
    let (context, mut messages) = context(Arc::clone(&catalog), SynthesisMode::Random);
    let (outcome_tx, mut outcomes) = mpsc::unbounded_channel();
    let pool = PipelinePool::start(
        context,
        PoolConfig {
            queue_capacity: 8,
            max_in_flight: 2,
        },
        Some(outcome_tx),
    );

    for source in ["a", "b", "missing"] {
        pool.submit(job(source)).expect("submit");
    }

    let mut published = BTreeSet::new();
    let mut failures = 0;
    for _ in 0..3 {
        let outcome = outcomes.recv().await.expect("outcome");
        match outcome.result {
            Ok(verdict) => {
                published.insert(verdict.resource_id().as_str().to_string());
            }
            Err(PipelineError::Resolve(_)) => {
                assert_eq!(outcome.job.source_id.as_str(), "missing");
                failures += 1;
            }
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }
    assert_eq!(published, BTreeSet::from(["10".to_string(), "20".to_string()]));
    assert_eq!(failures, 1);
    assert_eq!(catalog.call_count(), 3);

    let mut appended = 0;
    while messages.try_recv().is_ok() {
        appended += 1;
    }
    assert_eq!(appended, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn unresolved_kind_fails_without_catalog_query() {
    let catalog = Arc::new(GatedCatalog::open(Vec::new()));
    let (sender, _receiver) = mpsc::channel(4);
    let context = RelayContext::new(
        catalog.clone(),
        ResourceTypeCache::default(),
        StatusSynthesizer::default(),
        StatusPublisher::new(Arc::new(ChannelSink::new(sender))),
    );
    let (outcome_tx, mut outcomes) = mpsc::unbounded_channel();
    let pool = PipelinePool::start(
        context,
        PoolConfig {
            queue_capacity: 1,
            max_in_flight: 1,
        },
        Some(outcome_tx),
    );

    pool.submit(job("a")).expect("submit");
    let outcome = outcomes.recv().await.expect("outcome");
    assert!(matches!(
        outcome.result,
        Err(PipelineError::UnresolvedResourceType(ResourceKind::Cost))
    ));
    assert_eq!(catalog.call_count(), 0);
}
