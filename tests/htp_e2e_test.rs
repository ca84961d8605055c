//! End-to-end controller tests - scripted engine on the far side of the
//! pipes.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, WriteHalf};
use tokio::time::timeout;

use hecks_bridge::htp::{HtpController, HtpError};
use hecks_bridge::types::Vertex;

const WAIT: Duration = Duration::from_secs(2);

type Harness = (HtpController<WriteHalf<DuplexStream>>, DuplexStream);

fn harness() -> Harness {
    let (bridge_io, engine_io) = tokio::io::duplex(1024);
    let (bridge_read, bridge_write) = tokio::io::split(bridge_io);
    let controller = HtpController::new(bridge_read, bridge_write);
    (controller, engine_io)
}

#[tokio::test]
async fn move_and_failure_arrive_on_their_own_queues_in_order() {
    let (mut controller, mut engine_io) = harness();

    engine_io
        .write_all(b"=1 pass\n? no legal moves\n")
        .await
        .unwrap();

    let mv = timeout(WAIT, controller.next_move()).await.unwrap();
    assert_eq!(mv, Some(Vertex::Pass));

    let line = timeout(WAIT, controller.next_failure()).await.unwrap();
    assert_eq!(line.as_deref(), Some("? no legal moves"));

    // No cross-contamination left behind.
    assert_eq!(controller.try_next_move(), None);
    assert_eq!(controller.try_next_failure(), None);
}

#[tokio::test]
async fn genmove_returns_the_correlated_move() {
    let (mut controller, engine_io) = harness();

    // Engine: answer the first genmove with a move.
    let engine = tokio::spawn(async move {
        let (read, mut write) = tokio::io::split(engine_io);
        let mut lines = BufReader::new(read).lines();

        let line = lines.next_line().await.unwrap().unwrap();
        assert_eq!(line, "genmove R");
        write.write_all(b"=1 c4\n").await.unwrap();
    });

    let mv = timeout(WAIT, controller.genmove("R")).await.unwrap().unwrap();
    assert_eq!(mv, Vertex::from_str("c4").unwrap());

    engine.await.unwrap();
}

#[tokio::test]
async fn genmove_surfaces_an_engine_failure() {
    let (mut controller, engine_io) = harness();

    let engine = tokio::spawn(async move {
        let (read, mut write) = tokio::io::split(engine_io);
        let mut lines = BufReader::new(read).lines();

        let _ = lines.next_line().await.unwrap();
        write.write_all(b"? out of data\n").await.unwrap();
    });

    let err = timeout(WAIT, controller.genmove("B"))
        .await
        .unwrap()
        .unwrap_err();
    assert!(matches!(err, HtpError::Engine(line) if line == "? out of data"));

    engine.await.unwrap();
}

#[tokio::test]
async fn genmove_reports_closure_when_the_engine_dies_silently() {
    let (mut controller, engine_io) = harness();

    // Engine: swallow the command and hang up.
    let engine = tokio::spawn(async move {
        let (read, _write) = tokio::io::split(engine_io);
        let mut lines = BufReader::new(read).lines();
        let _ = lines.next_line().await.unwrap();
    });

    let err = timeout(WAIT, controller.genmove("R"))
        .await
        .unwrap()
        .unwrap_err();
    assert!(matches!(err, HtpError::Closed));

    engine.await.unwrap();
}

#[tokio::test]
async fn closed_resolves_when_the_engine_hangs_up() {
    let (mut controller, engine_io) = harness();

    assert!(!controller.is_closed());
    drop(engine_io);

    timeout(WAIT, controller.closed()).await.unwrap();
    assert!(controller.is_closed());

    // Queues end rather than block forever.
    assert_eq!(timeout(WAIT, controller.next_move()).await.unwrap(), None);
    assert_eq!(timeout(WAIT, controller.next_failure()).await.unwrap(), None);
}

#[tokio::test]
async fn buffered_moves_survive_engine_death() {
    let (mut controller, mut engine_io) = harness();

    engine_io.write_all(b"=1 e19\n").await.unwrap();
    engine_io.flush().await.unwrap();
    drop(engine_io);

    timeout(WAIT, controller.closed()).await.unwrap();

    // The line that made it out before the hangup is still delivered.
    let mv = timeout(WAIT, controller.next_move()).await.unwrap();
    assert_eq!(mv, Some(Vertex::from_str("e19").unwrap()));
    assert_eq!(timeout(WAIT, controller.next_move()).await.unwrap(), None);
}
