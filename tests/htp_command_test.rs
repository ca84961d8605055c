//! Command helper tests - validation and wire format.

use tokio::io::{AsyncBufReadExt, BufReader, DuplexStream, WriteHalf};

use hecks_bridge::htp::{HtpController, HtpError};

type Harness = (
    HtpController<WriteHalf<DuplexStream>>,
    tokio::io::Lines<BufReader<tokio::io::ReadHalf<DuplexStream>>>,
    WriteHalf<DuplexStream>,
);

/// Controller plus a line reader over what it writes to the "engine".
fn harness() -> Harness {
    let (bridge_io, engine_io) = tokio::io::duplex(1024);
    let (bridge_read, bridge_write) = tokio::io::split(bridge_io);
    let controller = HtpController::new(bridge_read, bridge_write);
    let (engine_read, engine_write) = tokio::io::split(engine_io);
    let engine_lines = BufReader::new(engine_read).lines();
    (controller, engine_lines, engine_write)
}

#[tokio::test]
async fn invalid_arguments_fail_without_writing() {
    let (mut controller, mut engine_lines, _engine_write) = harness();

    let err = controller.command_genmove("x").await.unwrap_err();
    assert!(matches!(err, HtpError::InvalidColor(_)));

    let err = controller.command_play("R", "z99").await.unwrap_err();
    assert!(matches!(err, HtpError::InvalidVertex(_)));

    let err = controller.command_play("x", "a1").await.unwrap_err();
    assert!(matches!(err, HtpError::InvalidColor(_)));

    // The first thing on the wire is the quit below: the rejected
    // commands wrote nothing.
    controller.command_quit().await.unwrap();
    let first = engine_lines.next_line().await.unwrap().unwrap();
    assert_eq!(first, "quit");
}

#[tokio::test]
async fn command_helpers_write_the_grammar() {
    let (mut controller, mut engine_lines, _engine_write) = harness();

    controller.command_genmove("r").await.unwrap();
    controller.command_play("b", "a5").await.unwrap();
    controller.command_clearboard().await.unwrap();
    controller.send_command("boardsize 10\n").await.unwrap();

    assert_eq!(engine_lines.next_line().await.unwrap().unwrap(), "genmove R");
    assert_eq!(engine_lines.next_line().await.unwrap().unwrap(), "play B a5");
    assert_eq!(engine_lines.next_line().await.unwrap().unwrap(), "clearboard");
    assert_eq!(
        engine_lines.next_line().await.unwrap().unwrap(),
        "boardsize 10"
    );
}

#[tokio::test]
async fn sentinel_vertices_are_playable() {
    let (mut controller, mut engine_lines, _engine_write) = harness();

    controller.command_play("R", "pass").await.unwrap();
    controller.command_play("B", "resign").await.unwrap();

    assert_eq!(engine_lines.next_line().await.unwrap().unwrap(), "play R pass");
    assert_eq!(
        engine_lines.next_line().await.unwrap().unwrap(),
        "play B resign"
    );
}

#[tokio::test]
async fn writes_after_engine_death_report_a_stream_error() {
    let (mut controller, engine_lines, engine_write) = harness();

    drop(engine_lines);
    drop(engine_write);

    let err = controller.command_genmove("R").await.unwrap_err();
    assert!(matches!(err, HtpError::Stream(_)));
}
