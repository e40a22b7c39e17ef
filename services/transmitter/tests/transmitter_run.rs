//! End-to-end transmitter runs against a loopback receiver
//!
//! The receiver side reads one `\r`-terminated frame per connection,
//! answers `ACK`, and hands the frame back to the test.

use codec::{decrypt_content, validate_frame, CipherKey, EventCode, INVALID_ACCOUNT};
use network::{TcpClientConfig, TcpTransport};
use sia_transmitter::{
    Diagnostic, LoopController, RecordingSink, RngSource, TestCaseSelector, TransmitterError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use transmitter_config::TestCaseOverride;

const ACCOUNT: &str = "1111";
const KEY: &str = "0123456789ABCDEF";

/// Accepts connections forever, forwarding each frame received
async fn spawn_receiver() -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (frames_tx, frames_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let mut reader = BufReader::new(stream);
            let mut frame = Vec::new();
            reader.read_until(b'\r', &mut frame).await.unwrap();
            let _ = frames_tx.send(String::from_utf8(frame).unwrap());
            reader.get_mut().write_all(b"ACK").await.unwrap();
        }
    });

    (addr, frames_rx)
}

fn transport(addr: &str) -> TcpTransport {
    TcpTransport::from_config(TcpClientConfig {
        remote_address: addr.to_string(),
        connect_timeout: Duration::from_millis(500),
        response_limit: 100,
    })
    .unwrap()
}

fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}

#[tokio::test]
async fn scripted_run_sends_exactly_one_message_per_case() {
    let (addr, mut frames_rx) = spawn_receiver().await;
    let cases = vec![
        TestCaseOverride::default(),
        TestCaseOverride::crc(),
        TestCaseOverride::code(),
        TestCaseOverride::account(),
        TestCaseOverride::time(),
    ];
    let sink = Arc::new(RecordingSink::new());
    let selector = TestCaseSelector::scripted(cases, ACCOUNT, RngSource::seeded(11));
    let controller = LoopController::new(
        transport(&addr),
        selector,
        Arc::clone(&sink),
        None,
        Duration::from_millis(1),
    );

    let summary = controller.run().await.unwrap();
    assert_eq!(summary.messages_sent, 5);
    assert_eq!(summary.bytes_received, 5 * 3);

    let frames = drain(&mut frames_rx);
    assert_eq!(frames, sink.sent_messages());
    assert_eq!(frames.len(), 5);

    // Only the crc-flagged frame fails its own checksum
    let valid: Vec<bool> = frames.iter().map(|f| validate_frame(f).is_ok()).collect();
    assert_eq!(valid, vec![true, false, true, true, true]);

    assert!(frames[2].contains("/ZX000]"));
    assert!(frames[3].contains(&format!("L0#{INVALID_ACCOUNT}[")));
    assert!(frames[0].contains(&format!("L0#{ACCOUNT}[")));

    assert!(matches!(
        sink.events().last(),
        Some(Diagnostic::RunFinished { cancelled: false, .. })
    ));
}

#[tokio::test]
async fn encrypted_run_frames_decrypt_to_known_codes() {
    let (addr, mut frames_rx) = spawn_receiver().await;
    let key = CipherKey::new(KEY).unwrap();
    let selector = TestCaseSelector::scripted(
        vec![TestCaseOverride::default(); 3],
        ACCOUNT,
        RngSource::seeded(12),
    );
    let controller = LoopController::new(
        transport(&addr),
        selector,
        RecordingSink::new(),
        Some(key.clone()),
        Duration::ZERO,
    );

    controller.run().await.unwrap();

    for wire in drain(&mut frames_rx) {
        let frame = validate_frame(&wire).unwrap();
        assert!(frame.line().starts_with("\"*SIA-DCS\""));

        let ciphertext = frame.line().split_once('[').unwrap().1;
        let padded = decrypt_content(&key, ciphertext).unwrap();
        let template = &padded[padded.find('|').unwrap()..];
        let code = &template[6..8];
        assert!(code.parse::<EventCode>().is_ok(), "unexpected code in {template}");
        let zone = if code == "RP" { '0' } else { '1' };
        assert_eq!(template.chars().nth(4), Some(zone));
    }
}

#[tokio::test]
async fn randomized_run_stops_only_when_cancelled() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let receiver = tokio::spawn(async move {
        let mut stop = Some(stop_tx);
        let mut seen = 0usize;
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let mut reader = BufReader::new(stream);
            let mut frame = Vec::new();
            reader.read_until(b'\r', &mut frame).await.unwrap();
            seen += 1;
            if seen == 25 {
                if let Some(tx) = stop.take() {
                    let _ = tx.send(());
                }
            }
            reader.get_mut().write_all(b"ACK").await.unwrap();
        }
    });

    let sink = Arc::new(RecordingSink::new());
    let selector = TestCaseSelector::randomized(ACCOUNT, RngSource::seeded(13));
    let controller = LoopController::new(
        transport(&addr),
        selector,
        Arc::clone(&sink),
        None,
        Duration::from_millis(1),
    );

    let summary = controller
        .run_until(async {
            let _ = stop_rx.await;
        })
        .await
        .unwrap();
    receiver.abort();

    // The 25th message completes before the stop is observed
    assert_eq!(summary.messages_sent, 25);
    assert_eq!(sink.selected_cases().len(), 25);
    assert!(matches!(
        sink.events().last(),
        Some(Diagnostic::RunFinished { cancelled: true, .. })
    ));
}

#[tokio::test]
async fn connection_failure_aborts_the_run() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);

    let sink = Arc::new(RecordingSink::new());
    let selector = TestCaseSelector::scripted(
        vec![TestCaseOverride::default(); 3],
        ACCOUNT,
        RngSource::seeded(14),
    );
    let controller =
        LoopController::new(transport(&addr), selector, Arc::clone(&sink), None, Duration::ZERO);

    let err = controller.run().await.unwrap_err();
    assert!(matches!(err, TransmitterError::Transport(_)));
    assert!(sink.sent_messages().is_empty());
}
