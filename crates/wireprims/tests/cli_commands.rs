#![cfg(feature = "cli")]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::process::Command;
use std::thread;

fn wireprims() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wireprims"));
    cmd.arg("--log-level").arg("error");
    cmd
}

#[test]
fn encode_prints_wire_bytes() {
    let output = wireprims()
        .args(["--format", "pretty", "encode"])
        .args(["--value", "i32:-1", "--value", "u16:1", "--value", "str:ok"])
        .output()
        .expect("encode should run");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    assert_eq!(stdout.trim(), "FF FF FF FF 00 01 00 02 6F 6B");
}

#[test]
fn encode_json_reports_length() {
    let output = wireprims()
        .args(["--format", "json", "encode", "--value", "f64:1"])
        .output()
        .expect("encode should run");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["length"], 8);
    assert_eq!(json["hex"], "3F F0 00 00 00 00 00 00");
}

#[test]
fn send_and_read_typed_replies() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let port = listener.local_addr().expect("local addr should exist").port();

    let server = thread::spawn(move || {
        let (mut peer, _) = listener.accept().expect("accept should succeed");
        let mut request = [0u8; 4];
        peer.read_exact(&mut request).expect("request should arrive");
        let n = i32::from_be_bytes(request);

        let mut reply = Vec::new();
        reply.extend_from_slice(&(f64::from(n) * 1.5).to_bits().to_be_bytes());
        let text = format!("got {n}");
        reply.extend_from_slice(&(text.len() as u16).to_be_bytes());
        reply.extend_from_slice(text.as_bytes());
        peer.write_all(&reply).expect("reply should send");
    });

    let output = wireprims()
        .args(["--format", "json", "send", "127.0.0.1"])
        .arg(port.to_string())
        .args(["--value", "i32:4", "--expect", "f64", "--expect", "str"])
        .args(["--io-timeout", "5s"])
        .output()
        .expect("send should run");
    server.join().expect("server thread should complete");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(
        json,
        serde_json::json!([
            { "kind": "f64", "value": 6.0 },
            { "kind": "str", "value": "got 4" }
        ])
    );
}

#[test]
fn peer_close_before_reply_is_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let port = listener.local_addr().expect("local addr should exist").port();

    let server = thread::spawn(move || {
        let (mut peer, _) = listener.accept().expect("accept should succeed");
        peer.write_all(&[0x00, 0x00, 0x01]).expect("partial reply should send");
    });

    let output = wireprims()
        .args(["send", "127.0.0.1"])
        .arg(port.to_string())
        .args(["--expect", "i32"])
        .output()
        .expect("send should run");
    server.join().expect("server thread should complete");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("connection closed by peer after 3 of 4 bytes"), "{stderr}");
}

#[test]
fn refused_connection_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
        listener.local_addr().expect("local addr should exist").port()
    };

    let output = wireprims()
        .args(["send", "127.0.0.1"])
        .arg(port.to_string())
        .args(["--value", "u8:1"])
        .output()
        .expect("send should run");

    assert_eq!(output.status.code(), Some(3));
}
