//! Client error surfacing when the peer answers off-contract.
//!
//! The peer side here is a raw transport end rather than a
//! `serve_connection` loop, so it can send responses a conforming
//! service never would.

use std::thread;

use wifihal_core::{
    ChipController, ClientError, FrameHeader, InstanceId, Response, StatusCode, Transport,
};

#[test]
fn mismatched_response_variant_is_surfaced() {
    let (client_end, mut peer) = Transport::mem_pair();
    let answer = thread::spawn(move || {
        // Reset expects Ack; answer with a status response instead.
        let (header, _) = peer.recv().unwrap();
        let body = Response::Status {
            status: StatusCode::Success,
        }
        .encode()
        .unwrap();
        peer.send(FrameHeader::response(header.seq, body.len() as u32), &body)
            .unwrap();
    });

    let mut controller = ChipController::new(client_end);
    let err = controller.reset(&InstanceId::new("wifi0")).unwrap_err();
    match err {
        ClientError::UnexpectedResponse { operation } => assert_eq!(operation, "reset"),
        other => panic!("unexpected error: {other}"),
    }
    answer.join().unwrap();
}

#[test]
fn foreign_sequence_number_is_surfaced() {
    let (client_end, mut peer) = Transport::mem_pair();
    let answer = thread::spawn(move || {
        peer.recv().unwrap();
        let body = Response::Ack.encode().unwrap();
        // Echo a sequence number the client never issued.
        peer.send(FrameHeader::response(42, body.len() as u32), &body)
            .unwrap();
    });

    let mut controller = ChipController::new(client_end);
    let err = controller.reset(&InstanceId::new("wifi0")).unwrap_err();
    match err {
        ClientError::SequenceMismatch { expected, actual } => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 42);
        }
        other => panic!("unexpected error: {other}"),
    }
    answer.join().unwrap();
}

#[test]
fn success_without_a_handle_is_surfaced() {
    let (client_end, mut peer) = Transport::mem_pair();
    let answer = thread::spawn(move || {
        let (header, _) = peer.recv().unwrap();
        let body = Response::Chip {
            status: StatusCode::Success,
            chip: None,
        }
        .encode()
        .unwrap();
        peer.send(FrameHeader::response(header.seq, body.len() as u32), &body)
            .unwrap();
    });

    let mut controller = ChipController::new(client_end);
    let err = controller.acquire(&InstanceId::new("wifi0")).unwrap_err();
    assert!(matches!(err, ClientError::HandleAbsent), "got: {err}");
    answer.join().unwrap();
}
