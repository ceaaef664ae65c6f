// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// End-to-end exercise of the connection loop (spec.md §4.2) over a real loopback TCP socket:
// handshake, a dispatched message reaching the processor, and a clean disconnect.

use std::{
    net::{IpAddr, Ipv4Addr, TcpListener, TcpStream},
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc,
        Arc,
        Mutex,
    },
    thread,
    time::Duration,
};

use mwc_comms::{
    connection::{ChainTipProvider, ConnectionConfig, ConnectionEvent},
    manager::ConnectionManager,
    processor::{MessageProcessor, ProcessingOutcome},
    wire::{Message, PeerAddr},
    ConnectionId,
    HandshakeConfig,
};

struct FixedTip;

impl ChainTipProvider for FixedTip {
    fn chain_tip(&self) -> (u64, u64) {
        (0, 0)
    }
}

struct RecordingProcessor {
    received: Mutex<Vec<Message>>,
    count: AtomicUsize,
}

impl RecordingProcessor {
    fn new() -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            count: AtomicUsize::new(0),
        }
    }
}

impl MessageProcessor for RecordingProcessor {
    fn process_message(&self, _connection_id: ConnectionId, message: Message) -> ProcessingOutcome {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(message);
        ProcessingOutcome::Continue
    }
}

fn fast_config() -> ConnectionConfig {
    ConnectionConfig {
        read_timeout: Duration::from_millis(20),
        ping_interval: Duration::from_secs(60),
        send_queue_capacity: 16,
        rate_limit_max_messages: 1000,
        rate_limit_window: Duration::from_secs(10),
    }
}

fn manager(genesis: [u8; 32], processor: Arc<RecordingProcessor>) -> (ConnectionManager, mpsc::Receiver<ConnectionEvent>) {
    let (events_tx, events_rx) = mpsc::sync_channel(16);
    let handshake_config = HandshakeConfig {
        version: 1,
        capabilities: 1,
        genesis_hash: genesis,
        user_agent: "mwc/0.1".into(),
    };
    let manager = ConnectionManager::new(handshake_config, fast_config(), processor, Arc::new(FixedTip), events_tx);
    (manager, events_rx)
}

#[test]
fn handshake_then_inbound_message_reaches_processor() {
    let genesis = [3u8; 32];
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let listen_addr = listener.local_addr().unwrap();

    let client_processor = Arc::new(RecordingProcessor::new());
    let server_processor = Arc::new(RecordingProcessor::new());
    let (client_manager, _client_events) = manager(genesis, client_processor);
    let (server_manager, _server_events) = manager(genesis, server_processor.clone());

    let server_thread = thread::spawn(move || {
        let (socket, peer_addr) = listener.accept().unwrap();
        server_manager
            .create_inbound(socket, peer_addr.ip(), 0, |_| false)
            .expect("inbound handshake should succeed");
        // Keep the manager (and its spawned thread) alive long enough to process the message.
        thread::sleep(Duration::from_millis(200));
        server_processor.count.load(Ordering::SeqCst)
    });

    thread::sleep(Duration::from_millis(20));
    let client_socket = TcpStream::connect(listen_addr).unwrap();
    let sender_addr = PeerAddr {
        ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: client_socket.local_addr().unwrap().port(),
    };
    let receiver_addr = PeerAddr {
        ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: listen_addr.port(),
    };
    let connection_id = client_manager
        .create_outbound(client_socket, 1234, sender_addr, receiver_addr, 0)
        .expect("outbound handshake should succeed");

    client_manager
        .send_msg(connection_id, Message::Ping { total_difficulty: 5, height: 1 })
        .expect("send should succeed while the queue has room");

    let processed = server_thread.join().unwrap();
    assert_eq!(processed, 1);
}

#[test]
fn mismatched_genesis_hash_refuses_the_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let listen_addr = listener.local_addr().unwrap();

    let server_processor = Arc::new(RecordingProcessor::new());
    let (server_manager, _server_events) = manager([1u8; 32], server_processor);
    let (client_manager, _client_events) = manager([2u8; 32], Arc::new(RecordingProcessor::new()));

    let server_thread = thread::spawn(move || {
        let (socket, peer_addr) = listener.accept().unwrap();
        server_manager.create_inbound(socket, peer_addr.ip(), 0, |_| false)
    });

    thread::sleep(Duration::from_millis(20));
    let client_socket = TcpStream::connect(listen_addr).unwrap();
    let sender_addr = PeerAddr {
        ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: client_socket.local_addr().unwrap().port(),
    };
    let receiver_addr = PeerAddr {
        ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: listen_addr.port(),
    };
    let result = client_manager.create_outbound(client_socket, 1, sender_addr, receiver_addr, 0);
    assert!(result.is_err());
    assert!(server_thread.join().unwrap().is_err());
}
