// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// The per-peer connection loop of spec.md §4.2: "terminate check, drain send queue, bounded
// deadline read, dispatch to processor, ping on silence, update rate meters/activity". Grounded
// on the thread-per-connection model SPEC_FULL.md §4.2 calls for in place of the teacher's
// tokio/yamux substream multiplexer; the id-keyed table / own-id-only back-edge is the design
// note of spec.md §9.

use std::{
    io,
    net::TcpStream,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        mpsc::{self, Receiver, SyncSender, TrySendError},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use crate::{
    error::ConnectionError,
    peer::PeerInfo,
    processor::{MessageProcessor, ProcessingOutcome},
    rate_limit::RateLimiter,
    wire::{BanReasonKind, Message},
};

const LOG_TARGET: &str = "c::comms::connection";

/// Opaque identifier a connection is known by; the connection thread carries only this, never a
/// handle back to the manager (spec.md §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

impl ConnectionId {
    pub(crate) fn next() -> Self {
        ConnectionId(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Tunables for the connection loop, all driven by spec.md §4.2's step list.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Socket read deadline per loop iteration; also the unit the silence timer is measured in.
    pub read_timeout: Duration,
    /// How long the connection may go without receiving anything before it sends a `Ping`.
    pub ping_interval: Duration,
    /// Outbound send queue capacity; `AddToSendQueue` fails with `SendQueueFull` past this.
    pub send_queue_capacity: usize,
    /// Maximum inbound messages allowed within `rate_limit_window`.
    pub rate_limit_max_messages: usize,
    pub rate_limit_window: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_millis(500),
            ping_interval: Duration::from_secs(30),
            send_queue_capacity: 256,
            rate_limit_max_messages: 200,
            rate_limit_window: Duration::from_secs(10),
        }
    }
}

/// Supplies the `(total_difficulty, height)` pair a `Ping` advertises; injected so this crate
/// doesn't need to depend on the chain store directly.
pub trait ChainTipProvider: Send + Sync {
    fn chain_tip(&self) -> (u64, u64);
}

/// An event the connection thread reports back to whatever owns the manager's id table.
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    Disconnected { id: ConnectionId, reason: String },
    Banned { id: ConnectionId, reason: BanReasonKind },
}

/// The manager-side record of a running connection: the send queue and a terminate flag are the
/// only things the manager may touch directly; everything else lives inside the thread.
pub struct ConnectionHandle {
    pub id: ConnectionId,
    pub peer: PeerInfo,
    sender: SyncSender<Message>,
    terminate: Arc<AtomicBool>,
    rate_limit_exceeded: Arc<AtomicBool>,
    join_handle: Option<JoinHandle<()>>,
}

impl ConnectionHandle {
    /// `AddToSendQueue`/`SendMsg` per spec.md §4.2: enqueues `message` for the connection thread
    /// to write out on its next loop iteration.
    pub fn add_to_send_queue(&self, message: Message) -> Result<(), ConnectionError> {
        self.sender.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => ConnectionError::SendQueueFull,
            TrySendError::Disconnected(_) => ConnectionError::Codec("connection thread has exited".into()),
        })
    }

    /// `Disconnect` per spec.md §4.2: asks the connection thread to terminate on its next
    /// terminate-check and detaches the thread (the thread exits on its own once it notices).
    pub fn disconnect(&mut self) {
        self.terminate.store(true, Ordering::SeqCst);
    }

    /// `ExceedsRateLimit` per spec.md §4.2: the last rate-limit verdict the connection thread
    /// recorded.
    pub fn exceeds_rate_limit(&self) -> bool {
        self.rate_limit_exceeded.load(Ordering::Relaxed)
    }

    pub fn join(&mut self) {
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
    }
}

/// Spawns the connection loop thread for an already-handshaken `stream`, returning the handle
/// the manager keeps in its id table.
pub fn spawn(
    stream: TcpStream,
    peer: PeerInfo,
    config: ConnectionConfig,
    processor: Arc<dyn MessageProcessor>,
    chain_tip: Arc<dyn ChainTipProvider>,
    events: SyncSender<ConnectionEvent>,
) -> ConnectionHandle {
    let id = ConnectionId::next();
    let (tx, rx) = mpsc::sync_channel(config.send_queue_capacity);
    let terminate = Arc::new(AtomicBool::new(false));
    let rate_limit_exceeded = Arc::new(AtomicBool::new(false));

    let thread_terminate = terminate.clone();
    let thread_rate_limit_exceeded = rate_limit_exceeded.clone();
    let join_handle = thread::spawn(move || {
        run_loop(
            id,
            stream,
            rx,
            thread_terminate,
            thread_rate_limit_exceeded,
            config,
            processor,
            chain_tip,
            events,
        );
    });

    ConnectionHandle {
        id,
        peer,
        sender: tx,
        terminate,
        rate_limit_exceeded,
        join_handle: Some(join_handle),
    }
}

fn run_loop(
    id: ConnectionId,
    mut stream: TcpStream,
    send_queue: Receiver<Message>,
    terminate: Arc<AtomicBool>,
    rate_limit_exceeded: Arc<AtomicBool>,
    config: ConnectionConfig,
    processor: Arc<dyn MessageProcessor>,
    chain_tip: Arc<dyn ChainTipProvider>,
    events: SyncSender<ConnectionEvent>,
) {
    if let Err(e) = stream.set_read_timeout(Some(config.read_timeout)) {
        warn!(target: LOG_TARGET, "connection {}: failed to set read timeout: {}", id.as_u64(), e);
    }
    let mut rate_limiter = RateLimiter::new(config.rate_limit_max_messages, config.rate_limit_window);
    let mut last_activity = Instant::now();

    loop {
        // 1. terminate check
        if terminate.load(Ordering::SeqCst) {
            debug!(target: LOG_TARGET, "connection {}: terminate requested", id.as_u64());
            break;
        }

        // 2. drain send queue
        let mut send_failed = false;
        while let Ok(message) = send_queue.try_recv() {
            if let Err(e) = message.write_frame(&mut stream) {
                warn!(target: LOG_TARGET, "connection {}: send failed: {}", id.as_u64(), e);
                let _ = events.send(ConnectionEvent::Disconnected {
                    id,
                    reason: e.to_string(),
                });
                send_failed = true;
                break;
            }
        }
        if send_failed {
            break;
        }

        // 3. bounded-deadline read
        match Message::read_frame(&mut stream) {
            Ok(message) => {
                last_activity = Instant::now();

                // 6. update rate meters/activity
                if rate_limiter.record_and_check(last_activity) {
                    rate_limit_exceeded.store(true, Ordering::Relaxed);
                    info!(target: LOG_TARGET, "connection {}: exceeded rate limit", id.as_u64());
                    let _ = events.send(ConnectionEvent::Disconnected {
                        id,
                        reason: "rate limit exceeded".into(),
                    });
                    break;
                }

                // 4. dispatch to processor
                match processor.process_message(id, message) {
                    ProcessingOutcome::Continue => {},
                    ProcessingOutcome::Disconnect => {
                        let _ = events.send(ConnectionEvent::Disconnected {
                            id,
                            reason: "processor requested disconnect".into(),
                        });
                        break;
                    },
                    ProcessingOutcome::Ban(reason) => {
                        let _ = events.send(ConnectionEvent::Banned { id, reason });
                        break;
                    },
                }
            },
            Err(e) if is_timeout(&e) => {
                // 5. ping on silence
                if last_activity.elapsed() >= config.ping_interval {
                    let (total_difficulty, height) = chain_tip.chain_tip();
                    let ping = Message::Ping { total_difficulty, height };
                    if let Err(e) = ping.write_frame(&mut stream) {
                        warn!(target: LOG_TARGET, "connection {}: ping failed: {}", id.as_u64(), e);
                        let _ = events.send(ConnectionEvent::Disconnected {
                            id,
                            reason: e.to_string(),
                        });
                        break;
                    }
                    last_activity = Instant::now();
                }
            },
            Err(e) => {
                warn!(target: LOG_TARGET, "connection {}: read failed: {}", id.as_u64(), e);
                let _ = events.send(ConnectionEvent::Disconnected {
                    id,
                    reason: e.to_string(),
                });
                break;
            },
        }
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}
