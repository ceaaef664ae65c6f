// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Hand/Shake state machine per spec.md §6: the initiator sends `Hand`, the responder checks
// the genesis hash and nonce before replying `Shake`, and the initiator checks the same on the
// reply. Grounded on the teacher's `connection_manager`'s dialer/listener split
// (`listener_dialer.rs`) for the initiator/responder naming, with the noise-protocol exchange
// itself replaced by this plaintext message pair per SPEC_FULL.md §4.2.

use std::io::{Read, Write};

use mwc_core::types::Hash;
use rand::RngCore;

use crate::{
    error::HandshakeError,
    peer::PeerInfo,
    wire::{Hand, Message, PeerAddr, Shake},
};

/// Static parameters a node presents in every handshake it performs.
#[derive(Debug, Clone)]
pub struct HandshakeConfig {
    pub version: u32,
    pub capabilities: u32,
    pub genesis_hash: Hash,
    pub user_agent: String,
}

/// Picks the lower of two protocol versions, per spec.md §6 "narrow to the minimum". Returns
/// `NoCommonVersion` if the two advertise disjoint major ranges (major = version >> 16).
fn negotiate_version(ours: u32, theirs: u32) -> Result<u32, HandshakeError> {
    if (ours >> 16) != (theirs >> 16) {
        return Err(HandshakeError::NoCommonVersion { ours, theirs });
    }
    Ok(ours.min(theirs))
}

fn check_genesis(ours: &Hash, theirs: &Hash) -> Result<(), HandshakeError> {
    if ours != theirs {
        return Err(HandshakeError::GenesisMismatch {
            ours: hex::encode(ours),
            theirs: hex::encode(theirs),
        });
    }
    Ok(())
}

/// Performs the initiator side of the handshake: send `Hand`, read back `Shake`.
///
/// `our_nonce` is supplied by the caller (rather than generated here) so the connection manager
/// can detect a self-connection by checking whether it sees its own nonce come back from a
/// `Hand` it receives on a different, simultaneously-accepted socket.
pub fn perform_outbound<S: Read + Write>(
    stream: &mut S,
    config: &HandshakeConfig,
    our_nonce: u64,
    sender_addr: PeerAddr,
    receiver_addr: PeerAddr,
    total_difficulty: u64,
) -> Result<PeerInfo, HandshakeError> {
    let hand = Hand {
        version: config.version,
        capabilities: config.capabilities,
        nonce: our_nonce,
        total_difficulty,
        sender_addr,
        receiver_addr,
        user_agent: config.user_agent.clone(),
        genesis_hash: config.genesis_hash,
    };
    Message::Hand(hand).write_frame(stream)?;

    let reply = Message::read_frame(stream)?;
    let shake = match reply {
        Message::Shake(s) => s,
        other => return Err(HandshakeError::Malformed(format!("expected Shake, got {:?}", other.message_type()))),
    };

    check_genesis(&config.genesis_hash, &shake.genesis_hash)?;
    let version = negotiate_version(config.version, shake.version)?;

    Ok(PeerInfo::new(
        receiver_addr,
        shake.capabilities,
        shake.user_agent,
        version,
        shake.total_difficulty,
    ))
}

/// Performs the responder side of the handshake: read `Hand`, reply `Shake`.
///
/// `is_self_nonce` lets the caller consult whatever nonce bookkeeping it keeps (e.g. the set of
/// nonces this node has itself sent out) to detect and refuse a connection to itself, per
/// spec.md §6.
pub fn perform_inbound<S: Read + Write>(
    stream: &mut S,
    config: &HandshakeConfig,
    total_difficulty: u64,
    is_self_nonce: impl FnOnce(u64) -> bool,
) -> Result<PeerInfo, HandshakeError> {
    let received = Message::read_frame(stream)?;
    let hand = match received {
        Message::Hand(h) => h,
        other => return Err(HandshakeError::Malformed(format!("expected Hand, got {:?}", other.message_type()))),
    };

    if is_self_nonce(hand.nonce) {
        return Err(HandshakeError::SelfConnection(hand.nonce));
    }
    check_genesis(&config.genesis_hash, &hand.genesis_hash)?;
    let version = negotiate_version(config.version, hand.version)?;

    let shake = Shake {
        version,
        capabilities: config.capabilities,
        total_difficulty,
        user_agent: config.user_agent.clone(),
        genesis_hash: config.genesis_hash,
    };
    Message::Shake(shake).write_frame(stream)?;

    Ok(PeerInfo::new(
        hand.sender_addr,
        hand.capabilities,
        hand.user_agent,
        version,
        hand.total_difficulty,
    ))
}

/// Draws a fresh 64-bit handshake nonce.
pub fn random_nonce() -> u64 {
    rand::rngs::OsRng.next_u64()
}

#[cfg(test)]
mod tests {
    use std::{
        io::Cursor,
        net::{IpAddr, Ipv4Addr},
    };

    use super::*;

    fn addr(port: u16) -> PeerAddr {
        PeerAddr {
            ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
        }
    }

    fn config(genesis: Hash) -> HandshakeConfig {
        HandshakeConfig {
            version: 1,
            capabilities: 1,
            genesis_hash: genesis,
            user_agent: "mwc/0.1".into(),
        }
    }

    /// A duplex in-memory pipe good enough to run a synchronous request/reply handshake over:
    /// writes go to `out`, reads come from `in_`.
    struct Duplex {
        out: Vec<u8>,
        in_: Cursor<Vec<u8>>,
    }

    impl Read for Duplex {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.in_.read(buf)
        }
    }

    impl Write for Duplex {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.out.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn matching_genesis_hashes_complete_the_handshake() {
        let genesis = [1u8; 32];

        // Responder side: frame a Hand into its "incoming" buffer, then process it.
        let hand_bytes = {
            let hand = Hand {
                version: 1,
                capabilities: 1,
                nonce: 42,
                total_difficulty: 0,
                sender_addr: addr(1000),
                receiver_addr: addr(2000),
                user_agent: "mwc/0.1".into(),
                genesis_hash: genesis,
            };
            let mut buf = Vec::new();
            Message::Hand(hand).write_frame(&mut buf).unwrap();
            buf
        };
        let mut responder = Duplex {
            out: Vec::new(),
            in_: Cursor::new(hand_bytes),
        };
        let peer = perform_inbound(&mut responder, &config(genesis), 0, |_| false).unwrap();
        assert_eq!(peer.protocol_version, 1);
        assert_eq!(peer.user_agent, "mwc/0.1");

        // Initiator side: feed the Shake the responder just wrote back.
        let mut initiator = Duplex {
            out: Vec::new(),
            in_: Cursor::new(responder.out),
        };
        let peer = perform_outbound(&mut initiator, &config(genesis), 99, addr(2000), addr(1000), 0).unwrap();
        assert_eq!(peer.protocol_version, 1);
    }

    #[test]
    fn genesis_mismatch_is_rejected() {
        let hand = Hand {
            version: 1,
            capabilities: 1,
            nonce: 1,
            total_difficulty: 0,
            sender_addr: addr(1000),
            receiver_addr: addr(2000),
            user_agent: "mwc/0.1".into(),
            genesis_hash: [9u8; 32],
        };
        let mut buf = Vec::new();
        Message::Hand(hand).write_frame(&mut buf).unwrap();
        let mut responder = Duplex {
            out: Vec::new(),
            in_: Cursor::new(buf),
        };
        let err = perform_inbound(&mut responder, &config([1u8; 32]), 0, |_| false).unwrap_err();
        assert!(matches!(err, HandshakeError::GenesisMismatch { .. }));
    }

    #[test]
    fn self_connection_is_refused() {
        let hand = Hand {
            version: 1,
            capabilities: 1,
            nonce: 7,
            total_difficulty: 0,
            sender_addr: addr(1000),
            receiver_addr: addr(2000),
            user_agent: "mwc/0.1".into(),
            genesis_hash: [1u8; 32],
        };
        let mut buf = Vec::new();
        Message::Hand(hand).write_frame(&mut buf).unwrap();
        let mut responder = Duplex {
            out: Vec::new(),
            in_: Cursor::new(buf),
        };
        let err = perform_inbound(&mut responder, &config([1u8; 32]), 0, |nonce| nonce == 7).unwrap_err();
        assert!(matches!(err, HandshakeError::SelfConnection(7)));
    }
}
