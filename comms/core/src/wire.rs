// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// The 11-byte frame header and message enum of spec.md §6, encoded with the
// `ConsensusEncoding`/`ConsensusDecoding` trait pair from `mwc_core::consensus` — the same
// `io::Read`/`io::Write`-based codec the teacher's `transaction_kernel.rs` uses for
// `TransactionKernel`, reused here verbatim as the wire codec abstraction rather than pulling in
// a protobuf toolchain, per SPEC_FULL.md §3.

use std::{
    convert::TryInto,
    io::{self, Read, Write},
};

use mwc_core::{
    blocks::BlockHeader,
    consensus::{ConsensusDecoding, ConsensusEncoding},
    transactions::{AggregateBody, TransactionKernel},
    types::Hash,
};

pub const MAGIC: [u8; 2] = *b"MW";
/// `{magic: 2, type: 1, length: 8}` per spec.md §6.
pub const FRAME_HEADER_LEN: usize = 11;
/// Defensive upper bound on a single frame's payload, so a corrupt/hostile length field can't
/// force an unbounded allocation before the payload is even read.
pub const MAX_FRAME_LEN: u64 = 32 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    Hand = 0,
    Shake = 1,
    Ping = 2,
    Pong = 3,
    GetPeerAddrs = 4,
    PeerAddrs = 5,
    GetHeaders = 6,
    Headers = 7,
    GetBlock = 8,
    Block = 9,
    Transaction = 10,
    StemTransaction = 11,
    TxHashSetRequest = 12,
    TxHashSetArchive = 13,
    BanReason = 14,
    GetCompactBlock = 15,
    CompactBlock = 16,
    KernelDataRequest = 17,
    KernelDataResponse = 18,
}

impl MessageType {
    fn from_u8(tag: u8) -> Result<Self, io::Error> {
        use MessageType::*;
        Ok(match tag {
            0 => Hand,
            1 => Shake,
            2 => Ping,
            3 => Pong,
            4 => GetPeerAddrs,
            5 => PeerAddrs,
            6 => GetHeaders,
            7 => Headers,
            8 => GetBlock,
            9 => Block,
            10 => Transaction,
            11 => StemTransaction,
            12 => TxHashSetRequest,
            13 => TxHashSetArchive,
            14 => BanReason,
            15 => GetCompactBlock,
            16 => CompactBlock,
            17 => KernelDataRequest,
            18 => KernelDataResponse,
            other => return Err(io::Error::new(io::ErrorKind::InvalidData, format!("unknown message type {}", other))),
        })
    }
}

/// `BanReason` per spec.md §7's machine-readable reason enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BanReasonKind {
    BadBlock = 0,
    BadTransaction = 1,
    BadCompactBlock = 2,
    BadTxHashSet = 3,
    ManualBan = 4,
    FraudHeight = 5,
    BadHandshake = 6,
}

impl ConsensusEncoding for BanReasonKind {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(&[*self as u8])
    }
}

impl ConsensusDecoding for BanReasonKind {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        use BanReasonKind::*;
        Ok(match buf[0] {
            0 => BadBlock,
            1 => BadTransaction,
            2 => BadCompactBlock,
            3 => BadTxHashSet,
            4 => ManualBan,
            5 => FraudHeight,
            6 => BadHandshake,
            other => return Err(io::Error::new(io::ErrorKind::InvalidData, format!("unknown ban reason {}", other))),
        })
    }
}

/// A peer socket address, encoded as a tagged v4/v6 octet string plus port — avoids pulling in
/// `multiaddr` for the plain-TCP transport this crate uses (see SPEC_FULL.md §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerAddr {
    pub ip: std::net::IpAddr,
    pub port: u16,
}

impl ConsensusEncoding for PeerAddr {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        match self.ip {
            std::net::IpAddr::V4(v4) => {
                writer.write_all(&[4u8])?;
                writer.write_all(&v4.octets())?;
            },
            std::net::IpAddr::V6(v6) => {
                writer.write_all(&[6u8])?;
                writer.write_all(&v6.octets())?;
            },
        }
        self.port.consensus_encode(writer)
    }
}

impl ConsensusDecoding for PeerAddr {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut tag = [0u8; 1];
        reader.read_exact(&mut tag)?;
        let ip = match tag[0] {
            4 => {
                let mut buf = [0u8; 4];
                reader.read_exact(&mut buf)?;
                std::net::IpAddr::V4(std::net::Ipv4Addr::from(buf))
            },
            6 => {
                let mut buf = [0u8; 16];
                reader.read_exact(&mut buf)?;
                std::net::IpAddr::V6(std::net::Ipv6Addr::from(buf))
            },
            other => return Err(io::Error::new(io::ErrorKind::InvalidData, format!("unknown ip tag {}", other))),
        };
        let port = u16::consensus_decode(reader)?;
        Ok(PeerAddr { ip, port })
    }
}

impl ConsensusEncoding for u16 {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(&self.to_be_bytes())
    }
}

impl ConsensusDecoding for u16 {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }
}

impl ConsensusEncoding for u32 {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(&self.to_be_bytes())
    }
}

impl ConsensusDecoding for u32 {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }
}

fn encode_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<(), io::Error> {
    (bytes.len() as u64).consensus_encode(writer)?;
    writer.write_all(bytes)
}

fn decode_bytes<R: Read>(reader: &mut R) -> Result<Vec<u8>, io::Error> {
    let len = u64::consensus_decode(reader)?;
    if len > MAX_FRAME_LEN {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "byte vector too long"));
    }
    let mut buf = vec![0u8; len as usize];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn encode_string<W: Write>(writer: &mut W, s: &str) -> Result<(), io::Error> {
    encode_bytes(writer, s.as_bytes())
}

fn decode_string<R: Read>(reader: &mut R) -> Result<String, io::Error> {
    let bytes = decode_bytes(reader)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn encode_vec<W: Write, T: ConsensusEncoding>(writer: &mut W, items: &[T]) -> Result<(), io::Error> {
    (items.len() as u64).consensus_encode(writer)?;
    for item in items {
        item.consensus_encode(writer)?;
    }
    Ok(())
}

fn decode_vec<R: Read, T: ConsensusDecoding>(reader: &mut R) -> Result<Vec<T>, io::Error> {
    let len = u64::consensus_decode(reader)?;
    if len > MAX_FRAME_LEN {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "vector too long"));
    }
    let mut out = Vec::with_capacity(len as usize);
    for _ in 0..len {
        out.push(T::consensus_decode(reader)?);
    }
    Ok(out)
}

/// `Hand` per spec.md §6: the handshake initiator's greeting.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    pub version: u32,
    pub capabilities: u32,
    pub nonce: u64,
    pub total_difficulty: u64,
    pub sender_addr: PeerAddr,
    pub receiver_addr: PeerAddr,
    pub user_agent: String,
    pub genesis_hash: Hash,
}

/// `Shake` per spec.md §6: the handshake responder's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Shake {
    pub version: u32,
    pub capabilities: u32,
    pub total_difficulty: u64,
    pub user_agent: String,
    pub genesis_hash: Hash,
}

/// Every message the P2P wire of spec.md §6 can carry. Variant order mirrors `MessageType`'s
/// tag assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Hand(Hand),
    Shake(Shake),
    Ping { total_difficulty: u64, height: u64 },
    Pong { total_difficulty: u64, height: u64 },
    GetPeerAddrs { capabilities: u32 },
    PeerAddrs(Vec<PeerAddr>),
    GetHeaders { locator: Vec<Hash> },
    Headers(Vec<BlockHeader>),
    GetBlock { hash: Hash },
    Block(Box<mwc_core::blocks::FullBlock>),
    Transaction(AggregateBody),
    StemTransaction(AggregateBody),
    TxHashSetRequest { height: u64 },
    TxHashSetArchive { height: u64, bytes: Vec<u8> },
    BanReason(BanReasonKind),
    GetCompactBlock { hash: Hash },
    CompactBlock { header: BlockHeader, kernel_hashes: Vec<Hash> },
    KernelDataRequest { start_height: u64, end_height: u64 },
    KernelDataResponse { kernels: Vec<TransactionKernel> },
}

impl Message {
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::Hand(_) => MessageType::Hand,
            Message::Shake(_) => MessageType::Shake,
            Message::Ping { .. } => MessageType::Ping,
            Message::Pong { .. } => MessageType::Pong,
            Message::GetPeerAddrs { .. } => MessageType::GetPeerAddrs,
            Message::PeerAddrs(_) => MessageType::PeerAddrs,
            Message::GetHeaders { .. } => MessageType::GetHeaders,
            Message::Headers(_) => MessageType::Headers,
            Message::GetBlock { .. } => MessageType::GetBlock,
            Message::Block(_) => MessageType::Block,
            Message::Transaction(_) => MessageType::Transaction,
            Message::StemTransaction(_) => MessageType::StemTransaction,
            Message::TxHashSetRequest { .. } => MessageType::TxHashSetRequest,
            Message::TxHashSetArchive { .. } => MessageType::TxHashSetArchive,
            Message::BanReason(_) => MessageType::BanReason,
            Message::GetCompactBlock { .. } => MessageType::GetCompactBlock,
            Message::CompactBlock { .. } => MessageType::CompactBlock,
            Message::KernelDataRequest { .. } => MessageType::KernelDataRequest,
            Message::KernelDataResponse { .. } => MessageType::KernelDataResponse,
        }
    }

    fn encode_payload(&self, writer: &mut Vec<u8>) -> Result<(), io::Error> {
        match self {
            Message::Hand(h) => {
                h.version.consensus_encode(writer)?;
                h.capabilities.consensus_encode(writer)?;
                h.nonce.consensus_encode(writer)?;
                h.total_difficulty.consensus_encode(writer)?;
                h.sender_addr.consensus_encode(writer)?;
                h.receiver_addr.consensus_encode(writer)?;
                encode_string(writer, &h.user_agent)?;
                h.genesis_hash.consensus_encode(writer)
            },
            Message::Shake(s) => {
                s.version.consensus_encode(writer)?;
                s.capabilities.consensus_encode(writer)?;
                s.total_difficulty.consensus_encode(writer)?;
                encode_string(writer, &s.user_agent)?;
                s.genesis_hash.consensus_encode(writer)
            },
            Message::Ping { total_difficulty, height } | Message::Pong { total_difficulty, height } => {
                total_difficulty.consensus_encode(writer)?;
                height.consensus_encode(writer)
            },
            Message::GetPeerAddrs { capabilities } => capabilities.consensus_encode(writer),
            Message::PeerAddrs(addrs) => encode_vec(writer, addrs),
            Message::GetHeaders { locator } => encode_vec(writer, locator),
            Message::Headers(headers) => encode_vec(writer, headers),
            Message::GetBlock { hash } | Message::GetCompactBlock { hash } => hash.consensus_encode(writer),
            Message::Block(block) => block.header.consensus_encode(writer).and_then(|_| block.body.consensus_encode(writer)),
            Message::Transaction(body) | Message::StemTransaction(body) => body.consensus_encode(writer),
            Message::TxHashSetRequest { height } => height.consensus_encode(writer),
            Message::TxHashSetArchive { height, bytes } => {
                height.consensus_encode(writer)?;
                encode_bytes(writer, bytes)
            },
            Message::BanReason(reason) => reason.consensus_encode(writer),
            Message::CompactBlock { header, kernel_hashes } => {
                header.consensus_encode(writer)?;
                encode_vec(writer, kernel_hashes)
            },
            Message::KernelDataRequest { start_height, end_height } => {
                start_height.consensus_encode(writer)?;
                end_height.consensus_encode(writer)
            },
            Message::KernelDataResponse { kernels } => encode_vec(writer, kernels),
        }
    }

    fn decode_payload<R: Read>(message_type: MessageType, reader: &mut R) -> Result<Self, io::Error> {
        Ok(match message_type {
            MessageType::Hand => Message::Hand(Hand {
                version: u32::consensus_decode(reader)?,
                capabilities: u32::consensus_decode(reader)?,
                nonce: u64::consensus_decode(reader)?,
                total_difficulty: u64::consensus_decode(reader)?,
                sender_addr: PeerAddr::consensus_decode(reader)?,
                receiver_addr: PeerAddr::consensus_decode(reader)?,
                user_agent: decode_string(reader)?,
                genesis_hash: Hash::consensus_decode(reader)?,
            }),
            MessageType::Shake => Message::Shake(Shake {
                version: u32::consensus_decode(reader)?,
                capabilities: u32::consensus_decode(reader)?,
                total_difficulty: u64::consensus_decode(reader)?,
                user_agent: decode_string(reader)?,
                genesis_hash: Hash::consensus_decode(reader)?,
            }),
            MessageType::Ping => Message::Ping {
                total_difficulty: u64::consensus_decode(reader)?,
                height: u64::consensus_decode(reader)?,
            },
            MessageType::Pong => Message::Pong {
                total_difficulty: u64::consensus_decode(reader)?,
                height: u64::consensus_decode(reader)?,
            },
            MessageType::GetPeerAddrs => Message::GetPeerAddrs {
                capabilities: u32::consensus_decode(reader)?,
            },
            MessageType::PeerAddrs => Message::PeerAddrs(decode_vec(reader)?),
            MessageType::GetHeaders => Message::GetHeaders {
                locator: decode_vec(reader)?,
            },
            MessageType::Headers => Message::Headers(decode_vec(reader)?),
            MessageType::GetBlock => Message::GetBlock {
                hash: Hash::consensus_decode(reader)?,
            },
            MessageType::Block => Message::Block(Box::new(mwc_core::blocks::FullBlock::new(
                BlockHeader::consensus_decode(reader)?,
                AggregateBody::consensus_decode(reader)?,
            ))),
            MessageType::Transaction => Message::Transaction(AggregateBody::consensus_decode(reader)?),
            MessageType::StemTransaction => Message::StemTransaction(AggregateBody::consensus_decode(reader)?),
            MessageType::TxHashSetRequest => Message::TxHashSetRequest {
                height: u64::consensus_decode(reader)?,
            },
            MessageType::TxHashSetArchive => Message::TxHashSetArchive {
                height: u64::consensus_decode(reader)?,
                bytes: decode_bytes(reader)?,
            },
            MessageType::BanReason => Message::BanReason(BanReasonKind::consensus_decode(reader)?),
            MessageType::GetCompactBlock => Message::GetCompactBlock {
                hash: Hash::consensus_decode(reader)?,
            },
            MessageType::CompactBlock => Message::CompactBlock {
                header: BlockHeader::consensus_decode(reader)?,
                kernel_hashes: decode_vec(reader)?,
            },
            MessageType::KernelDataRequest => Message::KernelDataRequest {
                start_height: u64::consensus_decode(reader)?,
                end_height: u64::consensus_decode(reader)?,
            },
            MessageType::KernelDataResponse => Message::KernelDataResponse {
                kernels: decode_vec(reader)?,
            },
        })
    }

    /// Writes the full frame (header + payload) to `writer`.
    pub fn write_frame<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        let mut payload = Vec::new();
        self.encode_payload(&mut payload)?;
        writer.write_all(&MAGIC)?;
        writer.write_all(&[self.message_type() as u8])?;
        (payload.len() as u64).consensus_encode(writer)?;
        writer.write_all(&payload)
    }

    /// Reads one full frame (header + payload) from `reader`.
    pub fn read_frame<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut header = [0u8; FRAME_HEADER_LEN];
        reader.read_exact(&mut header)?;
        if header[0..2] != MAGIC {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "bad frame magic"));
        }
        let message_type = MessageType::from_u8(header[2])?;
        let length = u64::from_be_bytes(header[3..11].try_into().expect("8-byte slice"));
        if length > MAX_FRAME_LEN {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "frame payload too long"));
        }
        let mut payload = vec![0u8; length as usize];
        reader.read_exact(&mut payload)?;
        Self::decode_payload(message_type, &mut &payload[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(message: &Message) -> Message {
        let mut buf = Vec::new();
        message.write_frame(&mut buf).unwrap();
        assert_eq!(&buf[0..2], &MAGIC);
        Message::read_frame(&mut &buf[..]).unwrap()
    }

    #[test]
    fn ping_pong_round_trip() {
        let ping = Message::Ping { total_difficulty: 42, height: 7 };
        assert_eq!(round_trip(&ping), ping);
    }

    #[test]
    fn hand_round_trips_with_peer_addrs() {
        let hand = Message::Hand(Hand {
            version: 2,
            capabilities: 1,
            nonce: 99,
            total_difficulty: 1000,
            sender_addr: PeerAddr {
                ip: "127.0.0.1".parse().unwrap(),
                port: 9999,
            },
            receiver_addr: PeerAddr {
                ip: "::1".parse().unwrap(),
                port: 9998,
            },
            user_agent: "mwc/0.1".into(),
            genesis_hash: [7u8; 32],
        });
        assert_eq!(round_trip(&hand), hand);
    }

    #[test]
    fn ban_reason_round_trips() {
        let msg = Message::BanReason(BanReasonKind::BadHandshake);
        assert_eq!(round_trip(&msg), msg);
    }

    #[test]
    fn get_headers_with_empty_locator_round_trips() {
        let msg = Message::GetHeaders { locator: vec![] };
        assert_eq!(round_trip(&msg), msg);
    }

    #[test]
    fn oversized_length_field_is_rejected_before_allocating() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC);
        buf.push(MessageType::Ping as u8);
        buf.extend_from_slice(&(MAX_FRAME_LEN + 1).to_be_bytes());
        let err = Message::read_frame(&mut &buf[..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn block_message_round_trips() {
        let header = BlockHeader {
            height: 1,
            previous_hash: [0u8; 32],
            timestamp: 0,
            output_mmr_root: [0u8; 32],
            rangeproof_mmr_root: [0u8; 32],
            kernel_mmr_root: [0u8; 32],
            total_kernel_offset: Default::default(),
            total_difficulty: 1,
            pow_data: vec![1, 2, 3],
        };
        let block = mwc_core::blocks::FullBlock::new(header, AggregateBody::default());
        let msg = Message::Block(Box::new(block.clone()));
        let round_tripped = round_trip(&msg);
        match round_tripped {
            Message::Block(b) => assert_eq!(b.header.height, block.header.height),
            _ => panic!("expected Block"),
        }
    }
}
