// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! Cryptographic primitive aliases, in the style of `tari_common_types::types`: every other
//! module imports `Commitment`/`PublicKey`/`Signature` from here rather than reaching into
//! `tari_crypto` directly, so the curve/commitment-scheme choice is a one-line change.

use std::io::{self, Read, Write};

use blake2::{digest::Digest, Blake2b};
pub use tari_crypto::{
    commitment::HomomorphicCommitmentFactory,
    keys::{PublicKey as PublicKeyTrait, SecretKey as SecretKeyTrait},
    ristretto::{
        pedersen::{PedersenCommitment, PedersenCommitmentFactory},
        RistrettoPublicKey,
        RistrettoSchnorr,
        RistrettoSecretKey,
    },
};
use tari_utilities::ByteArray;

use crate::consensus::{ConsensusDecoding, ConsensusEncoding};

fn io_err<E: std::fmt::Display>(e: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e.to_string())
}

impl ConsensusEncoding for Commitment {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(self.as_bytes())
    }
}

impl ConsensusDecoding for Commitment {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut buf = [0u8; 32];
        reader.read_exact(&mut buf)?;
        Commitment::from_bytes(&buf).map_err(io_err)
    }
}

impl ConsensusEncoding for PrivateKey {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(self.as_bytes())
    }
}

impl ConsensusDecoding for PrivateKey {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut buf = [0u8; 32];
        reader.read_exact(&mut buf)?;
        PrivateKey::from_bytes(&buf).map_err(io_err)
    }
}

impl ConsensusEncoding for PublicKey {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(self.as_bytes())
    }
}

impl ConsensusDecoding for PublicKey {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut buf = [0u8; 32];
        reader.read_exact(&mut buf)?;
        PublicKey::from_bytes(&buf).map_err(io_err)
    }
}

/// `Signature` is encoded as `public_nonce ‖ signature_scalar`, both 32-byte Ristretto field
/// elements, matching the `(R, s)` Schnorr pair `RistrettoSchnorr` wraps.
impl ConsensusEncoding for Signature {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(self.get_public_nonce().as_bytes())?;
        writer.write_all(self.get_signature().as_bytes())
    }
}

impl ConsensusDecoding for Signature {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut nonce_buf = [0u8; 32];
        reader.read_exact(&mut nonce_buf)?;
        let public_nonce = PublicKey::from_bytes(&nonce_buf).map_err(io_err)?;
        let mut sig_buf = [0u8; 32];
        reader.read_exact(&mut sig_buf)?;
        let signature = PrivateKey::from_bytes(&sig_buf).map_err(io_err)?;
        Ok(Signature::new(public_nonce, signature))
    }
}

pub type PrivateKey = RistrettoSecretKey;
pub type PublicKey = RistrettoPublicKey;
pub type Commitment = PedersenCommitment;
pub type CommitmentFactory = PedersenCommitmentFactory;
/// The excess signature carried by a transaction kernel.
pub type Signature = RistrettoSchnorr;

/// A 32-byte domain-separated digest: block hashes, header hashes, signature challenges.
pub type Hash = [u8; 32];

/// Hashes `label` together with each part in order, domain-separating the digest by the label.
/// `tari_crypto`'s `DomainSeparatedHasher` does the equivalent with a compile-time hash-domain
/// type; this crate uses an explicit runtime label instead, since no hash-domain macro crate is
/// part of the dependency set pulled in from the teacher.
pub fn domain_hash(label: &str, parts: &[&[u8]]) -> Hash {
    let mut hasher = Blake2b::new();
    hasher.update(label.as_bytes());
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..32]);
    out
}

/// `CommitTransparent(v)`: a commitment to `v` with a zero blinding factor, per spec.md §3.
pub fn commit_transparent(factory: &CommitmentFactory, value: u64) -> Commitment {
    factory.commit_value(&PrivateKey::default(), value)
}

pub fn public_key_bytes(pk: &PublicKey) -> Vec<u8> {
    pk.as_bytes().to_vec()
}
