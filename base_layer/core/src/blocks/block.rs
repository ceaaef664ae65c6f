// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// `FullBlock` mirrors the `{header, body}` pairing of `StriderDM-tari/.../blocks/block.rs`'s
// `Block`. The "already validated" latch named alongside it in spec.md §3 is kept out of this
// type (see spec.md §9's design note) and lives instead as process-local state on
// `validation::BlockValidator`.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use super::block_header::BlockHeader;
use crate::{
    consensus::{ConsensusDecoding, ConsensusEncoding},
    transactions::AggregateBody,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullBlock {
    pub header: BlockHeader,
    pub body: AggregateBody,
}

impl FullBlock {
    pub fn new(header: BlockHeader, body: AggregateBody) -> Self {
        Self { header, body }
    }

    pub fn height(&self) -> u64 {
        self.header.height
    }

    pub fn hash(&self) -> crate::types::Hash {
        self.header.hash()
    }
}

impl ConsensusEncoding for FullBlock {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        self.header.consensus_encode(writer)?;
        self.body.consensus_encode(writer)
    }
}

impl ConsensusDecoding for FullBlock {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let header = BlockHeader::consensus_decode(reader)?;
        let body = AggregateBody::consensus_decode(reader)?;
        Ok(FullBlock::new(header, body))
    }
}
