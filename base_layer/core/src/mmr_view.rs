// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// `T` per spec.md §2: the MMR view is an external collaborator; only its interface is
// normative. The real implementation (`tari_mmr`) is not part of the pack's retrievable
// source, so this module carries a trait plus an in-memory test double that tracks roots
// exactly as the validator is specified to consult them (spec.md §4.1 step 6).

use std::sync::RwLock;

use crate::types::Hash;

/// The three roots `ValidateBlock` checks a header against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MmrRoots {
    pub output_mmr_root: Hash,
    pub rangeproof_mmr_root: Hash,
    pub kernel_mmr_root: Hash,
}

/// Read access to the current state of the three append-only Merkle Mountain Ranges.
pub trait MmrView {
    fn current_roots(&self) -> MmrRoots;
}

/// A test double whose roots are set directly rather than derived from appended leaves; real
/// MMR bagging/peak arithmetic is out of scope here (spec.md's `T` is an abstract collaborator).
pub struct MemoryMmrView {
    roots: RwLock<MmrRoots>,
}

impl MemoryMmrView {
    pub fn new(roots: MmrRoots) -> Self {
        Self {
            roots: RwLock::new(roots),
        }
    }

    pub fn set_roots(&self, roots: MmrRoots) {
        *self.roots.write().unwrap() = roots;
    }
}

impl MmrView for MemoryMmrView {
    fn current_roots(&self) -> MmrRoots {
        *self.roots.read().unwrap()
    }
}
