// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
use std::sync::Arc;

use crate::exec::chunk::Chunk;
use crate::exec::join::filter_function::JoinFilterFunction;

/// Sentinel row position meaning "no further link in the chain."
/// Build sides are capped at `u32::MAX` rows, so this can never collide
/// with a valid position.
pub const ROW_NONE: u32 = u32::MAX;

/// Read-only view of build-side match chains, traversed during probing.
///
/// Backing data is frozen at build time; any number of probe threads may
/// traverse concurrently without synchronization.
pub trait PositionLinks: Send + Sync {
    /// First row position of the match chain anchored at `position`.
    /// `probe_position` and `probe_chunk` let richer encodings filter the
    /// chain per probe row.
    fn start(&self, position: u32, probe_position: usize, probe_chunk: &Chunk) -> u32;

    /// Row position following `position` in its match chain, or [`ROW_NONE`]
    /// when `position` is the last element. Callers stop at the first
    /// `ROW_NONE` and must not call `next` past it.
    fn next(&self, position: u32, probe_position: usize, probe_chunk: &Chunk) -> u32;

    /// Retained memory footprint, reported to the operator's accounting.
    fn size_in_bytes(&self) -> usize;

    /// Order-sensitive digest over the encoded chain state. Two structures
    /// built from the same link relations over the same row count agree.
    fn checksum(&self) -> u64;
}

/// Manufactures [`PositionLinks`] instances from one finalized build.
///
/// Stateless; `create` may be invoked any number of times, each probe task
/// supplying its own set of filter functions.
pub trait PositionLinksFactory: Send + Sync {
    fn create(&self, filter_functions: &[Arc<dyn JoinFilterFunction>]) -> Box<dyn PositionLinks>;

    /// Same value as [`PositionLinks::checksum`] of every instance this
    /// factory creates.
    fn checksum(&self) -> u64;
}

/// Write-only accumulator for the build pass. Single writer; consumed
/// exactly once by `build`.
pub trait PositionLinksBuilder: Send {
    /// Records that row `left` continues at row `right` on next-match
    /// traversal. Each position may be linked at most once as a `left`.
    /// Returns `left`, the representative position of the match group.
    fn link(&mut self, left: u32, right: u32) -> u32;

    /// True until the first `link` call. Lets the operator skip chain
    /// construction entirely when every key matched at most one row.
    fn is_empty(&self) -> bool;

    /// Finalizes the builder. Linking after this point is unrepresentable.
    fn build(self: Box<Self>) -> Box<dyn PositionLinksFactory>;
}
