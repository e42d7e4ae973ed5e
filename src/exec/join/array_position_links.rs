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
//! Flat-array position links for enumerating duplicate-key build rows.
//!
//! Responsibilities:
//! - Accumulates "row -> next same-key row" relations during the build pass.
//! - Freezes them into an immutable chain structure probed without locks.
//! - Reports an order-sensitive checksum for build reproducibility checks.
//!
//! Key exported interfaces:
//! - Types: `ArrayPositionLinksBuilder`, `ArrayPositionLinksFactory`, `ArrayPositionLinks`.
//!
//! Current limitations:
//! - Accepts join filter functions for interface uniformity but never invokes them; filtered traversal belongs to richer encodings.

use std::mem;
use std::sync::Arc;

use twox_hash::XxHash64;

use super::filter_function::JoinFilterFunction;
use super::position_links::{PositionLinks, PositionLinksBuilder, PositionLinksFactory, ROW_NONE};
use crate::common::app_config;
use crate::exec::chunk::Chunk;
use crate::rowlink_logging::{debug, info};

/// Folds xxHash64 over every slot, the running digest seeding the next step.
/// Slots are widened to `u64` and hashed as their little-endian bytes, so the
/// digest is sensitive to both slot order and slot values.
fn checksum_links(links: &[u32]) -> u64 {
    let mut hash = 0u64;
    for slot in links {
        hash = XxHash64::oneshot(hash, &u64::from(*slot).to_le_bytes());
    }
    hash
}

/// Build-phase accumulator: one slot per build-side row position, holding the
/// position of the next row with the same key, or `ROW_NONE`.
#[derive(Debug)]
pub struct ArrayPositionLinksBuilder {
    links: Vec<u32>,
    link_count: usize,
}

impl ArrayPositionLinksBuilder {
    pub fn try_new(size: usize) -> Result<Self, String> {
        if size > u32::MAX as usize {
            return Err(format!("join build row count overflow: {}", size));
        }
        Ok(Self {
            links: vec![ROW_NONE; size],
            link_count: 0,
        })
    }

    pub fn new(size: usize) -> Self {
        match Self::try_new(size) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Records that row `left` continues at row `right` and returns `left`.
    /// Both positions must lie in `[0, size)`; out-of-range `left` panics on
    /// the slot access. Relinking an already-linked `left` would drop its
    /// earlier chain tail, which correct key grouping never does.
    pub fn link(&mut self, left: u32, right: u32) -> u32 {
        let slot = left as usize;
        debug_assert!(
            self.links[slot] == ROW_NONE,
            "row {} already linked to {}",
            left,
            self.links[slot]
        );
        self.links[slot] = right;
        self.link_count += 1;
        left
    }

    pub fn is_empty(&self) -> bool {
        self.link_count == 0
    }

    /// Finalizes into a factory for the immutable chain structure. Consuming
    /// `self` makes any later `link` call a compile error.
    pub fn build(self) -> ArrayPositionLinksFactory {
        let link_count = self.link_count;
        let factory = ArrayPositionLinksFactory {
            links: Arc::new(self.links),
        };

        let cfg = app_config::config().ok();
        if cfg.map(|c| c.join.log_build_stats).unwrap_or(false) {
            debug!(
                "array position links built: linked_rows={} positions={} retained_bytes={}",
                link_count,
                factory.links.len(),
                ArrayPositionLinks::estimated_retained_size_in_bytes(factory.links.len())
            );
        }
        if cfg.map(|c| c.debug.checksum_on_build).unwrap_or(false) {
            info!(
                "array position links checksum: {:016x}",
                checksum_links(&factory.links)
            );
        }
        factory
    }
}

impl PositionLinksBuilder for ArrayPositionLinksBuilder {
    fn link(&mut self, left: u32, right: u32) -> u32 {
        ArrayPositionLinksBuilder::link(self, left, right)
    }

    fn is_empty(&self) -> bool {
        ArrayPositionLinksBuilder::is_empty(self)
    }

    fn build(self: Box<Self>) -> Box<dyn PositionLinksFactory> {
        Box::new((*self).build())
    }
}

/// Stateless handle over the frozen link array; manufactures any number of
/// equivalent read-only views without copying the array.
pub struct ArrayPositionLinksFactory {
    links: Arc<Vec<u32>>,
}

impl PositionLinksFactory for ArrayPositionLinksFactory {
    fn create(&self, _filter_functions: &[Arc<dyn JoinFilterFunction>]) -> Box<dyn PositionLinks> {
        Box::new(ArrayPositionLinks {
            links: Arc::clone(&self.links),
        })
    }

    fn checksum(&self) -> u64 {
        checksum_links(&self.links)
    }
}

/// Immutable chain structure held for the whole probe phase. Chains start at
/// the anchor position the key lookup produced and follow `links` until
/// `ROW_NONE`.
pub struct ArrayPositionLinks {
    links: Arc<Vec<u32>>,
}

impl ArrayPositionLinks {
    /// Size estimate for admission decisions made before the structure exists.
    pub fn estimated_retained_size_in_bytes(position_count: usize) -> usize {
        mem::size_of::<Self>() + position_count.saturating_mul(mem::size_of::<u32>())
    }
}

impl PositionLinks for ArrayPositionLinks {
    fn start(&self, position: u32, _probe_position: usize, _probe_chunk: &Chunk) -> u32 {
        position
    }

    fn next(&self, position: u32, _probe_position: usize, _probe_chunk: &Chunk) -> u32 {
        self.links[position as usize]
    }

    fn size_in_bytes(&self) -> usize {
        mem::size_of::<Self>() + self.links.capacity().saturating_mul(mem::size_of::<u32>())
    }

    fn checksum(&self) -> u64 {
        checksum_links(&self.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_chunk() -> Chunk {
        Chunk::default()
    }

    fn build_links(size: usize, pairs: &[(u32, u32)]) -> Box<dyn PositionLinks> {
        let mut builder = ArrayPositionLinksBuilder::new(size);
        for (left, right) in pairs {
            builder.link(*left, *right);
        }
        builder.build().create(&[])
    }

    #[test]
    fn builder_starts_empty() {
        let mut builder = ArrayPositionLinksBuilder::new(4);
        assert!(builder.is_empty());
        assert_eq!(builder.link(1, 3), 1);
        assert!(!builder.is_empty());

        let builder = ArrayPositionLinksBuilder::new(0);
        assert!(builder.is_empty());
    }

    #[test]
    fn traverses_linked_chain() {
        let chunk = probe_chunk();
        let links = build_links(5, &[(0, 2), (2, 4)]);

        assert_eq!(links.start(0, 0, &chunk), 0);
        assert_eq!(links.next(0, 0, &chunk), 2);
        assert_eq!(links.next(2, 0, &chunk), 4);
        assert_eq!(links.next(4, 0, &chunk), ROW_NONE);
        assert_eq!(links.next(1, 0, &chunk), ROW_NONE);
        assert_eq!(links.next(3, 0, &chunk), ROW_NONE);
    }

    #[test]
    fn unlinked_rows_terminate_immediately() {
        let chunk = probe_chunk();
        let builder = ArrayPositionLinksBuilder::new(3);
        assert!(builder.is_empty());
        let links = builder.build().create(&[]);
        for position in 0..3 {
            assert_eq!(links.next(position, 0, &chunk), ROW_NONE);
        }
    }

    #[test]
    fn checksum_is_deterministic_and_value_sensitive() {
        let first = build_links(8, &[(0, 3), (3, 5), (1, 7)]);
        let second = build_links(8, &[(0, 3), (3, 5), (1, 7)]);
        assert_eq!(first.checksum(), second.checksum());

        let changed = build_links(8, &[(0, 3), (3, 6), (1, 7)]);
        assert_ne!(first.checksum(), changed.checksum());
    }

    #[test]
    fn checksum_is_order_sensitive() {
        // Same multiset of slot values in different slots must not collide.
        let forward = build_links(4, &[(0, 1)]);
        let moved = build_links(4, &[(1, 1)]);
        assert_ne!(forward.checksum(), moved.checksum());
    }

    #[test]
    fn checksum_is_idempotent_and_factory_agrees() {
        let mut builder = ArrayPositionLinksBuilder::new(6);
        builder.link(2, 5);
        let factory = builder.build();
        let expected = factory.checksum();
        assert_eq!(factory.checksum(), expected);

        let links = factory.create(&[]);
        assert_eq!(links.checksum(), expected);
        assert_eq!(links.checksum(), expected);

        let again = factory.create(&[]);
        assert_eq!(again.checksum(), expected);
    }

    #[test]
    fn size_in_bytes_scales_with_positions_not_links() {
        let unlinked = build_links(100, &[]);
        let linked = build_links(100, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(unlinked.size_in_bytes(), linked.size_in_bytes());

        let doubled = build_links(200, &[]);
        let slot = mem::size_of::<u32>();
        assert_eq!(doubled.size_in_bytes() - unlinked.size_in_bytes(), 100 * slot);
        assert_eq!(
            ArrayPositionLinks::estimated_retained_size_in_bytes(100),
            unlinked.size_in_bytes()
        );
    }

    #[test]
    #[should_panic]
    fn next_out_of_range_panics() {
        let chunk = probe_chunk();
        let links = build_links(4, &[]);
        links.next(4, 0, &chunk);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "already linked")]
    fn relinking_a_row_panics_in_debug_builds() {
        let mut builder = ArrayPositionLinksBuilder::new(4);
        builder.link(0, 1);
        builder.link(0, 2);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn rejects_row_counts_beyond_u32() {
        let err = ArrayPositionLinksBuilder::try_new(u32::MAX as usize + 1)
            .expect_err("expected overflow error");
        assert!(err.contains("row count overflow"), "err={}", err);
    }
}
