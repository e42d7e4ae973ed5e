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
use crate::exec::chunk::Chunk;

/// Per-candidate-match predicate evaluated during chain traversal.
///
/// Richer chain encodings consult these to drop links that fail a non-equi
/// join condition. The plain-array encoding accepts them for interface
/// uniformity and never invokes them.
pub trait JoinFilterFunction: Send + Sync {
    /// Whether the build row at `build_position` survives the filter against
    /// probe row `probe_position` of `probe_chunk`.
    fn filter(
        &self,
        build_position: u32,
        probe_position: usize,
        probe_chunk: &Chunk,
    ) -> Result<bool, String>;
}
