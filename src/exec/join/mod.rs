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
//! Position-link structures for hash-join probing.
//!
//! Responsibilities:
//! - Defines the chain-encoding contract (links, factory, builder) every link encoding implements.
//! - Provides the flat-array encoding used when matches need no per-link filtering.
//!
//! Current limitations:
//! - Only the plain-array encoding is implemented; filtered and sorted-range encodings plug in through the same traits.

mod array_position_links;
mod filter_function;
mod position_links;

// Re-export all public types
pub use array_position_links::{
    ArrayPositionLinks, ArrayPositionLinksBuilder, ArrayPositionLinksFactory,
};
pub use filter_function::JoinFilterFunction;
pub use position_links::{PositionLinks, PositionLinksBuilder, PositionLinksFactory, ROW_NONE};
