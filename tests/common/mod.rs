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
//! Common utilities and helpers for integration tests.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int32Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema};
use tempfile::TempDir;

use rowlink::Chunk;
use rowlink::rowlink_config;
use rowlink::rowlink_logging;

/// Test configuration for integration tests.
pub struct TestConfig {
    /// Temporary directory for test artifacts
    pub temp_dir: TempDir,
    /// Test config path
    pub config_path: PathBuf,
}

impl TestConfig {
    /// Create a new test configuration with default settings.
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let config_path = temp_dir.path().join("test_rowlink.toml");

        // Create a minimal test config
        let config_content = r#"
log_level = "debug"

[join]
log_build_stats = true

[debug]
checksum_on_build = true
"#;

        std::fs::write(&config_path, config_content)?;

        Ok(Self {
            temp_dir,
            config_path,
        })
    }

    /// Initialize logging for tests, honoring the test config.
    pub fn init_logging(&self) {
        self.load_config().expect("load test config");
        rowlink_logging::init_from_config();
    }

    /// Load the test configuration.
    pub fn load_config(&self) -> anyhow::Result<&'static rowlink_config::RowlinkConfig> {
        rowlink_config::init_from_path(&self.config_path)
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new().expect("Failed to create test config")
    }
}

/// Probe-side chunk with a single Int32 key column.
pub fn int32_probe_chunk(values: Vec<i32>) -> Chunk {
    let schema = Arc::new(Schema::new(vec![Field::new(
        "probe_key",
        DataType::Int32,
        true,
    )]));
    let array = Arc::new(Int32Array::from(values)) as ArrayRef;
    let batch = RecordBatch::try_new(schema, vec![array]).expect("record batch");
    Chunk::new(batch)
}
