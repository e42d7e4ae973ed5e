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

use arrow::array::{ArrayRef, RecordBatch};
use arrow::datatypes::{Schema, SchemaRef};

/// A chunk of data, consisting of multiple rows.
/// Wrapper around Arrow RecordBatch; probe operators hand these to
/// join filter evaluation alongside the row positions being matched.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub batch: RecordBatch,
}

impl Chunk {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn len(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    pub fn columns(&self) -> &[ArrayRef] {
        self.batch.columns()
    }

    pub fn column(&self, index: usize) -> Result<ArrayRef, String> {
        self.batch.columns().get(index).cloned().ok_or_else(|| {
            format!(
                "column index {} out of range (num_columns={})",
                index,
                self.batch.num_columns()
            )
        })
    }

    pub fn slice(&self, offset: usize, length: usize) -> Self {
        Self {
            batch: self.batch.slice(offset, length),
        }
    }

    pub fn estimated_bytes(&self) -> usize {
        self.batch.get_array_memory_size()
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self {
            batch: RecordBatch::new_empty(Arc::new(Schema::empty())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int32Array;
    use arrow::datatypes::{DataType, Field};

    fn int_chunk(values: Vec<i32>) -> Chunk {
        let schema = Arc::new(Schema::new(vec![Field::new("a", DataType::Int32, true)]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(Int32Array::from(values))]).expect("batch");
        Chunk::new(batch)
    }

    #[test]
    fn len_and_slice() {
        let chunk = int_chunk(vec![1, 2, 3, 4]);
        assert_eq!(chunk.len(), 4);
        assert!(!chunk.is_empty());

        let sliced = chunk.slice(1, 2);
        assert_eq!(sliced.len(), 2);
    }

    #[test]
    fn column_out_of_range() {
        let chunk = int_chunk(vec![1]);
        assert!(chunk.column(0).is_ok());
        let err = chunk.column(3).expect_err("expected range error");
        assert!(err.contains("out of range"), "err={}", err);
    }

    #[test]
    fn default_is_empty() {
        let chunk = Chunk::default();
        assert!(chunk.is_empty());
        assert_eq!(chunk.columns().len(), 0);
    }
}
