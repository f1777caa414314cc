// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for buffer construction and buffer-level operations.

use crate::BufferShape;

/// Errors that can occur when constructing buffers or running forward ops.
///
/// The scalar activation functions and the addressing math itself are total
/// and never produce one of these; errors arise only at the points where a
/// caller hands us storage or pairs of buffers.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// The provided storage does not hold enough elements for the shape.
    #[error("buffer size mismatch: shape needs {expected} elements, storage has {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Input and output buffers have different shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: BufferShape,
        rhs: BufferShape,
    },
}
