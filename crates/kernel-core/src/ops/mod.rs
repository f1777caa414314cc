// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element-wise forward passes over whole activation buffers.
//!
//! Each op writes into a pre-allocated output buffer to avoid heap
//! allocations in the inference hot path.

mod sigmoid_op;
mod tanh_op;

pub use sigmoid_op::sigmoid_forward;
pub use tanh_op::tanh_forward;
