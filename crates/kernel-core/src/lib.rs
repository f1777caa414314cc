// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # kernel-core
//!
//! Precision-critical building blocks for per-element compute kernels in a
//! neural-network runtime.
//!
//! This crate provides:
//! - [`tanh`] / [`sigmoid`] — numerically safe scalar activation
//!   approximations that stay finite where naive formulations overflow.
//! - [`BufferShape`] and [`Coordinate`] — the flat-offset addressing scheme
//!   for 3-D activation buffers (input × sequence × batch).
//! - [`TensorBuffer`], [`BufferView`], [`BufferViewMut`] — owned and borrowed
//!   typed views over contiguous f32 storage.
//! - [`ops`] — element-wise forward passes over whole buffers.
//! - [`LaunchGrid`] — padded lane-grid dispatch with out-of-range lane
//!   skipping, mirroring how GPU thread groups are rounded up.
//!
//! # Design Goals
//! - Every function is total and non-blocking; no allocation in hot paths.
//! - The stride order of [`BufferShape::offset`] is a binary contract shared
//!   with buffer producers and must never change.
//! - Clean error types via `thiserror`.

mod activation;
mod buffer;
mod error;
mod grid;
pub mod ops;
mod shape;

pub use activation::{sigmoid, tanh};
pub use buffer::{BufferView, BufferViewMut, TensorBuffer};
pub use error::KernelError;
pub use grid::LaunchGrid;
pub use shape::{BufferShape, Coordinate};
