// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Buffer shape descriptors and the flat-offset addressing scheme.

use std::fmt;

/// Describes the extents of a 3-D activation buffer.
///
/// Activation buffers hold one f32 per `(input, sequence, batch)` coordinate
/// in a single contiguous region. The flat layout is input-major,
/// batch-minor: the batch coordinate varies fastest in memory, then the
/// sequence position, then the input channel.
///
/// This layout is a binary contract with every producer and consumer of
/// these buffers (host-side allocation, other kernels). [`offset`] must
/// never reorder its strides.
///
/// [`offset`]: BufferShape::offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BufferShape {
    /// Number of feature/input channels.
    pub input_size: usize,
    /// Number of sequence positions.
    pub sequence_size: usize,
    /// Number of batch elements.
    pub batch_size: usize,
}

impl BufferShape {
    /// Creates a new shape from the three extents.
    ///
    /// # Examples
    /// ```
    /// use kernel_core::BufferShape;
    /// let s = BufferShape::new(4, 3, 2);
    /// assert_eq!(s.num_elements(), 24);
    /// ```
    pub fn new(input_size: usize, sequence_size: usize, batch_size: usize) -> Self {
        Self {
            input_size,
            sequence_size,
            batch_size,
        }
    }

    /// Returns the total number of elements.
    pub fn num_elements(&self) -> usize {
        self.input_size * self.sequence_size * self.batch_size
    }

    /// Computes the flat offset for a coordinate.
    ///
    /// The formula is fixed:
    /// `input * batch_size * sequence_size + sequence * batch_size + batch`.
    ///
    /// No bounds check is performed; out-of-range components address past
    /// the intended region. Callers whose indices come from a padded
    /// execution grid must gate on [`is_valid`](BufferShape::is_valid).
    #[inline(always)]
    pub fn offset(&self, input: usize, sequence: usize, batch: usize) -> usize {
        input * self.batch_size * self.sequence_size + sequence * self.batch_size + batch
    }

    /// Flat offset for a packed [`Coordinate`].
    #[inline(always)]
    pub fn offset_coord(&self, coord: Coordinate) -> usize {
        self.offset(coord.input, coord.sequence, coord.batch)
    }

    /// Returns `true` iff every component of `coord` is within its extent.
    ///
    /// Each dimension is compared independently; a single oversized
    /// component makes the coordinate invalid regardless of the others.
    /// Kernels dispatched on a rounded-up grid use this to retire
    /// out-of-range lanes before touching memory.
    #[inline(always)]
    pub fn is_valid(&self, coord: Coordinate) -> bool {
        coord.batch < self.batch_size
            && coord.sequence < self.sequence_size
            && coord.input < self.input_size
    }
}

impl fmt::Display for BufferShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[input={}, sequence={}, batch={}]",
            self.input_size, self.sequence_size, self.batch_size
        )
    }
}

/// A packed 3-component coordinate in execution-grid order.
///
/// Component order is `(batch, sequence, input)` — the reverse of the
/// named-parameter accessors. Kernels receive their position from the
/// execution grid as a natural (batch, sequence, input) triple, so the
/// packed form keeps that order rather than the storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Batch element index (fastest-varying in memory).
    pub batch: usize,
    /// Sequence position index.
    pub sequence: usize,
    /// Input channel index (slowest-varying in memory).
    pub input: usize,
}

impl Coordinate {
    /// Creates a coordinate from grid-order components.
    pub fn new(batch: usize, sequence: usize, input: usize) -> Self {
        Self {
            batch,
            sequence,
            input,
        }
    }
}

/// Convenience: `Coordinate::from([batch, sequence, input])`.
impl From<[usize; 3]> for Coordinate {
    fn from(c: [usize; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// Convenience: `Coordinate::from((batch, sequence, input))`.
impl From<(usize, usize, usize)> for Coordinate {
    fn from((batch, sequence, input): (usize, usize, usize)) -> Self {
        Self::new(batch, sequence, input)
    }
}
