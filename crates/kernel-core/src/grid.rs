// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Padded lane-grid dispatch.
//!
//! Compute devices launch lanes in fixed-size groups, so the grid covering a
//! buffer is rounded up to group-size multiples in each dimension and some
//! lanes fall outside the buffer's true extent. [`LaunchGrid`] reproduces
//! that model on the host: it enumerates the padded grid and retires
//! out-of-range lanes with [`BufferShape::is_valid`] before they touch
//! memory.
//!
//! Writes stay disjoint by construction: each lane owns exactly one flat
//! offset, and the parallel path partitions storage into non-overlapping
//! per-channel chunks. No locks, no atomics.

use rayon::prelude::*;

use crate::{BufferShape, Coordinate, TensorBuffer};

/// A lane-dispatch grid with a fixed thread-group size per dimension.
///
/// Group sizes are in grid order `(batch, sequence, input)`, matching
/// [`Coordinate`].
#[derive(Debug, Clone, Copy)]
pub struct LaunchGrid {
    group_size: [usize; 3],
}

impl Default for LaunchGrid {
    /// A common device default: 32 lanes along the batch dimension,
    /// one group per sequence position and input channel.
    fn default() -> Self {
        Self::new([32, 1, 1])
    }
}

impl LaunchGrid {
    /// Creates a grid with the given per-dimension group sizes.
    ///
    /// # Panics
    /// Panics if any group size is zero.
    pub fn new(group_size: [usize; 3]) -> Self {
        assert!(
            group_size.iter().all(|&g| g > 0),
            "thread-group sizes must be non-zero"
        );
        Self { group_size }
    }

    /// Lane counts for `shape`: each extent rounded up to a multiple of the
    /// group size, in grid order `(batch, sequence, input)`.
    pub fn lane_counts(&self, shape: BufferShape) -> [usize; 3] {
        let extents = [shape.batch_size, shape.sequence_size, shape.input_size];
        let mut counts = [0usize; 3];
        for (c, (&extent, &group)) in counts
            .iter_mut()
            .zip(extents.iter().zip(self.group_size.iter()))
        {
            *c = extent.div_ceil(group) * group;
        }
        counts
    }

    /// Invokes `f` once per valid lane of the padded grid.
    ///
    /// Lanes whose coordinate fails [`BufferShape::is_valid`] are skipped,
    /// exactly as a device kernel returns early on padded lanes.
    pub fn for_each_valid_lane<F>(&self, shape: BufferShape, mut f: F)
    where
        F: FnMut(Coordinate),
    {
        let [batches, sequences, inputs] = self.lane_counts(shape);
        tracing::debug!(
            "dispatch {shape}: {batches}x{sequences}x{inputs} lanes \
             ({} padded)",
            batches * sequences * inputs - shape.num_elements()
        );

        for input in 0..inputs {
            for sequence in 0..sequences {
                for batch in 0..batches {
                    let coord = Coordinate::new(batch, sequence, input);
                    if shape.is_valid(coord) {
                        f(coord);
                    }
                }
            }
        }
    }

    /// Applies `f` to every element of `buffer` in parallel.
    ///
    /// The flat storage is split into one chunk per input channel
    /// (`sequence_size * batch_size` elements each); chunks are disjoint, so
    /// no two lanes ever write the same offset.
    pub fn par_apply<F>(&self, buffer: &mut TensorBuffer, f: F)
    where
        F: Fn(f32) -> f32 + Sync,
    {
        let shape = buffer.shape();
        let channel_len = shape.sequence_size * shape.batch_size;
        if channel_len == 0 {
            return;
        }
        tracing::debug!(
            "par_apply {shape}: {} channels of {channel_len} elements",
            shape.input_size
        );

        buffer
            .as_mut_slice()
            .par_chunks_mut(channel_len)
            .for_each(|chunk| {
                for x in chunk.iter_mut() {
                    *x = f(*x);
                }
            });
    }
}
