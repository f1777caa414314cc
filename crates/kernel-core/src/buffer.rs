// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Owned buffers and borrowed views over externally managed storage.
//!
//! Kernels address buffer elements through the accessors here; allocation
//! and lifetime of the backing storage belong to the caller. [`TensorBuffer`]
//! owns its storage as a host-side convenience, while [`BufferView`] and
//! [`BufferViewMut`] wrap storage the caller already holds.
//!
//! Each accessor comes in an unchecked flavor (`at*`, the hot path) and a
//! bounds-checked flavor (`get*`). Hot-path code opts out of bounds checking
//! explicitly by gating on [`BufferShape::is_valid`] instead.

use crate::{BufferShape, Coordinate, KernelError};

/// An owned 3-D activation buffer backed by contiguous `f32` storage.
#[derive(Debug, Clone)]
pub struct TensorBuffer {
    shape: BufferShape,
    data: Vec<f32>,
}

impl TensorBuffer {
    /// Creates a buffer of the given shape filled with zeros.
    ///
    /// # Examples
    /// ```
    /// use kernel_core::{BufferShape, TensorBuffer};
    /// let b = TensorBuffer::zeros(BufferShape::new(4, 3, 2));
    /// assert_eq!(b.as_slice().len(), 24);
    /// ```
    pub fn zeros(shape: BufferShape) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.num_elements()],
        }
    }

    /// Creates a buffer from existing values.
    ///
    /// Returns [`KernelError::BufferSizeMismatch`] if `values.len()` does not
    /// match `shape.num_elements()`.
    pub fn from_f32(shape: BufferShape, values: &[f32]) -> Result<Self, KernelError> {
        let expected = shape.num_elements();
        if values.len() != expected {
            return Err(KernelError::BufferSizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            shape,
            data: values.to_vec(),
        })
    }

    /// Returns the buffer's shape.
    pub fn shape(&self) -> BufferShape {
        self.shape
    }

    /// Returns an immutable view over this buffer.
    pub fn view(&self) -> BufferView<'_> {
        BufferView {
            shape: self.shape,
            data: &self.data,
        }
    }

    /// Returns the flat storage.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the flat storage mutably.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Reference to the element at `(input, sequence, batch)`.
    ///
    /// All three indices must be within their extents; this accessor does
    /// not bounds-check beyond the panic built into slice indexing.
    #[inline(always)]
    pub fn at(&self, input: usize, sequence: usize, batch: usize) -> &f32 {
        &self.data[self.shape.offset(input, sequence, batch)]
    }

    /// Mutable reference to the element at `(input, sequence, batch)`.
    #[inline(always)]
    pub fn at_mut(&mut self, input: usize, sequence: usize, batch: usize) -> &mut f32 {
        let off = self.shape.offset(input, sequence, batch);
        &mut self.data[off]
    }

    /// Per-channel accessor, equivalent to `at(input, 0, 0)`.
    ///
    /// Callers working on per-channel scalars (bias addition and the like)
    /// handle sequence/batch offsets in their own loop indexing.
    #[inline(always)]
    pub fn at_input(&self, input: usize) -> &f32 {
        self.at(input, 0, 0)
    }

    /// Mutable per-channel accessor, equivalent to `at_mut(input, 0, 0)`.
    #[inline(always)]
    pub fn at_input_mut(&mut self, input: usize) -> &mut f32 {
        self.at_mut(input, 0, 0)
    }

    /// Reference to the element at a packed grid-order coordinate.
    #[inline(always)]
    pub fn at_coord(&self, coord: Coordinate) -> &f32 {
        &self.data[self.shape.offset_coord(coord)]
    }

    /// Mutable reference to the element at a packed grid-order coordinate.
    #[inline(always)]
    pub fn at_coord_mut(&mut self, coord: Coordinate) -> &mut f32 {
        let off = self.shape.offset_coord(coord);
        &mut self.data[off]
    }

    /// Bounds-checked element access.
    #[inline]
    pub fn get(&self, coord: Coordinate) -> Option<&f32> {
        if self.shape.is_valid(coord) {
            Some(self.at_coord(coord))
        } else {
            None
        }
    }

    /// Bounds-checked mutable element access.
    #[inline]
    pub fn get_mut(&mut self, coord: Coordinate) -> Option<&mut f32> {
        if self.shape.is_valid(coord) {
            Some(self.at_coord_mut(coord))
        } else {
            None
        }
    }

    /// Element access with no bounds check at all.
    ///
    /// # Safety
    /// The caller must guarantee `shape.is_valid(coord)`, typically because
    /// the coordinate was already gated when the lane was dispatched.
    #[inline(always)]
    pub unsafe fn at_unchecked(&self, coord: Coordinate) -> f32 {
        *self.data.get_unchecked(self.shape.offset_coord(coord))
    }
}

/// A borrowed, read-only view over contiguous activation storage.
///
/// The storage may belong to a [`TensorBuffer`] or to memory the caller
/// manages itself (a mapped device buffer, an arena slot).
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    shape: BufferShape,
    data: &'a [f32],
}

impl<'a> BufferView<'a> {
    /// Wraps externally owned storage.
    ///
    /// Returns [`KernelError::BufferSizeMismatch`] if the slice holds fewer
    /// than `shape.num_elements()` values. A longer slice is accepted; the
    /// tail is simply never addressed.
    pub fn from_parts(shape: BufferShape, data: &'a [f32]) -> Result<Self, KernelError> {
        if data.len() < shape.num_elements() {
            return Err(KernelError::BufferSizeMismatch {
                expected: shape.num_elements(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Returns the shape of the viewed buffer.
    pub fn shape(&self) -> BufferShape {
        self.shape
    }

    /// Returns the flat storage.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Reference to the element at `(input, sequence, batch)`.
    #[inline(always)]
    pub fn at(&self, input: usize, sequence: usize, batch: usize) -> &'a f32 {
        &self.data[self.shape.offset(input, sequence, batch)]
    }

    /// Per-channel accessor, equivalent to `at(input, 0, 0)`.
    #[inline(always)]
    pub fn at_input(&self, input: usize) -> &'a f32 {
        self.at(input, 0, 0)
    }

    /// Reference to the element at a packed grid-order coordinate.
    #[inline(always)]
    pub fn at_coord(&self, coord: Coordinate) -> &'a f32 {
        &self.data[self.shape.offset_coord(coord)]
    }

    /// Bounds-checked element access.
    #[inline]
    pub fn get(&self, coord: Coordinate) -> Option<&'a f32> {
        if self.shape.is_valid(coord) {
            Some(self.at_coord(coord))
        } else {
            None
        }
    }
}

/// A borrowed, mutable view over contiguous activation storage.
#[derive(Debug)]
pub struct BufferViewMut<'a> {
    shape: BufferShape,
    data: &'a mut [f32],
}

impl<'a> BufferViewMut<'a> {
    /// Wraps externally owned storage mutably.
    ///
    /// Returns [`KernelError::BufferSizeMismatch`] if the slice holds fewer
    /// than `shape.num_elements()` values.
    pub fn from_parts(shape: BufferShape, data: &'a mut [f32]) -> Result<Self, KernelError> {
        if data.len() < shape.num_elements() {
            return Err(KernelError::BufferSizeMismatch {
                expected: shape.num_elements(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Returns the shape of the viewed buffer.
    pub fn shape(&self) -> BufferShape {
        self.shape
    }

    /// Reborrows as a read-only view.
    pub fn as_view(&self) -> BufferView<'_> {
        BufferView {
            shape: self.shape,
            data: self.data,
        }
    }

    /// Mutable reference to the element at `(input, sequence, batch)`.
    #[inline(always)]
    pub fn at_mut(&mut self, input: usize, sequence: usize, batch: usize) -> &mut f32 {
        let off = self.shape.offset(input, sequence, batch);
        &mut self.data[off]
    }

    /// Mutable reference to the element at a packed grid-order coordinate.
    #[inline(always)]
    pub fn at_coord_mut(&mut self, coord: Coordinate) -> &mut f32 {
        let off = self.shape.offset_coord(coord);
        &mut self.data[off]
    }

    /// Bounds-checked mutable element access.
    #[inline]
    pub fn get_mut(&mut self, coord: Coordinate) -> Option<&mut f32> {
        if self.shape.is_valid(coord) {
            Some(self.at_coord_mut(coord))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let b = TensorBuffer::zeros(BufferShape::new(4, 3, 2));
        assert_eq!(b.as_slice().len(), 24);
        assert!(b.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_f32_size_mismatch() {
        let result = TensorBuffer::from_f32(BufferShape::new(4, 3, 2), &[0.0; 10]);
        assert!(matches!(
            result,
            Err(KernelError::BufferSizeMismatch {
                expected: 24,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_write_read_round_trip() {
        let mut b = TensorBuffer::zeros(BufferShape::new(4, 3, 2));
        *b.at_mut(1, 2, 1) = 42.5;
        assert_eq!(*b.at(1, 2, 1), 42.5);
        // Lands at the documented flat offset.
        assert_eq!(b.as_slice()[11], 42.5);
    }

    #[test]
    fn test_at_input_is_first_position() {
        let shape = BufferShape::new(4, 3, 2);
        let values: Vec<f32> = (0..24).map(|i| i as f32).collect();
        let b = TensorBuffer::from_f32(shape, &values).unwrap();
        for input in 0..4 {
            assert_eq!(b.at_input(input), b.at(input, 0, 0));
        }
    }

    #[test]
    fn test_at_coord_matches_named_accessor() {
        let shape = BufferShape::new(4, 3, 2);
        let values: Vec<f32> = (0..24).map(|i| i as f32).collect();
        let b = TensorBuffer::from_f32(shape, &values).unwrap();
        // Packed order is (batch, sequence, input); named order is
        // (input, sequence, batch).
        assert_eq!(
            b.at_coord(Coordinate::new(1, 2, 3)),
            b.at(3, 2, 1)
        );
    }

    #[test]
    fn test_get_bounds_checked() {
        let mut b = TensorBuffer::zeros(BufferShape::new(4, 3, 2));
        assert!(b.get(Coordinate::new(1, 2, 3)).is_some());
        assert!(b.get(Coordinate::new(2, 0, 0)).is_none());
        assert!(b.get_mut(Coordinate::new(0, 3, 0)).is_none());
        assert!(b.get(Coordinate::new(0, 0, 4)).is_none());
    }

    #[test]
    fn test_view_over_external_storage() {
        let shape = BufferShape::new(2, 2, 2);
        let mut storage = vec![0.0f32; 8];
        {
            let mut view = BufferViewMut::from_parts(shape, &mut storage).unwrap();
            *view.at_mut(1, 1, 1) = 7.0;
        }
        let view = BufferView::from_parts(shape, &storage).unwrap();
        assert_eq!(*view.at(1, 1, 1), 7.0);
        assert_eq!(view.get(Coordinate::new(1, 1, 1)), Some(&7.0));
        assert_eq!(view.get(Coordinate::new(2, 0, 0)), None);
        assert_eq!(view.at_input(0), view.at(0, 0, 0));
        assert_eq!(storage[shape.offset(1, 1, 1)], 7.0);
    }

    #[test]
    fn test_view_mut_reborrow_and_checked_access() {
        let shape = BufferShape::new(2, 2, 2);
        let mut storage = vec![0.0f32; 8];
        let mut view = BufferViewMut::from_parts(shape, &mut storage).unwrap();

        if let Some(x) = view.get_mut(Coordinate::new(0, 1, 1)) {
            *x = 3.0;
        }
        assert!(view.get_mut(Coordinate::new(0, 2, 0)).is_none());

        let ro = view.as_view();
        assert_eq!(*ro.at_coord(Coordinate::new(0, 1, 1)), 3.0);
    }

    #[test]
    fn test_view_rejects_short_storage() {
        let shape = BufferShape::new(2, 2, 2);
        let storage = vec![0.0f32; 7];
        assert!(BufferView::from_parts(shape, &storage).is_err());
    }

    #[test]
    fn test_view_accepts_oversized_storage() {
        // Length >= num_elements is the contract; pools hand out rounded-up slots.
        let shape = BufferShape::new(2, 2, 2);
        let storage = vec![0.0f32; 16];
        assert!(BufferView::from_parts(shape, &storage).is_ok());
    }

    #[test]
    fn test_at_unchecked() {
        let shape = BufferShape::new(4, 3, 2);
        let values: Vec<f32> = (0..24).map(|i| i as f32).collect();
        let b = TensorBuffer::from_f32(shape, &values).unwrap();
        let c = Coordinate::new(1, 2, 1);
        assert!(shape.is_valid(c));
        // SAFETY: coordinate validated above.
        assert_eq!(unsafe { b.at_unchecked(c) }, *b.at_coord(c));
    }
}
