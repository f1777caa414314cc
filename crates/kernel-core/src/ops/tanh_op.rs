// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Hyperbolic tangent forward pass.

use crate::{activation, BufferView, KernelError, TensorBuffer};

/// Applies the safe [`tanh`](crate::tanh) approximation element-wise.
///
/// Input and output must have identical shapes; the output buffer is
/// overwritten in place.
///
/// # Errors
/// Returns [`KernelError::ShapeMismatch`] if the shapes differ.
pub fn tanh_forward(input: &BufferView<'_>, output: &mut TensorBuffer) -> Result<(), KernelError> {
    if input.shape() != output.shape() {
        return Err(KernelError::ShapeMismatch {
            op: "tanh_forward",
            lhs: input.shape(),
            rhs: output.shape(),
        });
    }

    let n = input.shape().num_elements();
    let src = &input.as_slice()[..n];
    let dst = &mut output.as_mut_slice()[..n];

    for (d, &x) in dst.iter_mut().zip(src.iter()) {
        *d = activation::tanh(x);
    }

    Ok(())
}
