// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Logistic sigmoid forward pass.

use crate::{activation, BufferView, KernelError, TensorBuffer};

/// Applies [`sigmoid`](crate::sigmoid) element-wise.
///
/// Input and output must have identical shapes; the output buffer is
/// overwritten in place.
///
/// # Errors
/// Returns [`KernelError::ShapeMismatch`] if the shapes differ.
pub fn sigmoid_forward(
    input: &BufferView<'_>,
    output: &mut TensorBuffer,
) -> Result<(), KernelError> {
    if input.shape() != output.shape() {
        return Err(KernelError::ShapeMismatch {
            op: "sigmoid_forward",
            lhs: input.shape(),
            rhs: output.shape(),
        });
    }

    let n = input.shape().num_elements();
    let src = &input.as_slice()[..n];
    let dst = &mut output.as_mut_slice()[..n];

    for (d, &x) in dst.iter_mut().zip(src.iter()) {
        *d = activation::sigmoid(x);
    }

    Ok(())
}
