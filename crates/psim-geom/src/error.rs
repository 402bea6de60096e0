// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Errors raised when constructing or resizing a [`crate::Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeomError {
    /// A half-extent or radius was zero, negative, or not finite.
    #[error("shape extent must be finite and > 0, got {0}")]
    NonPositiveExtent(f32),
}
