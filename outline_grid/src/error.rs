//! The one error type that crosses the crate's public API: a failure from
//! the caller-supplied outline walker. Everything else (oversized outlines,
//! packing overflow at the grid ceiling) is reported out-of-band as a
//! degenerate `Outline` value, per the packer's error-handling design.

use thiserror::Error;

/// Wraps a failure surfaced by an [`OutlineWalker`](crate::walker::OutlineWalker)
/// implementation while `Outline::convert` is decomposing it.
#[derive(Error, Debug)]
pub enum OutlineError<E> {
    #[error("outline walker callback failed")]
    Walker(#[source] E),
}
