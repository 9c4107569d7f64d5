// `macro_use` puts the log macros (`error!`, `warn!`, `debug!`, `info!` and `trace!`) in scope for the crate
#[macro_use]
extern crate log;

pub mod consts;
pub mod document_context;
pub mod error;
pub mod preferences;
pub mod range;
pub mod range_ops;
pub mod traversal;

#[cfg(test)]
pub mod test_utils;

#[doc(inline)]
pub use document_context::DocumentContext;
#[doc(inline)]
pub use error::EditorError;
#[doc(inline)]
pub use range::{DocumentRange, RangeKind, RangePlace, Span};
#[doc(inline)]
pub use range_ops::{copy_range, move_range, reverse_frames};
