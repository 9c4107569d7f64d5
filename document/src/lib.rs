// `macro_use` puts the log macros (`error!`, `warn!`, `debug!`, `info!` and `trace!`) in scope for the crate
#[macro_use]
extern crate log;

pub mod api;
pub mod consts;
pub mod document;
pub mod error;
pub mod history;
pub mod index;
pub mod layers;
pub mod operation;

pub use api::DocumentApi;
pub use document::Document;
pub use error::DocumentError;
pub use history::{DocumentHistory, Transaction, TransactionStep};
pub use index::{FrameIndex, GridIndex, LayerIndex};
pub use layers::{Cel, ImageId, Layer, LayerId};
pub use operation::{CelAddress, CelSlot, DocumentOperation};
