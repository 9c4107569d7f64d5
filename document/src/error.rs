use crate::index::{FrameIndex, LayerIndex};
use crate::layers::LayerId;

use thiserror::Error;

/// A set of different errors that can occur when mutating a document or its history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
	#[error("No layer with the id {0} exists in the document")]
	LayerNotFound(LayerId),

	#[error("Layer index {0} is outside of the layer stack")]
	LayerIndexOutOfBounds(LayerIndex),

	#[error("Frame {0} is outside of the document's frames")]
	FrameOutOfBounds(FrameIndex),

	#[error("Layer {layer} has {actual} frames but the document has {expected}")]
	FrameCountMismatch { layer: LayerId, expected: usize, actual: usize },

	#[error("A document mutation was attempted but no transaction was in progress")]
	NoTransactionInProgress,

	#[error("Cannot begin a transaction while \"{0}\" is still in progress")]
	TransactionAlreadyInProgress(String),

	#[error("There is nothing to undo")]
	NothingToUndo,

	#[error("There is nothing to redo")]
	NothingToRedo,
}
