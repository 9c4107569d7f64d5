use crate::range::{DocumentRange, RangeKind};

use animation_document::{DocumentError, LayerIndex};
use thiserror::Error;

/// The error type used by the range editor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EditorError {
	#[error("The background layer cannot be moved (layer {0})")]
	BackgroundLayerMoved(LayerIndex),

	#[error("You cannot move or copy something below the background layer (layer {0})")]
	PlacedBeforeBackground(LayerIndex),

	#[error("The range {0:?} does not fit inside the document")]
	RangeOutOfBounds(DocumentRange),

	#[error("A {from:?} range cannot be dropped onto a {to:?} range")]
	RangeKindMismatch { from: RangeKind, to: RangeKind },

	#[error("The destination {to:?} does not have the same size as the source {from:?}")]
	RangeSizeMismatch { from: DocumentRange, to: DocumentRange },

	#[error("Failed to deserialize the preferences:\n{0}")]
	PreferencesDeserialization(String),

	#[error("The operation caused a document error:\n{0}")]
	Document(#[from] DocumentError),
}

impl EditorError {
	/// Whether the request was rejected because it would break the placement rules of the background layer.
	pub fn is_structural_violation(&self) -> bool {
		matches!(self, EditorError::BackgroundLayerMoved(_) | EditorError::PlacedBeforeBackground(_))
	}
}
