use crate::index::{FrameIndex, LayerIndex};
use crate::layers::{Cel, Layer, LayerId};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The location of a single cel slot, addressed by stable layer id so it survives restacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CelAddress {
	pub layer: LayerId,
	pub frame: FrameIndex,
}

impl CelAddress {
	pub fn new(layer: LayerId, frame: FrameIndex) -> Self {
		Self { layer, frame }
	}
}

/// The full content of one cel slot, used to restore slots that were overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelSlot {
	pub address: CelAddress,
	pub cel: Option<Cel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Operations that can be performed to mutate the document.
/// Applying an operation with [`Document::handle_operation`](crate::Document::handle_operation) yields the operation that undoes it.
pub enum DocumentOperation {
	/// Overwrites each slot in order.
	SetCels {
		slots: Vec<CelSlot>,
	},
	/// Moves a cel, leaving the source slot empty and discarding whatever the destination held.
	MoveCel {
		source: CelAddress,
		destination: CelAddress,
	},
	CopyCel {
		source: CelAddress,
		destination: CelAddress,
	},
	SwapCels {
		layer: LayerId,
		first: FrameIndex,
		second: FrameIndex,
	},
	/// Takes `frame` out of the sequence and reinserts it in front of the frame that was at `before`.
	/// `before` may equal the frame count to move the frame to the end.
	MoveFrame {
		frame: FrameIndex,
		before: FrameIndex,
	},
	/// Inserts a duplicate of `frame` at `insert_index`. `frame` is read before the insertion shifts anything.
	CopyFrame {
		frame: FrameIndex,
		insert_index: FrameIndex,
	},
	InsertFrame {
		insert_index: FrameIndex,
		duration: u32,
		cels: Vec<(LayerId, Option<Cel>)>,
	},
	RemoveFrame {
		frame: FrameIndex,
	},
	/// Moves a layer so that it ends up at `insert_index` in the stack.
	RestackLayer {
		layer: LayerId,
		insert_index: LayerIndex,
	},
	InsertLayer {
		layer: Box<Layer>,
		insert_index: LayerIndex,
	},
	DeleteLayer {
		layer: LayerId,
		/// Id counter to restore once the layer is gone, set when this undoes the insertion of a new layer.
		#[serde(default)]
		next_layer_id: Option<LayerId>,
	},
}

impl fmt::Display for DocumentOperation {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			DocumentOperation::SetCels { slots } => write!(f, "SetCels ({} slots)", slots.len()),
			DocumentOperation::MoveCel { source, destination } => {
				write!(f, "MoveCel {}@{} -> {}@{}", source.layer, source.frame, destination.layer, destination.frame)
			}
			DocumentOperation::CopyCel { source, destination } => {
				write!(f, "CopyCel {}@{} -> {}@{}", source.layer, source.frame, destination.layer, destination.frame)
			}
			DocumentOperation::SwapCels { layer, first, second } => write!(f, "SwapCels {layer}@{first} <-> {layer}@{second}"),
			DocumentOperation::MoveFrame { frame, before } => write!(f, "MoveFrame {frame} before {before}"),
			DocumentOperation::CopyFrame { frame, insert_index } => write!(f, "CopyFrame {frame} to {insert_index}"),
			DocumentOperation::InsertFrame { insert_index, .. } => write!(f, "InsertFrame at {insert_index}"),
			DocumentOperation::RemoveFrame { frame } => write!(f, "RemoveFrame {frame}"),
			DocumentOperation::RestackLayer { layer, insert_index } => write!(f, "RestackLayer {layer} to {insert_index}"),
			DocumentOperation::InsertLayer { layer, insert_index } => write!(f, "InsertLayer {} at {insert_index}", layer.id),
			DocumentOperation::DeleteLayer { layer, .. } => write!(f, "DeleteLayer {layer}"),
		}
	}
}
