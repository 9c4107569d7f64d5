use crate::consts::OPAQUE;
use crate::index::{FrameIndex, GridIndex};
use crate::DocumentError;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A number that identifies a layer for the lifetime of the document, independently of its position in the stack.
pub type LayerId = u64;

/// A reference to the raster image a cel displays. Image storage lives outside of the document grid.
pub type ImageId = u64;

/// One layer's content at one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cel {
	pub image: ImageId,
	/// Position of the image's top left corner relative to the canvas.
	pub offset: IVec2,
	pub opacity: u8,
}

impl Cel {
	pub fn new(image: ImageId) -> Self {
		Self {
			image,
			offset: IVec2::ZERO,
			opacity: OPAQUE,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
	pub id: LayerId,
	pub name: String,
	/// A background layer is pinned to the bottom of the stack.
	pub background: bool,
	/// One slot per document frame, `None` for an empty cel.
	pub(crate) cels: Vec<Option<Cel>>,
}

impl Layer {
	pub fn new(id: LayerId, name: impl Into<String>, frame_count: usize) -> Self {
		Self {
			id,
			name: name.into(),
			background: false,
			cels: vec![None; frame_count],
		}
	}

	pub fn cel(&self, frame: FrameIndex) -> Option<&Cel> {
		frame.to_usize().and_then(|index| self.cels.get(index)).and_then(Option::as_ref)
	}

	pub fn cels(&self) -> &[Option<Cel>] {
		&self.cels
	}

	pub fn frame_count(&self) -> usize {
		self.cels.len()
	}

	pub(crate) fn slot(&self, frame: FrameIndex) -> Result<&Option<Cel>, DocumentError> {
		frame.to_usize().and_then(|index| self.cels.get(index)).ok_or(DocumentError::FrameOutOfBounds(frame))
	}

	pub(crate) fn slot_mut(&mut self, frame: FrameIndex) -> Result<&mut Option<Cel>, DocumentError> {
		frame.to_usize().and_then(|index| self.cels.get_mut(index)).ok_or(DocumentError::FrameOutOfBounds(frame))
	}
}
