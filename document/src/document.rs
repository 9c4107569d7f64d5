use crate::consts::DEFAULT_FRAME_DURATION_MS;
use crate::index::{FrameIndex, GridIndex, LayerIndex};
use crate::layers::{Cel, Layer, LayerId};
use crate::operation::{CelAddress, CelSlot, DocumentOperation};
use crate::DocumentError;

use serde::{Deserialize, Serialize};

/// The animation grid: a stack of layers that all share the same sequence of frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
	/// Bottom of the stack first.
	layers: Vec<Layer>,
	/// Duration of each frame in milliseconds. Its length is the document's frame count.
	frame_durations: Vec<u32>,
	next_layer_id: LayerId,
}

impl Default for Document {
	fn default() -> Self {
		Self::new(1)
	}
}

impl Document {
	pub fn new(frame_count: usize) -> Self {
		Self::with_frame_duration(frame_count, DEFAULT_FRAME_DURATION_MS)
	}

	pub fn with_frame_duration(frame_count: usize, duration: u32) -> Self {
		Self {
			layers: Vec::new(),
			frame_durations: vec![duration; frame_count],
			next_layer_id: 0,
		}
	}

	/// Adds an empty layer on top of the stack.
	pub fn add_layer(&mut self, name: impl Into<String>) -> LayerId {
		let id = self.allocate_layer_id();
		self.layers.push(Layer::new(id, name, self.frame_count()));
		id
	}

	/// Adds an empty background layer at the bottom of the stack.
	/// A document holds at most one background layer, so if one already exists its id is returned instead.
	pub fn add_background_layer(&mut self, name: impl Into<String>) -> LayerId {
		if let Some(background) = self.background_layer() {
			return background.id;
		}

		let id = self.allocate_layer_id();
		let mut layer = Layer::new(id, name, self.frame_count());
		layer.background = true;
		self.layers.insert(0, layer);
		id
	}

	/// Replaces a cel without recording anything in the history. Returns the previous content of the slot.
	pub fn set_cel(&mut self, layer: LayerId, frame: FrameIndex, cel: Option<Cel>) -> Result<Option<Cel>, DocumentError> {
		let slot = self.slot_mut(CelAddress::new(layer, frame))?;
		Ok(std::mem::replace(slot, cel))
	}

	pub fn set_frame_duration(&mut self, frame: FrameIndex, duration: u32) -> Result<(), DocumentError> {
		let index = self.frame_slot(frame)?;
		self.frame_durations[index] = duration;
		Ok(())
	}

	pub fn layer_count(&self) -> usize {
		self.layers.len()
	}

	pub fn frame_count(&self) -> usize {
		self.frame_durations.len()
	}

	pub fn layers(&self) -> &[Layer] {
		&self.layers
	}

	/// Returns the ids of all layers, bottom of the stack first.
	pub fn layer_ids(&self) -> Vec<LayerId> {
		self.layers.iter().map(|layer| layer.id).collect()
	}

	pub fn layer_at(&self, index: LayerIndex) -> Result<&Layer, DocumentError> {
		index.to_usize().and_then(|index| self.layers.get(index)).ok_or(DocumentError::LayerIndexOutOfBounds(index))
	}

	pub fn layer(&self, id: LayerId) -> Result<&Layer, DocumentError> {
		self.layers.iter().find(|layer| layer.id == id).ok_or(DocumentError::LayerNotFound(id))
	}

	fn layer_mut(&mut self, id: LayerId) -> Result<&mut Layer, DocumentError> {
		self.layers.iter_mut().find(|layer| layer.id == id).ok_or(DocumentError::LayerNotFound(id))
	}

	pub fn layer_index(&self, id: LayerId) -> Result<LayerIndex, DocumentError> {
		self.layers.iter().position(|layer| layer.id == id).map(LayerIndex::from_usize).ok_or(DocumentError::LayerNotFound(id))
	}

	pub fn cel(&self, layer: LayerIndex, frame: FrameIndex) -> Option<&Cel> {
		self.layer_at(layer).ok()?.cel(frame)
	}

	pub fn frame_duration(&self, frame: FrameIndex) -> Result<u32, DocumentError> {
		self.frame_slot(frame).map(|index| self.frame_durations[index])
	}

	pub fn frame_durations(&self) -> &[u32] {
		&self.frame_durations
	}

	pub fn background_layer(&self) -> Option<&Layer> {
		self.layers.iter().find(|layer| layer.background)
	}

	pub fn is_background(&self, index: LayerIndex) -> bool {
		self.layer_at(index).is_ok_and(|layer| layer.background)
	}

	/// The id the next new layer receives.
	pub(crate) fn next_layer_id(&self) -> LayerId {
		self.next_layer_id
	}

	fn allocate_layer_id(&mut self) -> LayerId {
		let id = self.next_layer_id;
		self.next_layer_id += 1;
		id
	}

	/// Index of an existing frame.
	fn frame_slot(&self, frame: FrameIndex) -> Result<usize, DocumentError> {
		frame.to_usize().filter(|&index| index < self.frame_count()).ok_or(DocumentError::FrameOutOfBounds(frame))
	}

	/// Index at which a frame can be inserted, which includes the position past the last frame.
	fn frame_insertion_slot(&self, frame: FrameIndex) -> Result<usize, DocumentError> {
		frame.to_usize().filter(|&index| index <= self.frame_count()).ok_or(DocumentError::FrameOutOfBounds(frame))
	}

	fn slot(&self, address: CelAddress) -> Result<&Option<Cel>, DocumentError> {
		self.layer(address.layer)?.slot(address.frame)
	}

	fn slot_mut(&mut self, address: CelAddress) -> Result<&mut Option<Cel>, DocumentError> {
		self.layer_mut(address.layer)?.slot_mut(address.frame)
	}

	/// Applies the operation and returns the operation that reverts it.
	/// Every operation is validated before anything is mutated, so an error leaves the document untouched.
	pub fn handle_operation(&mut self, operation: DocumentOperation) -> Result<DocumentOperation, DocumentError> {
		let inverse = match operation {
			DocumentOperation::SetCels { slots } => {
				for slot in &slots {
					self.slot(slot.address)?;
				}

				let mut previous = Vec::with_capacity(slots.len());
				for CelSlot { address, cel } in slots {
					let old = std::mem::replace(self.slot_mut(address)?, cel);
					previous.push(CelSlot { address, cel: old });
				}
				previous.reverse();

				DocumentOperation::SetCels { slots: previous }
			}
			DocumentOperation::MoveCel { source, destination } => {
				let previous_source = self.slot(source)?.clone();
				let previous_destination = self.slot(destination)?.clone();

				let cel = self.slot_mut(source)?.take();
				*self.slot_mut(destination)? = cel;

				DocumentOperation::SetCels {
					slots: vec![
						CelSlot {
							address: destination,
							cel: previous_destination,
						},
						CelSlot {
							address: source,
							cel: previous_source,
						},
					],
				}
			}
			DocumentOperation::CopyCel { source, destination } => {
				let cel = self.slot(source)?.clone();
				let previous_destination = std::mem::replace(self.slot_mut(destination)?, cel);

				DocumentOperation::SetCels {
					slots: vec![CelSlot {
						address: destination,
						cel: previous_destination,
					}],
				}
			}
			DocumentOperation::SwapCels { layer, first, second } => {
				let frame_count = self.frame_count();
				let check = |frame: FrameIndex| frame.to_usize().filter(|&index| index < frame_count).ok_or(DocumentError::FrameOutOfBounds(frame));
				let (a, b) = (check(first)?, check(second)?);

				self.layer_mut(layer)?.cels.swap(a, b);

				DocumentOperation::SwapCels { layer, first, second }
			}
			DocumentOperation::MoveFrame { frame, before } => {
				let from = self.frame_slot(frame)?;
				let before_index = self.frame_insertion_slot(before)?;

				let target = relocate(&mut self.frame_durations, from, before_index);
				for layer in &mut self.layers {
					relocate(&mut layer.cels, from, before_index);
				}

				// Putting the frame back at `from` means inserting in front of `from + 1` when it now sits below it
				let restore_before = if from > target { from + 1 } else { from };
				DocumentOperation::MoveFrame {
					frame: FrameIndex::from_usize(target),
					before: FrameIndex::from_usize(restore_before),
				}
			}
			DocumentOperation::CopyFrame { frame, insert_index } => {
				let from = self.frame_slot(frame)?;
				let insert = self.frame_insertion_slot(insert_index)?;

				let duration = self.frame_durations[from];
				self.frame_durations.insert(insert, duration);
				for layer in &mut self.layers {
					let cel = layer.cels[from].clone();
					layer.cels.insert(insert, cel);
				}

				DocumentOperation::RemoveFrame { frame: insert_index }
			}
			DocumentOperation::InsertFrame { insert_index, duration, cels } => {
				let insert = self.frame_insertion_slot(insert_index)?;
				if let Some((missing, _)) = cels.iter().find(|(id, _)| self.layer(*id).is_err()) {
					return Err(DocumentError::LayerNotFound(*missing));
				}

				self.frame_durations.insert(insert, duration);
				for layer in &mut self.layers {
					let cel = cels.iter().find(|(id, _)| *id == layer.id).and_then(|(_, cel)| cel.clone());
					layer.cels.insert(insert, cel);
				}

				DocumentOperation::RemoveFrame { frame: insert_index }
			}
			DocumentOperation::RemoveFrame { frame } => {
				let index = self.frame_slot(frame)?;

				let duration = self.frame_durations.remove(index);
				let cels = self.layers.iter_mut().map(|layer| (layer.id, layer.cels.remove(index))).collect();

				DocumentOperation::InsertFrame {
					insert_index: frame,
					duration,
					cels,
				}
			}
			DocumentOperation::RestackLayer { layer, insert_index } => {
				let from = self.layer_index(layer)?;
				let target = insert_index
					.to_usize()
					.filter(|&index| index < self.layer_count())
					.ok_or(DocumentError::LayerIndexOutOfBounds(insert_index))?;

				// `from` was found by `layer_index`, so it is a valid position
				let from_index = from.to_usize().ok_or(DocumentError::LayerNotFound(layer))?;
				let moved = self.layers.remove(from_index);
				self.layers.insert(target, moved);

				DocumentOperation::RestackLayer { layer, insert_index: from }
			}
			DocumentOperation::InsertLayer { layer, insert_index } => {
				let insert = insert_index
					.to_usize()
					.filter(|&index| index <= self.layer_count())
					.ok_or(DocumentError::LayerIndexOutOfBounds(insert_index))?;
				if layer.frame_count() != self.frame_count() {
					return Err(DocumentError::FrameCountMismatch {
						layer: layer.id,
						expected: self.frame_count(),
						actual: layer.frame_count(),
					});
				}

				let id = layer.id;
				let previous_next_layer_id = self.next_layer_id;
				self.next_layer_id = self.next_layer_id.max(id + 1);
				self.layers.insert(insert, *layer);

				DocumentOperation::DeleteLayer {
					layer: id,
					next_layer_id: Some(previous_next_layer_id),
				}
			}
			DocumentOperation::DeleteLayer { layer, next_layer_id } => {
				let index = self.layer_index(layer)?;
				let removed = self.layers.remove(index.to_usize().ok_or(DocumentError::LayerNotFound(layer))?);
				if let Some(next_layer_id) = next_layer_id {
					self.next_layer_id = next_layer_id;
				}

				DocumentOperation::InsertLayer {
					layer: Box::new(removed),
					insert_index: index,
				}
			}
		};

		Ok(inverse)
	}
}

/// Moves `items[from]` in front of the element that was at `before`, returning the index it ends up at.
fn relocate<T>(items: &mut Vec<T>, from: usize, before: usize) -> usize {
	let item = items.remove(from);
	let target = if from < before { before - 1 } else { before };
	items.insert(target, item);
	target
}
