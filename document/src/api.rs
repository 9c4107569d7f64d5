use crate::consts::DUPLICATE_LAYER_SUFFIX;
use crate::document::Document;
use crate::history::DocumentHistory;
use crate::index::{FrameIndex, GridIndex, LayerIndex};
use crate::layers::LayerId;
use crate::operation::{CelAddress, DocumentOperation};
use crate::DocumentError;

/// Undoable mutation primitives.
///
/// Each call applies one [`DocumentOperation`] and records it together with its inverse in the history's open transaction.
/// Calling a primitive while no transaction is open fails with [`DocumentError::NoTransactionInProgress`] and changes nothing.
/// Calls that would leave the document as it is are accepted and record nothing.
pub struct DocumentApi<'a> {
	document: &'a mut Document,
	history: &'a mut DocumentHistory,
}

impl<'a> DocumentApi<'a> {
	pub fn new(document: &'a mut Document, history: &'a mut DocumentHistory) -> Self {
		Self { document, history }
	}

	pub fn document(&self) -> &Document {
		&*self.document
	}

	fn apply(&mut self, operation: DocumentOperation) -> Result<(), DocumentError> {
		if !self.history.is_transaction_in_progress() {
			return Err(DocumentError::NoTransactionInProgress);
		}

		trace!("Applying {operation}");
		let inverse = self.document.handle_operation(operation.clone())?;
		self.history.record(operation, inverse)
	}

	fn cel_address(&self, layer: LayerIndex, frame: FrameIndex) -> Result<CelAddress, DocumentError> {
		let layer = self.document.layer_at(layer)?;
		if frame.to_usize().is_none_or(|index| index >= layer.frame_count()) {
			return Err(DocumentError::FrameOutOfBounds(frame));
		}
		Ok(CelAddress::new(layer.id, frame))
	}

	pub fn move_cel(&mut self, src_layer: LayerIndex, src_frame: FrameIndex, dst_layer: LayerIndex, dst_frame: FrameIndex) -> Result<(), DocumentError> {
		let source = self.cel_address(src_layer, src_frame)?;
		let destination = self.cel_address(dst_layer, dst_frame)?;
		if source == destination {
			return Ok(());
		}

		self.apply(DocumentOperation::MoveCel { source, destination })
	}

	pub fn copy_cel(&mut self, src_layer: LayerIndex, src_frame: FrameIndex, dst_layer: LayerIndex, dst_frame: FrameIndex) -> Result<(), DocumentError> {
		let source = self.cel_address(src_layer, src_frame)?;
		let destination = self.cel_address(dst_layer, dst_frame)?;
		if source == destination {
			return Ok(());
		}

		self.apply(DocumentOperation::CopyCel { source, destination })
	}

	pub fn swap_cels(&mut self, layer: LayerIndex, first: FrameIndex, second: FrameIndex) -> Result<(), DocumentError> {
		let first_address = self.cel_address(layer, first)?;
		self.cel_address(layer, second)?;
		if first == second {
			return Ok(());
		}

		self.apply(DocumentOperation::SwapCels {
			layer: first_address.layer,
			first,
			second,
		})
	}

	/// Moves `frame` in front of the frame currently at `before`. Passing the frame count as `before` moves it to the end.
	pub fn move_frame(&mut self, frame: FrameIndex, before: FrameIndex) -> Result<(), DocumentError> {
		let frame_count = FrameIndex::from_usize(self.document.frame_count());
		if frame < FrameIndex(0) || frame >= frame_count {
			return Err(DocumentError::FrameOutOfBounds(frame));
		}
		if before < FrameIndex(0) || before > frame_count {
			return Err(DocumentError::FrameOutOfBounds(before));
		}
		if before == frame || before == frame.next() {
			return Ok(());
		}

		self.apply(DocumentOperation::MoveFrame { frame, before })
	}

	/// Inserts a duplicate of `frame` at `insert_index`, shifting the frames from `insert_index` onward.
	pub fn copy_frame(&mut self, frame: FrameIndex, insert_index: FrameIndex) -> Result<(), DocumentError> {
		self.apply(DocumentOperation::CopyFrame { frame, insert_index })
	}

	/// Restacks `layer` directly beneath `anchor`.
	pub fn restack_layer_before(&mut self, layer: LayerId, anchor: LayerId) -> Result<(), DocumentError> {
		let from = self.document.layer_index(layer)?;
		let anchor_index = self.document.layer_index(anchor)?;
		// Taking the layer out first shifts everything above it down by one
		let target = if from < anchor_index { anchor_index.previous() } else { anchor_index };

		self.restack(layer, from, target)
	}

	/// Restacks `layer` directly above `anchor`.
	pub fn restack_layer_after(&mut self, layer: LayerId, anchor: LayerId) -> Result<(), DocumentError> {
		let from = self.document.layer_index(layer)?;
		let anchor_index = self.document.layer_index(anchor)?;
		let target = if from < anchor_index { anchor_index } else { anchor_index.next() };

		self.restack(layer, from, target)
	}

	fn restack(&mut self, layer: LayerId, from: LayerIndex, target: LayerIndex) -> Result<(), DocumentError> {
		if from == target {
			return Ok(());
		}

		self.apply(DocumentOperation::RestackLayer { layer, insert_index: target })
	}

	/// Inserts a copy of `layer` directly beneath `anchor` and returns the id of the copy.
	pub fn duplicate_layer_before(&mut self, layer: LayerId, anchor: LayerId) -> Result<LayerId, DocumentError> {
		let insert_index = self.document.layer_index(anchor)?;
		self.duplicate(layer, insert_index)
	}

	/// Inserts a copy of `layer` directly above `anchor` and returns the id of the copy.
	pub fn duplicate_layer_after(&mut self, layer: LayerId, anchor: LayerId) -> Result<LayerId, DocumentError> {
		let insert_index = self.document.layer_index(anchor)?.next();
		self.duplicate(layer, insert_index)
	}

	fn duplicate(&mut self, layer: LayerId, insert_index: LayerIndex) -> Result<LayerId, DocumentError> {
		if !self.history.is_transaction_in_progress() {
			return Err(DocumentError::NoTransactionInProgress);
		}

		let mut copy = self.document.layer(layer)?.clone();
		// The insertion claims the id, and undoing it gives the id back
		copy.id = self.document.next_layer_id();
		copy.name.push_str(DUPLICATE_LAYER_SUFFIX);
		// Only the original can be the background
		copy.background = false;

		let id = copy.id;
		self.apply(DocumentOperation::InsertLayer { layer: Box::new(copy), insert_index })?;
		Ok(id)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::layers::Cel;

	use pretty_assertions::assert_eq;

	fn three_layers() -> (Document, [LayerId; 3]) {
		let mut document = Document::new(2);
		let ids = [document.add_layer("A"), document.add_layer("B"), document.add_layer("C")];
		(document, ids)
	}

	#[test]
	fn primitives_require_an_open_transaction() {
		let (mut document, [a, ..]) = three_layers();
		let mut history = DocumentHistory::default();
		let before = document.clone();

		let mut api = DocumentApi::new(&mut document, &mut history);
		assert_eq!(api.move_frame(FrameIndex(0), FrameIndex(2)), Err(DocumentError::NoTransactionInProgress));
		assert_eq!(api.duplicate_layer_after(a, a), Err(DocumentError::NoTransactionInProgress));

		assert_eq!(document, before);
	}

	#[test]
	fn restacking_relative_to_an_anchor() {
		let (mut document, [a, b, c]) = three_layers();
		let mut history = DocumentHistory::default();
		history.begin("Restack").unwrap();

		let mut api = DocumentApi::new(&mut document, &mut history);
		api.restack_layer_after(a, c).unwrap();
		assert_eq!(api.document().layer_ids(), vec![b, c, a]);
		api.restack_layer_before(a, b).unwrap();
		assert_eq!(api.document().layer_ids(), vec![a, b, c]);
		api.restack_layer_before(c, b).unwrap();
		assert_eq!(api.document().layer_ids(), vec![a, c, b]);
		api.restack_layer_after(a, b).unwrap();
		assert_eq!(api.document().layer_ids(), vec![c, b, a]);
	}

	#[test]
	fn duplicates_are_regular_layers_next_to_the_anchor() {
		let mut document = Document::new(1);
		let top = document.add_layer("Layer 1");
		let background = document.add_background_layer("Background");
		document.set_cel(background, FrameIndex(0), Some(Cel::new(9))).unwrap();
		let mut history = DocumentHistory::default();
		history.begin("Duplicate").unwrap();

		let mut api = DocumentApi::new(&mut document, &mut history);
		let copy = api.duplicate_layer_after(background, background).unwrap();

		assert_eq!(document.layer_ids(), vec![background, copy, top]);
		let duplicate = document.layer(copy).unwrap();
		assert!(!duplicate.background);
		assert_eq!(duplicate.name, "Background Copy");
		assert_eq!(duplicate.cel(FrameIndex(0)), Some(&Cel::new(9)));
	}

	#[test]
	fn no_change_records_nothing() {
		let (mut document, [a, b, _]) = three_layers();
		let mut history = DocumentHistory::default();
		history.begin("Nothing").unwrap();

		let mut api = DocumentApi::new(&mut document, &mut history);
		api.move_frame(FrameIndex(0), FrameIndex(1)).unwrap();
		api.swap_cels(LayerIndex(0), FrameIndex(1), FrameIndex(1)).unwrap();
		api.restack_layer_before(a, b).unwrap();
		history.commit().unwrap();

		assert_eq!(history.undo_len(), 0);
	}
}
