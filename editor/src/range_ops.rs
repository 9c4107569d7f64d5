//! Moving, copying and reversing ranges of cels, frames and layers.
//!
//! A transfer is planned against the current document without touching it: the plan is either a no-op, a structural error,
//! or the ordered list of primitive calls that performs it together with the range the data lands in.
//! Only then is the plan executed, inside a single undoable transaction.

use crate::consts::{COPY_RANGE_LABEL, MOVE_RANGE_LABEL, REVERSE_FRAMES_LABEL};
use crate::document_context::DocumentContext;
use crate::range::{DocumentRange, RangeBuilder, RangeKind, RangePlace, Span};
use crate::traversal::{AxisTraversal, choose_direction};
use crate::EditorError;

use animation_document::{Document, DocumentApi, DocumentError, FrameIndex, GridIndex, LayerId, LayerIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOp {
	Move,
	Copy,
}

impl TransferOp {
	pub fn undo_label(self) -> &'static str {
		match self {
			TransferOp::Move => MOVE_RANGE_LABEL,
			TransferOp::Copy => COPY_RANGE_LABEL,
		}
	}
}

/// One call into the document's mutation primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStep {
	MoveCel {
		src_layer: LayerIndex,
		src_frame: FrameIndex,
		dst_layer: LayerIndex,
		dst_frame: FrameIndex,
	},
	CopyCel {
		src_layer: LayerIndex,
		src_frame: FrameIndex,
		dst_layer: LayerIndex,
		dst_frame: FrameIndex,
	},
	SwapCels {
		layer: LayerIndex,
		first: FrameIndex,
		second: FrameIndex,
	},
	MoveFrame {
		frame: FrameIndex,
		before: FrameIndex,
	},
	CopyFrame {
		frame: FrameIndex,
		insert_index: FrameIndex,
	},
	/// Layers are addressed by id, because restacking changes the index of every layer in between.
	RestackLayer {
		layer: LayerId,
		anchor: LayerId,
		place: RangePlace,
	},
	DuplicateLayer {
		layer: LayerId,
		anchor: LayerId,
		place: RangePlace,
	},
}

impl TransferStep {
	fn apply(&self, api: &mut DocumentApi<'_>) -> Result<(), DocumentError> {
		match *self {
			TransferStep::MoveCel { src_layer, src_frame, dst_layer, dst_frame } => api.move_cel(src_layer, src_frame, dst_layer, dst_frame),
			TransferStep::CopyCel { src_layer, src_frame, dst_layer, dst_frame } => api.copy_cel(src_layer, src_frame, dst_layer, dst_frame),
			TransferStep::SwapCels { layer, first, second } => api.swap_cels(layer, first, second),
			TransferStep::MoveFrame { frame, before } => api.move_frame(frame, before),
			TransferStep::CopyFrame { frame, insert_index } => api.copy_frame(frame, insert_index),
			TransferStep::RestackLayer { layer, anchor, place } => match place {
				RangePlace::Before => api.restack_layer_before(layer, anchor),
				RangePlace::After => api.restack_layer_after(layer, anchor),
			},
			TransferStep::DuplicateLayer { layer, anchor, place } => match place {
				RangePlace::Before => api.duplicate_layer_before(layer, anchor).map(|_| ()),
				RangePlace::After => api.duplicate_layer_after(layer, anchor).map(|_| ()),
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferPlan {
	/// The range already sits where it was dropped, so nothing runs and no history entry is made.
	Unchanged(DocumentRange),
	Transfer { steps: Vec<TransferStep>, result: DocumentRange },
}

impl TransferPlan {
	/// The range covering the transferred data once the plan has run.
	pub fn result(&self) -> DocumentRange {
		match self {
			TransferPlan::Unchanged(range) => *range,
			TransferPlan::Transfer { result, .. } => *result,
		}
	}
}

pub fn move_range(context: &mut DocumentContext, from: DocumentRange, to: DocumentRange, place: RangePlace) -> Result<DocumentRange, EditorError> {
	drop_range_op(context, TransferOp::Move, from, place, to)
}

pub fn copy_range(context: &mut DocumentContext, from: DocumentRange, to: DocumentRange, place: RangePlace) -> Result<DocumentRange, EditorError> {
	drop_range_op(context, TransferOp::Copy, from, place, to)
}

/// Reverses the order of the frames in a frame range, or the order of the cels of each selected layer otherwise.
/// A layer range reverses the whole timeline of its layers.
pub fn reverse_frames(context: &mut DocumentContext, range: DocumentRange) -> Result<(), EditorError> {
	let steps = plan_reversal(&context.document, range)?;
	execute_in_transaction(context, REVERSE_FRAMES_LABEL, &steps)
}

fn drop_range_op(context: &mut DocumentContext, op: TransferOp, from: DocumentRange, place: RangePlace, to: DocumentRange) -> Result<DocumentRange, EditorError> {
	match plan_transfer(&context.document, op, from, to, place)? {
		TransferPlan::Unchanged(range) => {
			debug!("{op:?} of {from:?} {place:?} {to:?} leaves the document unchanged");
			Ok(range)
		}
		TransferPlan::Transfer { steps, result } => {
			debug!("{op:?} of {from:?} {place:?} {to:?} takes {} steps and lands at {result:?}", steps.len());
			execute_in_transaction(context, op.undo_label(), &steps)?;
			Ok(result)
		}
	}
}

/// Runs the steps as one transaction. If a step fails, everything already applied is rolled back.
fn execute_in_transaction(context: &mut DocumentContext, label: &str, steps: &[TransferStep]) -> Result<(), EditorError> {
	context.history.begin(label)?;

	let outcome = {
		let mut api = context.api();
		steps.iter().try_for_each(|step| step.apply(&mut api))
	};

	if let Err(error) = outcome {
		if let Err(rollback_error) = context.history.rollback(&mut context.document) {
			error!("Rolling back \"{label}\" failed: {rollback_error}");
		}
		return Err(error.into());
	}

	context.history.commit()?;
	Ok(())
}

/// Validates a transfer and computes the primitive calls that perform it, without modifying the document.
pub fn plan_transfer(document: &Document, op: TransferOp, from: DocumentRange, to: DocumentRange, place: RangePlace) -> Result<TransferPlan, EditorError> {
	check_bounds(document, from)?;
	check_bounds(document, to)?;

	match (from, to) {
		(
			DocumentRange::Cels {
				layers: src_layers,
				frames: src_frames,
			},
			DocumentRange::Cels {
				layers: dst_layers,
				frames: dst_frames,
			},
		) => {
			if src_layers.size() != dst_layers.size() || src_frames.size() != dst_frames.size() {
				return Err(EditorError::RangeSizeMismatch { from, to });
			}
			if from == to {
				return Ok(TransferPlan::Unchanged(from));
			}

			let layer_axis = choose_direction(src_layers, dst_layers);
			let frame_axis = choose_direction(src_frames, dst_frames);
			let steps = layer_axis
				.into_iter()
				.flat_map(|(src_layer, dst_layer)| {
					frame_axis.into_iter().map(move |(src_frame, dst_frame)| match op {
						TransferOp::Move => TransferStep::MoveCel { src_layer, src_frame, dst_layer, dst_frame },
						TransferOp::Copy => TransferStep::CopyCel { src_layer, src_frame, dst_layer, dst_frame },
					})
				})
				.collect();

			Ok(TransferPlan::Transfer { steps, result: to })
		}
		(DocumentRange::Frames { frames: src }, DocumentRange::Frames { frames: dst }) => Ok(plan_frames(op, src, dst, place)),
		(DocumentRange::Layers { layers: src }, DocumentRange::Layers { layers: dst }) => plan_layers(document, op, src, dst, place),
		_ => Err(EditorError::RangeKindMismatch { from: from.kind(), to: to.kind() }),
	}
}

fn plan_frames(op: TransferOp, from: Span<FrameIndex>, to: Span<FrameIndex>, place: RangePlace) -> TransferPlan {
	let insertion = insertion_point(to, place);
	if op == TransferOp::Move && is_in_place(from, insertion) {
		return TransferPlan::Unchanged(DocumentRange::Frames { frames: from });
	}

	let axis = choose_direction(from, Span::single(insertion));
	let steps = match op {
		TransferOp::Move => axis.into_iter().map(|(frame, before)| TransferStep::MoveFrame { frame, before }).collect(),
		TransferOp::Copy => frame_copy_traversals(from, insertion, axis)
			.into_iter()
			.flatten()
			.map(|(frame, insert_index)| TransferStep::CopyFrame { frame, insert_index })
			.collect(),
	};

	let mut builder = RangeBuilder::default();
	builder.start_range(RangeKind::Frames, LayerIndex::default(), insertion);
	builder.end_range(LayerIndex::default(), insertion.next_by(from.size() - 1));
	let mut result = builder.build();
	if op == TransferOp::Move && from.begin() < insertion {
		result = result.displace(0, -from.size());
	}

	TransferPlan::Transfer { steps, result }
}

/// Copying a frame inserts a new one, so the source frames that sit at or after the insertion point move away while they are copied.
fn frame_copy_traversals(from: Span<FrameIndex>, insertion: FrameIndex, axis: AxisTraversal<FrameIndex>) -> Vec<AxisTraversal<FrameIndex>> {
	if axis.is_forward() {
		// Each duplicate lands in front of the remaining sources, so the next original is two frames further on
		return vec![axis.with_src_step(2)];
	}

	// Every duplicate is inserted at the same point, pushing the ones copied before it later in time
	let axis = axis.with_dst_step(0);
	if insertion > from.end() {
		return vec![axis];
	}

	// Sources at or after the insertion point shift by one per duplicate, which keeps the next one to copy at `from.end()`
	let shifted = AxisTraversal {
		count: from.end() - insertion + 1,
		..axis.with_src_step(0)
	};
	let unshifted = AxisTraversal::backward(Span::new(from.begin(), insertion.previous()), insertion).with_dst_step(0);
	vec![shifted, unshifted]
}

fn plan_layers(document: &Document, op: TransferOp, from: Span<LayerIndex>, to: Span<LayerIndex>, place: RangePlace) -> Result<TransferPlan, EditorError> {
	let insertion = insertion_point(to, place);

	if op == TransferOp::Move {
		if let Some(background) = from.iter().find(|&layer| document.is_background(layer)) {
			return Err(EditorError::BackgroundLayerMoved(background));
		}
		if is_in_place(from, insertion) {
			return Ok(TransferPlan::Unchanged(DocumentRange::Layers { layers: from }));
		}
	}
	if place == RangePlace::Before && document.is_background(to.begin()) {
		return Err(EditorError::PlacedBeforeBackground(to.begin()));
	}

	let layer_ids = document.layer_ids();
	let id_at = |index: LayerIndex| index.to_usize().and_then(|index| layer_ids.get(index).copied()).ok_or(DocumentError::LayerIndexOutOfBounds(index));

	// Every layer is placed right against the anchor, so walking away from the anchor's side keeps the layers in order
	let (sources, anchor): (Vec<LayerIndex>, LayerId) = match place {
		RangePlace::Before => (from.iter().collect(), id_at(to.begin())?),
		RangePlace::After => (from.iter().rev().collect(), id_at(to.end())?),
	};
	let steps = sources
		.into_iter()
		.map(|index| {
			let layer = id_at(index)?;
			Ok(match op {
				TransferOp::Move => TransferStep::RestackLayer { layer, anchor, place },
				TransferOp::Copy => TransferStep::DuplicateLayer { layer, anchor, place },
			})
		})
		.collect::<Result<Vec<_>, DocumentError>>()?;

	let mut builder = RangeBuilder::default();
	builder.start_range(RangeKind::Layers, insertion, FrameIndex::default());
	builder.end_range(insertion.next_by(from.size() - 1), FrameIndex::default());
	let mut result = builder.build();
	if op == TransferOp::Move && from.begin() < insertion {
		result = result.displace(-from.size(), 0);
	}

	Ok(TransferPlan::Transfer { steps, result })
}

/// Computes the swaps or frame moves that reverse a range, without modifying the document.
pub fn plan_reversal(document: &Document, range: DocumentRange) -> Result<Vec<TransferStep>, EditorError> {
	check_bounds(document, range)?;

	let (layers, frames) = match range {
		DocumentRange::Frames { frames } => {
			// Send the first frame behind a shrinking end. The final move, in front of its own successor, would change nothing
			let first = frames.begin();
			let steps = (first.get() + 2..=frames.end().get() + 1)
				.rev()
				.map(|before| TransferStep::MoveFrame { frame: first, before: FrameIndex(before) })
				.collect();
			return Ok(steps);
		}
		DocumentRange::Cels { layers, frames } => (layers, frames),
		DocumentRange::Layers { layers } => {
			let Some(last) = document.frame_count().checked_sub(1) else { return Ok(Vec::new()) };
			(layers, Span::new(FrameIndex(0), FrameIndex::from_usize(last)))
		}
	};

	let (begin, end) = (frames.begin(), frames.end());
	let middle = FrameIndex((begin.get() + end.get()) / 2);
	let mirror = move |frame: FrameIndex| FrameIndex(end.get() - frame.get() + begin.get());

	let steps = layers
		.iter()
		.flat_map(|layer| {
			Span::new(begin, middle)
				.iter()
				.filter(move |&frame| mirror(frame) != frame)
				.map(move |frame| TransferStep::SwapCels { layer, first: frame, second: mirror(frame) })
		})
		.collect();
	Ok(steps)
}

/// The index the first transferred element is inserted at.
fn insertion_point<T: GridIndex>(to: Span<T>, place: RangePlace) -> T {
	match place {
		RangePlace::Before => to.begin(),
		RangePlace::After => to.end().next(),
	}
}

/// Whether moving `from` to `insertion` would leave it where it is: the insertion point lies inside the source or touches one of its edges.
fn is_in_place<T: GridIndex>(from: Span<T>, insertion: T) -> bool {
	from.begin() <= insertion && insertion <= from.end().next()
}

fn check_bounds(document: &Document, range: DocumentRange) -> Result<(), EditorError> {
	let layer_count = LayerIndex::from_usize(document.layer_count());
	let frame_count = FrameIndex::from_usize(document.frame_count());

	let layers_fit = range.layer_span().is_none_or(|span| fits(span, layer_count));
	let frames_fit = range.frame_span().is_none_or(|span| fits(span, frame_count));

	if layers_fit && frames_fit { Ok(()) } else { Err(EditorError::RangeOutOfBounds(range)) }
}

fn fits<T: GridIndex>(span: Span<T>, count: T) -> bool {
	T::new(0) <= span.begin() && span.begin() <= span.end() && span.end() < count
}
