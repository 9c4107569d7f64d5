use animation_document::{FrameIndex, GridIndex, LayerIndex};

use serde::{Deserialize, Deserializer, Serialize};

/// An inclusive span of indices along one axis of the grid, with `begin <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span<T> {
	begin: T,
	end: T,
}

/// Deserialized bounds go through [`Span::new`], so bounds stored in either order still produce `begin <= end`.
impl<'de, T: GridIndex + Deserialize<'de>> Deserialize<'de> for Span<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		struct Bounds<T> {
			begin: T,
			end: T,
		}

		let Bounds { begin, end } = Bounds::deserialize(deserializer)?;
		Ok(Span::new(begin, end))
	}
}

impl<T: GridIndex> Span<T> {
	/// Creates the span between two indices given in either order.
	pub fn new(a: T, b: T) -> Self {
		if a <= b { Self { begin: a, end: b } } else { Self { begin: b, end: a } }
	}

	pub fn single(index: T) -> Self {
		Self { begin: index, end: index }
	}

	pub fn begin(&self) -> T {
		self.begin
	}

	pub fn end(&self) -> T {
		self.end
	}

	/// Number of indices in the span, which is at least 1.
	pub fn size(&self) -> i32 {
		self.end - self.begin + 1
	}

	pub fn contains(&self, index: T) -> bool {
		self.begin <= index && index <= self.end
	}

	pub fn displace(self, delta: i32) -> Self {
		Self {
			begin: self.begin + delta,
			end: self.end + delta,
		}
	}

	pub fn iter(&self) -> impl DoubleEndedIterator<Item = T> + use<T> {
		(self.begin.get()..=self.end.get()).map(T::new)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeKind {
	Cels,
	Frames,
	Layers,
}

/// Which side of the destination anchor receives a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangePlace {
	/// At the anchor's own position, pushing the anchor toward higher indices.
	Before,
	/// Directly past the anchor's last index.
	After,
}

/// A rectangular selection over the layer/frame grid.
///
/// A frame range selects every layer and a layer range selects every frame, so those variants only carry the axis they restrict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentRange {
	Cels { layers: Span<LayerIndex>, frames: Span<FrameIndex> },
	Frames { frames: Span<FrameIndex> },
	Layers { layers: Span<LayerIndex> },
}

impl DocumentRange {
	pub fn of_cels(layer_begin: i32, layer_end: i32, frame_begin: i32, frame_end: i32) -> Self {
		Self::Cels {
			layers: Span::new(LayerIndex(layer_begin), LayerIndex(layer_end)),
			frames: Span::new(FrameIndex(frame_begin), FrameIndex(frame_end)),
		}
	}

	pub fn of_frames(begin: i32, end: i32) -> Self {
		Self::Frames {
			frames: Span::new(FrameIndex(begin), FrameIndex(end)),
		}
	}

	pub fn of_layers(begin: i32, end: i32) -> Self {
		Self::Layers {
			layers: Span::new(LayerIndex(begin), LayerIndex(end)),
		}
	}

	pub fn kind(&self) -> RangeKind {
		match self {
			Self::Cels { .. } => RangeKind::Cels,
			Self::Frames { .. } => RangeKind::Frames,
			Self::Layers { .. } => RangeKind::Layers,
		}
	}

	/// The selected layers, or `None` for a frame range.
	pub fn layer_span(&self) -> Option<Span<LayerIndex>> {
		match *self {
			Self::Cels { layers, .. } | Self::Layers { layers } => Some(layers),
			Self::Frames { .. } => None,
		}
	}

	/// The selected frames, or `None` for a layer range.
	pub fn frame_span(&self) -> Option<Span<FrameIndex>> {
		match *self {
			Self::Cels { frames, .. } | Self::Frames { frames } => Some(frames),
			Self::Layers { .. } => None,
		}
	}

	pub fn layer_begin(&self) -> Option<LayerIndex> {
		self.layer_span().map(|span| span.begin())
	}

	pub fn layer_end(&self) -> Option<LayerIndex> {
		self.layer_span().map(|span| span.end())
	}

	pub fn frame_begin(&self) -> Option<FrameIndex> {
		self.frame_span().map(|span| span.begin())
	}

	pub fn frame_end(&self) -> Option<FrameIndex> {
		self.frame_span().map(|span| span.end())
	}

	pub fn layers(&self) -> Option<i32> {
		self.layer_span().map(|span| span.size())
	}

	pub fn frames(&self) -> Option<i32> {
		self.frame_span().map(|span| span.size())
	}

	pub fn contains_layer(&self, layer: LayerIndex) -> bool {
		self.layer_span().is_none_or(|span| span.contains(layer))
	}

	pub fn contains_frame(&self, frame: FrameIndex) -> bool {
		self.frame_span().is_none_or(|span| span.contains(frame))
	}

	pub fn contains_cel(&self, layer: LayerIndex, frame: FrameIndex) -> bool {
		self.contains_layer(layer) && self.contains_frame(frame)
	}

	/// Translates the range. A delta along an axis the range does not restrict is ignored.
	#[must_use]
	pub fn displace(&self, layer_delta: i32, frame_delta: i32) -> Self {
		match *self {
			Self::Cels { layers, frames } => Self::Cels {
				layers: layers.displace(layer_delta),
				frames: frames.displace(frame_delta),
			},
			Self::Frames { frames } => Self::Frames { frames: frames.displace(frame_delta) },
			Self::Layers { layers } => Self::Layers { layers: layers.displace(layer_delta) },
		}
	}
}

/// Builds a [`DocumentRange`] from its first and last cel, the way a selection is dragged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBuilder {
	kind: RangeKind,
	layer_begin: LayerIndex,
	frame_begin: FrameIndex,
	layer_end: LayerIndex,
	frame_end: FrameIndex,
}

impl Default for RangeBuilder {
	fn default() -> Self {
		Self {
			kind: RangeKind::Cels,
			layer_begin: LayerIndex(0),
			frame_begin: FrameIndex(0),
			layer_end: LayerIndex(0),
			frame_end: FrameIndex(0),
		}
	}
}

impl RangeBuilder {
	/// Sets the kind and the first cel, collapsing the range onto that cel.
	pub fn start_range(&mut self, kind: RangeKind, layer: LayerIndex, frame: FrameIndex) {
		self.kind = kind;
		self.layer_begin = layer;
		self.frame_begin = frame;
		self.layer_end = layer;
		self.frame_end = frame;
	}

	pub fn end_range(&mut self, layer: LayerIndex, frame: FrameIndex) {
		self.layer_end = layer;
		self.frame_end = frame;
	}

	pub fn build(&self) -> DocumentRange {
		let layers = Span::new(self.layer_begin, self.layer_end);
		let frames = Span::new(self.frame_begin, self.frame_end);

		match self.kind {
			RangeKind::Cels => DocumentRange::Cels { layers, frames },
			RangeKind::Frames => DocumentRange::Frames { frames },
			RangeKind::Layers => DocumentRange::Layers { layers },
		}
	}
}
