// FRAMES
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

// HISTORY
pub const DEFAULT_MAX_UNDO_HISTORY_LEN: usize = 100;

// LAYERS
pub const DUPLICATE_LAYER_SUFFIX: &str = " Copy";
pub const OPAQUE: u8 = 255;
