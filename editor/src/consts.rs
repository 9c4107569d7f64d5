// UNDO LABELS
pub const MOVE_RANGE_LABEL: &str = "Move Range";
pub const COPY_RANGE_LABEL: &str = "Copy Range";
pub const REVERSE_FRAMES_LABEL: &str = "Reverse Frames";
