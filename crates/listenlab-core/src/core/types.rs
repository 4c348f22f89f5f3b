//! ListenLab Core Type Definitions
//!
//! Fundamental aliases shared by every module.

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Milliseconds, the finest resolution caption files carry
pub type TimeMs = u64;

// =============================================================================
// Segment Types
// =============================================================================

/// 1-based ordinal position of a segment inside a store
pub type SegmentIndex = usize;

/// Default synthetic duration assigned to one untimed line
pub const DEFAULT_DURATION_PER_LINE: TimeSec = 5.0;

/// Fixed pause inserted between synthetic segments
pub const DEFAULT_SEGMENT_GAP: TimeSec = 1.0;
