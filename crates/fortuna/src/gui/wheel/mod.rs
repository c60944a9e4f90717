pub mod model;
pub mod view;

pub use model::{Phase, Presenter, SpinAnimation, SpinTicket, SpinToken, WheelState};
pub use view::draw;

/// Time from trigger to reveal; the wheel eases to its target over the same
/// span.
pub const SPIN_DURATION_MS: u64 = 4000;

/// Every spin makes at least this many full turns...
pub const MIN_FULL_TURNS: f64 = 5.0;
/// ...plus a random fraction of this many more.
pub const EXTRA_FULL_TURNS: f64 = 5.0;
pub const FULL_TURN_DEG: f64 = 360.0;

// Wheel geometry, scaled from the reference size to the allocation.
pub const REFERENCE_SIZE: f64 = 500.0;
pub const RIM_WIDTH: f64 = 8.0;
pub const HUB_RADIUS: f64 = 64.0;
pub const POINTER_HALF_WIDTH: f64 = 12.0;
pub const POINTER_HEIGHT: f64 = 24.0;
pub const SEGMENT_COUNT: usize = 20;
pub const HUB_FONT_SIZE: f64 = 44.0;
pub const RESULT_FONT_SIZE: f64 = 20.0;
pub const RESULT_LINE_SPACING: f64 = 8.0;
