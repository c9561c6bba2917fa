//! Device-specific constants for the watchface display
//!
//! The flash partition holding watchfaces is mounted by the OS before this
//! program starts.

use std::time::Duration;

/// Mount point of the watchface filesystem
pub const WATCHFACE_ROOT: &str = "/watchfaces";

/// Watchface shown at boot, relative to [`WATCHFACE_ROOT`]
pub const WATCHFACE_FILE: &str = "/watchface.bmp";

/// Time given to the panel after the initial clear before drawing
pub const CLEAR_SETTLE: Duration = Duration::from_secs(2);
