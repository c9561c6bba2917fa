mod constants;

use constants::{CLEAR_SETTLE, WATCHFACE_FILE, WATCHFACE_ROOT};
use epd_1in54_d67::{Device, DeviceConfig};
use watchy_render::{FsStorage, Watchface};

fn main() -> epd_1in54_d67::EpdResult<()> {
    env_logger::init();

    log::info!("Initializing display...");
    let device = Device::new(DeviceConfig::default())?;
    let mut watchface = Watchface::new(FsStorage::new(WATCHFACE_ROOT), device.display);

    if let Err(e) = watchface.init(CLEAR_SETTLE) {
        log::error!("Initial clear failed: {e}");
    }

    // Failures have already replaced the watchface with an error screen
    if let Err(e) = watchface.display(WATCHFACE_FILE) {
        log::warn!("Watchface {WATCHFACE_FILE} not shown: {e}");
    }

    Ok(())
}
