mod check;
mod delivery;
mod poller;

pub use check::should_fire;
pub use delivery::NotificationChannel;
pub use poller::{ReminderPoller, TICK_INTERVAL};
