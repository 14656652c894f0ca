mod logbook;
mod record;
mod settings;
pub mod sqlite;

pub use logbook::{EditOutcome, Logbook, RemoveOutcome};
pub use record::{EggRecordPatch, EggRecordStorage, NewEggRecord};
pub use settings::{ReminderSettingsStorage, SettingsPatch};
