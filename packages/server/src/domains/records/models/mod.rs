mod history;
mod note;
mod record;

pub use history::{HistoryAction, RecordHistory};
pub use note::Note;
pub use record::{NewRecord, Record, RecordFilter};
