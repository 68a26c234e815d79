pub mod evidence;
pub mod guru;
pub mod report;
pub mod session_entry;
pub mod settings;

pub use evidence::{Evidence, EvidenceKind};
pub use guru::{Guru, GuruRecord};
pub use report::{Report, ReportCategory};
pub use session_entry::SessionEntryRow;
pub use settings::AppSettings;
