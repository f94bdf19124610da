pub mod session;

pub use session::{apply_preset, run_session, Preset};
