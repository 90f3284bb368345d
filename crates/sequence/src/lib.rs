//! Lapse Sequence — timelapse directories on disk
//!
//! Reads and writes the per-frame PP3 settings sidecars that sit next to
//! raw files, and feeds them to the keyframe engine:
//! - **pp3:** Ordered INI-style settings documents
//! - **settings:** Mapping documents to and from engine values
//! - **discovery / loader:** Frames, keyframes, and source size
//! - **writer:** A [`lapse_core::FrameSink`] that saves sidecars
//! - **backup:** Timestamped copies before overwriting

pub mod backup;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod pp3;
pub mod settings;
pub mod writer;

pub use backup::{backup_settings, backup_settings_at, Backup};
pub use discovery::{discover_frames, sidecar_path, FrameFile};
pub use error::SettingsError;
pub use loader::{FailedSidecar, LoadedKeyframe, LoadedSequence};
pub use pp3::Pp3Document;
pub use settings::{apply_frame, read_record};
pub use writer::Pp3Writer;
