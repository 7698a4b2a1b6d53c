pub mod capabilities;
pub mod codec;
pub mod document;
pub mod error;
pub mod image;
pub mod players;
pub mod preferences;
pub mod profile;
pub mod validation;

pub use capabilities::{DeviceCapabilities, DeviceFamily};
pub use image::{ImageQuery, ImageResolver, ImageRole, LibraryItem};
pub use players::PlayerKind;
pub use preferences::{PlaybackPreferences, UserSettings};
pub use profile::DeviceProfile;
