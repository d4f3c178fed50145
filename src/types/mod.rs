// ABOUTME: Validated domain types for pull requests.
// ABOUTME: Image references, target architectures, and clamped percentages.

mod architecture;
mod image_ref;
mod percent;

pub use architecture::{Architecture, ParseArchitectureError};
pub use image_ref::{ImageName, ImageRef, ParseImageRefError};
pub use percent::Percent;
