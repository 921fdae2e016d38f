//! Widget logic
//!
//! Pure computation behind the novelty widgets: age arithmetic, clock
//! formatting, and media-file helpers. Rendering lives in the UI layer.

pub mod age;
pub mod clock;
pub mod media;
