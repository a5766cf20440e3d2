//! Color access for the `pxl` markup renderer.
//!
//! The renderer never decodes anything itself, it only needs two capabilities from an image:
//! - [`ColorAccess::color_at`], the color of one in-bounds pixel in the image's native pixel type
//! - optionally, [`ColorAccess::storage`], a description of the in-memory pixel layout so that
//!   dense buffers can be read with stride arithmetic instead of per-pixel calls
//!
//! Every [`image::ImageBuffer`] with `u8`, `u16` or `f32` channels implements [`ColorAccess`],
//! as do [`PalettedImage`] (index table + palette) and [`PackedView`] (borrowed RGBA8 window).

mod private {
    /// Sealed trait to prevent external implementations of traits
    pub trait Sealed {}
}
use private::Sealed;
mod channel;
pub use crate::channel::*;
mod access;
pub use crate::access::*;
mod error;
pub use crate::error::*;
mod paletted;
pub use crate::paletted::*;
mod packed;
pub use crate::packed::*;

/// Number of channels in a packed pixel, the only dense layout with a direct fast path
pub const PACKED_CHANNELS: usize = 4;
