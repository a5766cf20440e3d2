//! Channel scalars and their reduction to 8 bits.
//!
//! The final step to 8 bits discards low-order bits, it never rounds up:
//! ```
//! use pxl_image::Channel;
//! assert_eq!(0xABu8.reduce(), 0xAB);
//! assert_eq!(0xFFFFu16.reduce(), 0xFF);
//! assert_eq!(0x12FFu16.reduce(), 0x12);
//! assert_eq!(1.0f32.reduce(), 0xFF);
//! ```

use super::*;

/// The raw scalar type of one color channel (`u8`, `u16` or `f32`)
pub trait Channel:
    'static
    + Sealed
    + Clone
    + Copy
    + Send
    + Sync
    + Sized
    + PartialEq
    + ::core::fmt::Debug
    + ::num_traits::NumCast
    + ::num_traits::ToPrimitive
    + ::image::Primitive
{
    /// Native bit depth of the channel
    const BITS: u32;
    /// Reduce the channel to 8 bits by dropping the low-order bits
    fn reduce(self) -> u8;
}

impl Sealed for u8 {}
impl Channel for u8 {
    const BITS: u32 = 8;
    #[inline(always)]
    fn reduce(self) -> u8 { self }
}
impl Sealed for u16 {}
impl Channel for u16 {
    const BITS: u32 = 16;
    #[inline(always)]
    fn reduce(self) -> u8 { (self >> 8) as u8 }
}
impl Sealed for f32 {}
impl Channel for f32 {
    const BITS: u32 = 32;
    /// Scaled to the 16-bit range first, so `f32` agrees with `u16` on every representable value
    #[inline]
    fn reduce(self) -> u8 {
        let wide = (::num_traits::clamp(self, 0., 1.) * u16::MAX as f32).round() as u16;
        wide.reduce()
    }
}

/// A color in an image's native pixel representation.
///
/// Equality is the native [`PartialEq`], so two colors that only differ in alpha
/// or in bits dropped by [`Channel::reduce`] are *different* colors here even though
/// [`Color::to_rgb8`] gives the same triple.
///
/// Alpha is dropped without premultiplying, a fully transparent `Rgba([10, 20, 30, 0])`
/// reduces to `[10, 20, 30]`, not to black.
pub trait Color: Copy + PartialEq {
    /// The channel scalar of the color
    type Channel: Channel;
    /// Number of channels in the native representation
    const CHANNELS: usize;
    /// Read a color from exactly [`Color::CHANNELS`] channels
    fn read_channels(channels: &[Self::Channel]) -> Self;
    /// Reduce to an 8-bit RGB triple, alpha is discarded
    fn to_rgb8(&self) -> [u8; 3];
}

impl<P> Color for P
where
    P: ::image::Pixel + PartialEq,
    P::Subpixel: Channel,
{
    type Channel = P::Subpixel;
    const CHANNELS: usize = P::CHANNEL_COUNT as usize;
    #[inline(always)]
    fn read_channels(channels: &[Self::Channel]) -> Self { *P::from_slice(channels) }
    #[inline]
    fn to_rgb8(&self) -> [u8; 3] { self.to_rgb().0.map(Channel::reduce) }
}

#[cfg(test)]
mod tests {
    use image::{Luma, LumaA, Rgb, Rgba};

    use super::*;

    #[test]
    fn test_wide_channels_shift_down() {
        assert_eq!(Rgb([0xFFFFu16, 0x8000, 0x00FF]).to_rgb8(), [0xFF, 0x80, 0x00]);
        assert_eq!(Rgba([0x1234u16, 0xABCD, 0x0F0F, 0]).to_rgb8(), [0x12, 0xAB, 0x0F]);
    }

    #[test]
    fn test_float_channels_agree_with_u16() {
        for v in [0u16, 1, 0x00FF, 0x0100, 0x7FFF, 0x8000, 0xFF00, 0xFFFF] {
            let f = v as f32 / u16::MAX as f32;
            assert_eq!(f.reduce(), v.reduce(), "{v:#06x}");
        }
        assert_eq!((-0.5f32).reduce(), 0);
        assert_eq!(2.0f32.reduce(), 0xFF);
    }

    #[test]
    fn test_alpha_discarded() {
        assert_eq!(Rgba([10u8, 20, 30, 0]).to_rgb8(), [10, 20, 30]);
        assert_eq!(LumaA([7u8, 255]).to_rgb8(), [7, 7, 7]);
        assert_eq!(Luma([0xABCDu16]).to_rgb8(), [0xAB; 3]);
    }

    #[test]
    fn test_native_equality_not_reduced() {
        let a = Rgba([1u8, 2, 3, 255]);
        let b = Rgba([1u8, 2, 3, 0]);
        assert_eq!(a.to_rgb8(), b.to_rgb8());
        assert!(a != b);
        assert!(Rgb([0xFF00u16, 0, 0]) != Rgb([0xFF01u16, 0, 0]));
    }

    #[test]
    fn test_read_channels() {
        assert_eq!(Rgba::<u8>::read_channels(&[1, 2, 3, 4]), Rgba([1, 2, 3, 4]));
        assert_eq!(<Rgba<u8> as Color>::CHANNELS, 4);
        assert_eq!(<Rgb<u16> as Color>::CHANNELS, 3);
    }
}
