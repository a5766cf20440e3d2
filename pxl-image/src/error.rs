/// Errors building a [`PalettedImage`](crate::PalettedImage) or [`PackedView`](crate::PackedView)
/// from raw buffers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Row stride is narrower than one row of pixels
    #[error("stride {stride} is narrower than a row of {row}")]
    StrideTooNarrow { stride: usize, row: usize },

    /// The buffer does not cover the image's full extent
    #[error("buffer too short: {len} (needs {needed})")]
    BufferTooShort { len: usize, needed: usize },

    /// Dimensions overflow the address space
    #[error("image too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },

    /// A pixel refers to a palette entry that does not exist
    #[error("palette index {index} at ({x}, {y}) out of range for {len} colors")]
    IndexOutOfRange { index: u8, x: u32, y: u32, len: usize },

    /// A requested region is not inside the image
    #[error("region {width}x{height}+{x}+{y} is outside of the {bounds:?} image")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32, bounds: (u32, u32) },
}

/// Length a buffer needs to hold `height` rows of `row` scalars placed `stride` scalars apart.
///
/// The last row does not need to be padded to the full stride.
pub(crate) fn required_len(width: u32, height: u32, row: usize, stride: usize) -> Result<usize, LayoutError> {
    if stride < row {
        return Err(LayoutError::StrideTooNarrow { stride, row });
    }
    if height == 0 {
        return Ok(0);
    }
    (height as usize - 1).checked_mul(stride).and_then(|n| n.checked_add(row)).ok_or(LayoutError::TooLarge { width, height })
}
