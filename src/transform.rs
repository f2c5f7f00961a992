//! Per-channel color transforms: reorder, gamma, brightness.
//!
//! Gamma correction and brightness scaling collapse into one 256-entry
//! lookup table built at construction time, so the per-byte cost during
//! transmission is a single indexed load. Channel reordering is applied
//! first, by redirecting which source byte feeds the table, then the table
//! maps the value. Source buffers are never modified.

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode applied before brightness scaling.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    Gamma2_2,
}

impl Default for Gamma {
    fn default() -> Self {
        Self::Gamma2_2
    }
}

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

/// Linear lookup table (identity function).
const LINEAR_TABLE: [u8; 256] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
    26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49,
    50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 72, 73,
    74, 75, 76, 77, 78, 79, 80, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94, 95, 96, 97,
    98, 99, 100, 101, 102, 103, 104, 105, 106, 107, 108, 109, 110, 111, 112, 113, 114, 115, 116,
    117, 118, 119, 120, 121, 122, 123, 124, 125, 126, 127, 128, 129, 130, 131, 132, 133, 134, 135,
    136, 137, 138, 139, 140, 141, 142, 143, 144, 145, 146, 147, 148, 149, 150, 151, 152, 153, 154,
    155, 156, 157, 158, 159, 160, 161, 162, 163, 164, 165, 166, 167, 168, 169, 170, 171, 172, 173,
    174, 175, 176, 177, 178, 179, 180, 181, 182, 183, 184, 185, 186, 187, 188, 189, 190, 191, 192,
    193, 194, 195, 196, 197, 198, 199, 200, 201, 202, 203, 204, 205, 206, 207, 208, 209, 210, 211,
    212, 213, 214, 215, 216, 217, 218, 219, 220, 221, 222, 223, 224, 225, 226, 227, 228, 229, 230,
    231, 232, 233, 234, 235, 236, 237, 238, 239, 240, 241, 242, 243, 244, 245, 246, 247, 248, 249,
    250, 251, 252, 253, 254, 255,
];

/// Scale `value` by `scale`, treating `scale` as a fraction of 256.
///
/// `scale == 255` returns `value` unchanged and `scale == 0` returns zero;
/// the `+ 1` keeps full brightness lossless.
#[must_use]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (scale as u16 + 1)) >> 8) as u8
}

/// Generate a combined gamma correction and brightness scaling lookup table.
///
/// The result is a table where `table[input_value]` gives the final output
/// value, so the hot path pays for one lookup instead of two operations.
const fn combined_table(gamma: Gamma, brightness: u8) -> [u8; 256] {
    let gamma_table = match gamma {
        Gamma::Linear => &LINEAR_TABLE,
        Gamma::Gamma2_2 => &GAMMA_2_2_TABLE,
    };

    let mut result = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        result[index] = scale8(gamma_table[index], brightness);
        index += 1;
    }
    result
}

// ============================================================================
// Channel Order
// ============================================================================

/// How each 3-byte color group maps onto the wire.
///
/// Strips that expect GRB while the application stores RGB (the common
/// WS2812 case) use [`Swapped`](Self::Swapped) to exchange the first two
/// channels of every group during readout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelOrder {
    /// Emit channels in stored order.
    Stored,
    /// Exchange the first two channels of each 3-byte group.
    Swapped,
}

impl Default for ChannelOrder {
    fn default() -> Self {
        Self::Stored
    }
}

// ============================================================================
// ChannelTransform
// ============================================================================

/// The full per-byte color pipeline: reorder, then gamma, then brightness.
///
/// # Example
///
/// ```
/// use shift_strip::transform::{ChannelOrder, ChannelTransform, Gamma};
///
/// let transform = ChannelTransform::new(Gamma::Linear, 255, ChannelOrder::Swapped);
/// let rgb = [10, 20, 30];
/// // First two channels of the group trade places; values pass through.
/// assert_eq!(transform.read(&rgb, 0), 20);
/// assert_eq!(transform.read(&rgb, 1), 10);
/// assert_eq!(transform.read(&rgb, 2), 30);
/// ```
#[derive(Clone, Copy)]
pub struct ChannelTransform {
    table: [u8; 256],
    order: ChannelOrder,
}

impl ChannelTransform {
    /// Build the transform, pre-computing the combined gamma/brightness table.
    #[must_use]
    pub const fn new(gamma: Gamma, brightness: u8, order: ChannelOrder) -> Self {
        Self {
            table: combined_table(gamma, brightness),
            order,
        }
    }

    /// Map a single channel value through gamma and brightness.
    #[must_use]
    pub const fn lookup(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    /// Read the channel value at `index`, honoring the channel order.
    ///
    /// A trailing byte with no swap partner (buffer length not a multiple
    /// of 3) is read in place.
    #[must_use]
    pub fn read(&self, buffer: &[u8], index: usize) -> u8 {
        let source = match self.order {
            ChannelOrder::Stored => index,
            ChannelOrder::Swapped => match index % 3 {
                0 if index + 1 < buffer.len() => index + 1,
                1 => index - 1,
                _ => index,
            },
        };
        self.lookup(buffer[source])
    }
}

impl core::fmt::Debug for ChannelTransform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChannelTransform")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
