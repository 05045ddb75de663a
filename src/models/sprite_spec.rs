use crate::error::SpriteError;
use msx_quant::DEFAULT_SPRITE_SIZE;

/// Target dimensions for one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSpec {
    pub width: u32,
    pub height: u32,
}

impl SpriteSpec {
    /// 64x64, the classic sprite size used when nothing else is asked for.
    pub const DEFAULT: Self = Self {
        width: DEFAULT_SPRITE_SIZE,
        height: DEFAULT_SPRITE_SIZE,
    };

    /// Strict constructor: both dimensions must lie in `1..=max`.
    pub fn new(width: u32, height: u32, max: u32) -> Result<Self, SpriteError> {
        if width == 0 || height == 0 || width > max || height > max {
            return Err(SpriteError::InvalidDimension { width, height, max });
        }
        Ok(Self { width, height })
    }

    /// Lenient constructor for free-form input.
    ///
    /// Each value goes through [`parse_dimension`] and is then capped at
    /// `max`. Never fails.
    pub fn clamped(width: &str, height: &str, max: u32) -> Self {
        Self {
            width: parse_dimension(width).min(max),
            height: parse_dimension(height).min(max),
        }
    }

    /// Download file name, e.g. `msx-sprite-64x64.png`.
    pub fn file_name(&self) -> String {
        format!("msx-sprite-{}x{}.png", self.width, self.height)
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Default for SpriteSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Read a dimension the way a form number field is read.
///
/// Leading whitespace is skipped, then an optional sign and the leading
/// digits are taken; anything after them is ignored (`"32px"` is 32).
/// Missing, unparsable, zero or negative values become 1.
pub fn parse_dimension(input: &str) -> u32 {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];

    if negative || digits.is_empty() {
        return 1;
    }
    // All digits: the only possible parse failure is overflow
    digits.parse::<u32>().unwrap_or(u32::MAX).max(1)
}
