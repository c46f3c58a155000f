//! Pen colors, written the way users write them: `#rgb` or `#rrggbb`.

/// An opaque sRGB color.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Default pen color, a loud magenta.
    pub const MAGENTA: Self = Self::new(255, 0, 255);
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
    /// Unpremultiplied `[r, g, b, a]` in `[0, 1]`.
    #[must_use]
    pub fn to_f32_array(self, alpha: f32) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            alpha.clamp(0.0, 1.0),
        ]
    }
}
impl Default for Rgb {
    fn default() -> Self {
        Self::MAGENTA
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 3 or 6 hex digits")]
    BadLength,
    #[error("invalid hex digit")]
    BadDigit,
}

/// Parse `#rgb` or `#rrggbb`, case insensitive. The `#` is optional.
impl std::str::FromStr for Rgb {
    type Err = ColorParseError;
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        let hex = str.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(ColorParseError::BadDigit);
        }
        let digit = |c: u8| -> Result<u8, ColorParseError> {
            char::from(c)
                .to_digit(16)
                .and_then(|d| u8::try_from(d).ok())
                .ok_or(ColorParseError::BadDigit)
        };
        match hex.as_bytes() {
            &[r, g, b] => {
                // Short form repeats each digit, #f0a == #ff00aa
                let (r, g, b) = (digit(r)?, digit(g)?, digit(b)?);
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            &[r1, r0, g1, g0, b1, b0] => Ok(Self::new(
                digit(r1)? << 4 | digit(r0)?,
                digit(g1)? << 4 | digit(g0)?,
                digit(b1)? << 4 | digit(b0)?,
            )),
            _ => Err(ColorParseError::BadLength),
        }
    }
}
impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
impl serde::Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Human readable hex rather than a struct of three numbers.
        serializer.collect_str(self)
    }
}
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let str =
            <std::borrow::Cow<'de, str> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        str.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::{ColorParseError, Rgb};
    #[test]
    fn parse_short_and_long() {
        assert_eq!("#f0f".parse(), Ok(Rgb::MAGENTA));
        assert_eq!("#272828".parse(), Ok(Rgb::new(0x27, 0x28, 0x28)));
        assert_eq!("AbCdEf".parse(), Ok(Rgb::new(0xab, 0xcd, 0xef)));
    }
    #[test]
    fn parse_errors() {
        assert_eq!("#ff".parse::<Rgb>(), Err(ColorParseError::BadLength));
        assert_eq!("#ggg".parse::<Rgb>(), Err(ColorParseError::BadDigit));
        assert_eq!("#é00".parse::<Rgb>(), Err(ColorParseError::BadDigit));
    }
    #[test]
    fn display_is_long_form() {
        assert_eq!(Rgb::MAGENTA.to_string(), "#ff00ff");
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "#010203");
    }
}
