// src/detection/result.rs
//
// Classification result types and the raw codec tag mapping

use serde::{Deserialize, Serialize};
use std::fmt;

/// PCM sample formats the raw reader can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleFormat {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl SampleFormat {
    /// Sample width in bytes
    pub fn width(&self) -> usize {
        match self {
            SampleFormat::Int8 | SampleFormat::Uint8 => 1,
            SampleFormat::Int16 | SampleFormat::Uint16 => 2,
            SampleFormat::Int32 | SampleFormat::Uint32 | SampleFormat::Float32 => 4,
            SampleFormat::Float64 => 8,
        }
    }

    /// Whether samples are IEEE floating point
    pub fn is_float(&self) -> bool {
        matches!(self, SampleFormat::Float32 | SampleFormat::Float64)
    }

    /// Human-readable format name
    pub fn name(&self) -> &'static str {
        match self {
            SampleFormat::Int8 => "signed 8-bit",
            SampleFormat::Uint8 => "unsigned 8-bit",
            SampleFormat::Int16 => "signed 16-bit",
            SampleFormat::Uint16 => "unsigned 16-bit",
            SampleFormat::Int32 => "signed 32-bit",
            SampleFormat::Uint32 => "unsigned 32-bit",
            SampleFormat::Float32 => "32-bit float",
            SampleFormat::Float64 => "64-bit float",
        }
    }
}

/// Byte order of a sample stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Byte order of the machine running the classifier
    pub fn host() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => write!(f, "little-endian"),
            Endianness::Big => write!(f, "big-endian"),
        }
    }
}

/// A (sample format, byte order) pair - the unit the classifier scores
/// and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatClass {
    pub format: SampleFormat,
    pub endian: Endianness,
}

impl FormatClass {
    pub fn new(format: SampleFormat, endian: Endianness) -> Self {
        Self { format, endian }
    }

    /// Conventional raw PCM codec tag, as understood by command-line
    /// decoders ("-f s16le" and friends). Single-byte formats carry no
    /// endianness suffix.
    pub fn codec_tag(&self) -> &'static str {
        let le = self.endian == Endianness::Little;
        match self.format {
            SampleFormat::Int8 => "s8",
            SampleFormat::Uint8 => "u8",
            SampleFormat::Int16 => {
                if le {
                    "s16le"
                } else {
                    "s16be"
                }
            }
            SampleFormat::Uint16 => {
                if le {
                    "u16le"
                } else {
                    "u16be"
                }
            }
            SampleFormat::Int32 => {
                if le {
                    "s32le"
                } else {
                    "s32be"
                }
            }
            SampleFormat::Uint32 => {
                if le {
                    "u32le"
                } else {
                    "u32be"
                }
            }
            SampleFormat::Float32 => {
                if le {
                    "f32le"
                } else {
                    "f32be"
                }
            }
            SampleFormat::Float64 => {
                if le {
                    "f64le"
                } else {
                    "f64be"
                }
            }
        }
    }
}

impl fmt::Display for FormatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.format.width() == 1 {
            write!(f, "{}", self.format.name())
        } else {
            write!(f, "{} {}", self.format.name(), self.endian)
        }
    }
}

/// Final classification verdict for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Best-guess sample format and byte order
    pub class: FormatClass,
    /// Channel count, 1 or 2
    pub channels: u32,
}

impl ClassificationResult {
    /// Codec tag of the winning class
    pub fn codec_tag(&self) -> &'static str {
        self.class.codec_tag()
    }
}

/// Per-candidate band powers and features, surfaced for verbose output
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CandidateScore {
    pub class: FormatClass,
    /// Low-band power from the mono pass
    pub p_lo: f32,
    /// High-band power from the mono pass
    pub p_hi_mono: f32,
    /// High-band power from the stereo pass
    pub p_hi_stereo: f32,
    /// Mono decision feature: p_lo / p_hi_mono
    pub mono_feat: f32,
    /// Stereo decision feature: p_lo / p_hi_stereo
    pub stereo_feat: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(SampleFormat::Int8.width(), 1);
        assert_eq!(SampleFormat::Uint8.width(), 1);
        assert_eq!(SampleFormat::Int16.width(), 2);
        assert_eq!(SampleFormat::Uint16.width(), 2);
        assert_eq!(SampleFormat::Int32.width(), 4);
        assert_eq!(SampleFormat::Uint32.width(), 4);
        assert_eq!(SampleFormat::Float32.width(), 4);
        assert_eq!(SampleFormat::Float64.width(), 8);
    }

    #[test]
    fn test_codec_tags() {
        let s16be = FormatClass::new(SampleFormat::Int16, Endianness::Big);
        assert_eq!(s16be.codec_tag(), "s16be");

        let f32le = FormatClass::new(SampleFormat::Float32, Endianness::Little);
        assert_eq!(f32le.codec_tag(), "f32le");

        // Width-1 tags ignore the endianness bit
        let s8_le = FormatClass::new(SampleFormat::Int8, Endianness::Little);
        let s8_be = FormatClass::new(SampleFormat::Int8, Endianness::Big);
        assert_eq!(s8_le.codec_tag(), s8_be.codec_tag());
    }

    #[test]
    fn test_display_single_byte_omits_endianness() {
        let u8_class = FormatClass::new(SampleFormat::Uint8, Endianness::Big);
        assert!(!format!("{}", u8_class).contains("endian"));

        let s16_class = FormatClass::new(SampleFormat::Int16, Endianness::Big);
        assert!(format!("{}", s16_class).contains("big-endian"));
    }
}
