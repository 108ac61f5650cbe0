//! RawProbe - Guess the encoding of headerless PCM audio
//!
//! Inspects a raw audio file of unknown encoding and infers, by spectral
//! analysis alone, the PCM sample format, the byte order, and whether the
//! stream is mono or interleaved stereo.
//!
//! ## How it works
//!
//! Natural audio concentrates its energy at low frequencies; the same
//! bytes decoded with the wrong sample width, signedness, or byte order
//! look close to white noise. The classifier decodes the file under every
//! candidate (format, endianness) pair, once mono and once striding over
//! interleaved neighbours, integrates several windows for SNR, folds them
//! through a sinc-windowed polyphase decimator, and scores each candidate
//! by its low/high band power ratio. The largest ratio wins.
//!
//! ## Module Structure
//!
//! - `core` - the classification engine: raw reader, DSP kernels, sweep
//! - `detection` - result types and the raw codec tag mapping
//! - `testgen` - deterministic raw PCM synthesis for the test suites
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rawprobe::classify;
//!
//! let result = classify("mystery.raw")?;
//!
//! println!(
//!     "{} x{} (decode with -f {})",
//!     result.class,
//!     result.channels,
//!     result.codec_tag()
//! );
//! ```
//!
//! ## Supported verdicts
//!
//! | Format         | Endianness     | Channels |
//! |----------------|----------------|----------|
//! | signed 8-bit   | n/a            | 1 or 2   |
//! | unsigned 8-bit | n/a            | 1 or 2   |
//! | signed 16-bit  | little or big  | 1 or 2   |
//! | 32-bit float   | little or big  | 1 or 2   |
//! | 64-bit float   | little or big  | 1 or 2   |

// Classification engine
pub mod core;

// Result types
pub mod detection;

// Test signal generation
pub mod testgen;

// Re-export the common surface at the crate root
pub use crate::core::{classify, FormatClassifier};
pub use crate::detection::{
    CandidateScore, ClassificationResult, Endianness, FormatClass, SampleFormat,
};
