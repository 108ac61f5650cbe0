//! Core classification engine: raw sample reading, DSP primitives, and
//! the candidate sweep

pub mod classifier;
pub mod dsp;
pub mod reader;

pub use classifier::{classify, FormatClassifier};
pub use dsp::SpectralPowerMeter;
pub use reader::RawReader;
