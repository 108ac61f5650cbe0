//! Classification result types

pub mod result;

pub use result::{CandidateScore, ClassificationResult, Endianness, FormatClass, SampleFormat};
