//! Streaming converter from packed binary DNA reads to FASTQ.
//!
//! - One byte per base reading: top 2 bits = base (`A=00`, `C=01`, `G=10`,
//!   `T=11`), low 6 bits = quality score (0..=63).
//! - Fragments are fixed-length runs of `L` such bytes, no delimiters.
//! - Streaming, fragment-by-fragment (no full-file buffering).
//! - Plain and `.gz` input (auto-detect).
//! - Clean end of stream at a fragment boundary is an absence; a stream
//!   ending mid-fragment is a fatal truncation error.
//! - Optional `mmap` for plain files; `zlib` feature for system-zlib parity.
//! - Optional async API behind `async` feature.

pub mod convert;
pub mod error;
pub mod fastq;
pub mod fragment;
pub mod options;
pub mod reader;
pub mod reading;
pub mod writer;
mod util;

#[cfg(feature = "async")]
pub mod async_reader;

pub use crate::convert::{convert, convert_path};
pub use crate::error::{ConvertError, IoContext, ValidationError};
pub use crate::fastq::{FastqWriter, render_fragment};
pub use crate::fragment::Fragment;
pub use crate::options::ConvertOptions;
pub use crate::reader::{FragmentReader, Source};
pub use crate::reading::{Base, BaseReading, QualityScore};
pub use crate::writer::FragmentWriter;

#[cfg(feature = "async")]
pub use crate::async_reader::{AsyncFragmentReader, AsyncSource};
