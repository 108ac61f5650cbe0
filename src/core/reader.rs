// src/core/reader.rs
//
// Random-access reader for headerless PCM files. Reads fixed-width samples
// in any supported format, byte-swaps to host order on the fly, and can
// stride over interleaved neighbours to isolate one channel.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::detection::{Endianness, SampleFormat};

/// Byte source over a candidate raw audio file.
///
/// The reader never allocates: samples land in caller-owned buffers. All
/// seeks are absolute from the start of the file.
#[derive(Debug)]
pub struct RawReader {
    file: File,
}

impl RawReader {
    /// Open a raw audio file. An unopenable file is a fatal error and
    /// carries the path in its context.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open raw audio file: {}", path.as_ref().display()))?;
        Ok(Self { file })
    }

    /// Seek to an absolute byte offset from the start of the file.
    pub fn reset(&mut self, offset: u64) -> Result<()> {
        self.file.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Read `count` samples of `format` into `buf` at the current position.
    ///
    /// With `stride > 1` the reader skips `(stride - 1)` interleaved
    /// neighbour samples after each sample it keeps, so a stride of 2 picks
    /// one channel out of an interleaved stereo stream. When the requested
    /// byte order differs from the host, the filled portion of `buf` is
    /// swapped in place group-wise by the sample width.
    ///
    /// Returns the number of samples actually read. Short reads at EOF and
    /// I/O errors both return the partial count.
    pub fn read_samples(
        &mut self,
        buf: &mut [u8],
        count: usize,
        stride: usize,
        format: SampleFormat,
        endian: Endianness,
    ) -> usize {
        let width = format.width();
        let read = if stride > 1 {
            self.read_strided(buf, width, count, stride)
        } else {
            self.read_linear(buf, width, count)
        };

        if width > 1 && endian != Endianness::host() {
            swap_bytes(&mut buf[..read * width], width);
        }

        read
    }

    fn read_linear(&mut self, buf: &mut [u8], width: usize, count: usize) -> usize {
        let want = width * count;
        let mut got = 0usize;
        while got < want {
            match self.file.read(&mut buf[got..want]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(_) => break,
            }
        }
        // Only complete samples count
        got / width
    }

    fn read_strided(&mut self, buf: &mut [u8], width: usize, count: usize, stride: usize) -> usize {
        let gap = ((stride - 1) * width) as i64;
        let mut read = 0usize;
        for n in 0..count {
            let dst = &mut buf[n * width..(n + 1) * width];
            if self.file.read_exact(dst).is_err() {
                break;
            }
            read += 1;
            if self.file.seek(SeekFrom::Current(gap)).is_err() {
                break;
            }
        }
        read
    }
}

/// Reverse the byte order of every `width`-sized group in `buf`.
///
/// A width of one is an identity transform, which keeps the call benign for
/// single-byte formats that carry a nominal endianness.
pub fn swap_bytes(buf: &mut [u8], width: usize) {
    if width <= 1 {
        return;
    }
    for group in buf.chunks_exact_mut(width) {
        group.reverse();
    }
}

/// Widen raw samples (already in host byte order) to `f32` by direct
/// numeric cast, one element per output slot.
///
/// No scaling is applied: signed formats stay centred on zero and unsigned
/// formats keep their positive bias. A mis-matched decoding therefore keeps
/// its spectral signature, which is exactly what the classifier feeds on.
pub fn widen_to_float(raw: &[u8], out: &mut [f32], format: SampleFormat) {
    match format {
        SampleFormat::Int8 => {
            for (dst, &src) in out.iter_mut().zip(raw.iter()) {
                *dst = src as i8 as f32;
            }
        }
        SampleFormat::Uint8 => {
            for (dst, &src) in out.iter_mut().zip(raw.iter()) {
                *dst = src as f32;
            }
        }
        SampleFormat::Int16 => {
            for (dst, src) in out.iter_mut().zip(raw.chunks_exact(2)) {
                *dst = i16::from_ne_bytes([src[0], src[1]]) as f32;
            }
        }
        SampleFormat::Uint16 => {
            for (dst, src) in out.iter_mut().zip(raw.chunks_exact(2)) {
                *dst = u16::from_ne_bytes([src[0], src[1]]) as f32;
            }
        }
        SampleFormat::Int32 => {
            for (dst, src) in out.iter_mut().zip(raw.chunks_exact(4)) {
                *dst = i32::from_ne_bytes([src[0], src[1], src[2], src[3]]) as f32;
            }
        }
        SampleFormat::Uint32 => {
            for (dst, src) in out.iter_mut().zip(raw.chunks_exact(4)) {
                *dst = u32::from_ne_bytes([src[0], src[1], src[2], src[3]]) as f32;
            }
        }
        SampleFormat::Float32 => {
            for (dst, src) in out.iter_mut().zip(raw.chunks_exact(4)) {
                *dst = f32::from_ne_bytes([src[0], src[1], src[2], src[3]]);
            }
        }
        SampleFormat::Float64 => {
            for (dst, src) in out.iter_mut().zip(raw.chunks_exact(8)) {
                *dst = f64::from_ne_bytes([
                    src[0], src[1], src[2], src[3], src[4], src[5], src[6], src[7],
                ]) as f32;
            }
        }
    }
}
