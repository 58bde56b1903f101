//! Gzip body decoding with a reused inflater
//!
//! Allocating a fresh inflate state (and its 32 KiB window) per response dominates
//! the cost of reading small gzip bodies, so each client keeps one [`GzipDecoder`]
//! whose inflater is created on first use and reset for every later body. The
//! inflater sits behind its own mutex, independent of the session lock.
//!
//! Framing follows RFC 1952: header with optional extra/name/comment/header-CRC
//! fields, raw deflate payload, then CRC32 and ISIZE trailer. Concatenated members
//! are decoded back to back.

use crate::error::DecodeError;
use flate2::{Crc, Decompress, FlushDecompress, Status};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const METHOD_DEFLATE: u8 = 8;
const HEADER_LEN: usize = 10;
const TRAILER_LEN: usize = 8;

const FLAG_HCRC: u8 = 0x02;
const FLAG_EXTRA: u8 = 0x04;
const FLAG_NAME: u8 = 0x08;
const FLAG_COMMENT: u8 = 0x10;

/// Minimum spare output capacity kept available for each inflate step
const OUTPUT_CHUNK: usize = 8 * 1024;

struct Inflater {
    decompress: Decompress,
    crc: Crc,
}

impl Inflater {
    fn new() -> Self {
        Self {
            decompress: Decompress::new(false),
            crc: Crc::new(),
        }
    }

    /// Inflate one raw deflate stream from the start of `input` into `out`
    ///
    /// Returns the number of compressed bytes consumed.
    fn inflate(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<usize, DecodeError> {
        self.decompress.reset(false);

        loop {
            if out.capacity() - out.len() < OUTPUT_CHUNK {
                out.reserve(OUTPUT_CHUNK.max(input.len()));
            }

            let consumed = self.decompress.total_in() as usize;
            let produced = self.decompress.total_out();
            let status = self
                .decompress
                .decompress_vec(&input[consumed..], out, FlushDecompress::None)
                .map_err(|e| DecodeError::Gzip(format!("corrupt deflate stream: {e}")))?;

            match status {
                Status::StreamEnd => return Ok(self.decompress.total_in() as usize),
                Status::Ok | Status::BufError => {
                    let stalled = self.decompress.total_in() as usize == consumed
                        && self.decompress.total_out() == produced;
                    if stalled {
                        return Err(DecodeError::Gzip("truncated deflate stream".into()));
                    }
                }
            }
        }
    }

    /// Decode one gzip member, returning the number of input bytes it occupied
    fn member(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<usize, DecodeError> {
        let header_len = parse_header(input)?;
        let start = out.len();
        let deflate_len = self.inflate(&input[header_len..], out)?;

        let trailer_at = header_len + deflate_len;
        let trailer = input
            .get(trailer_at..trailer_at + TRAILER_LEN)
            .ok_or_else(|| DecodeError::Gzip("missing gzip trailer".into()))?;
        let expected_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let expected_len = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);

        self.crc.reset();
        self.crc.update(&out[start..]);
        if self.crc.sum() != expected_crc {
            return Err(DecodeError::Gzip("CRC32 mismatch".into()));
        }
        if self.crc.amount() != expected_len {
            return Err(DecodeError::Gzip("length mismatch".into()));
        }

        Ok(trailer_at + TRAILER_LEN)
    }
}

/// Length of the member header at the start of `input`
fn parse_header(input: &[u8]) -> Result<usize, DecodeError> {
    if input.len() < HEADER_LEN {
        return Err(DecodeError::Gzip("truncated gzip header".into()));
    }
    if input[..2] != GZIP_MAGIC {
        return Err(DecodeError::Gzip("not a gzip stream".into()));
    }
    if input[2] != METHOD_DEFLATE {
        return Err(DecodeError::Gzip(format!(
            "unsupported compression method {}",
            input[2]
        )));
    }

    let flags = input[3];
    let mut pos = HEADER_LEN;
    let truncated = || DecodeError::Gzip("truncated gzip header".into());

    if flags & FLAG_EXTRA != 0 {
        let len_bytes = input.get(pos..pos + 2).ok_or_else(truncated)?;
        pos += 2 + u16::from_le_bytes([len_bytes[0], len_bytes[1]]) as usize;
    }
    for flag in [FLAG_NAME, FLAG_COMMENT] {
        if flags & flag != 0 {
            let rest = input.get(pos..).ok_or_else(truncated)?;
            let nul = rest.iter().position(|&b| b == 0).ok_or_else(truncated)?;
            pos += nul + 1;
        }
    }
    if flags & FLAG_HCRC != 0 {
        pos += 2;
    }

    if pos > input.len() {
        return Err(truncated());
    }
    Ok(pos)
}

/// Shared, lazily constructed gzip decoder
#[derive(Default)]
pub struct GzipDecoder {
    inflater: Mutex<Option<Inflater>>,
    instances: AtomicUsize,
}

impl GzipDecoder {
    /// Create a decoder; the inflate state is allocated on first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Decompress a complete gzip body
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Gzip`] for bad magic, unsupported methods, corrupt or
    /// truncated deflate data, and CRC or length mismatches.
    pub fn decompress(&self, body: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let mut guard = self.inflater.lock().unwrap_or_else(PoisonError::into_inner);
        let inflater = guard.get_or_insert_with(|| {
            self.instances.fetch_add(1, Ordering::Relaxed);
            Inflater::new()
        });

        let mut out = Vec::with_capacity(body.len().saturating_mul(4));
        let mut pos = inflater.member(body, &mut out)?;
        // Trailing members; zero padding after the last member is tolerated
        while pos < body.len() && body[pos..].iter().any(|&b| b != 0) {
            pos += inflater.member(&body[pos..], &mut out)?;
        }
        Ok(out)
    }

    /// Number of inflate states allocated so far (0 before the first gzip body)
    pub fn instances_created(&self) -> usize {
        self.instances.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for GzipDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GzipDecoder")
            .field("instances_created", &self.instances_created())
            .finish()
    }
}
