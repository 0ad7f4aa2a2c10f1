//! BER decoder producing an [`Asn1Node`] tree
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use dernorm_asn1::BerDecoder;
//!
//! let data = [0x30, 0x03, 0x02, 0x01, 0x05];
//! let node = BerDecoder::new(&data).decode().unwrap();
//! ```

use crate::ber::types::{Asn1Node, Tag};
use dernorm_core::{DecodeLimits, DerNormError, DerNormResult};

/// Recursive-descent BER decoder.
///
/// Walks TLV triplets over a borrowed byte buffer, resolving all three BER
/// length forms (short, long, indefinite) and producing an [`Asn1Node`]
/// tree whose tag octets and primitive content alias the input.
///
/// # Error Handling
///
/// All operations return `Result` types and fail immediately without local
/// recovery. Errors can occur due to:
/// - Reads past the buffer end (truncated or corrupted input)
/// - Self-contradictory length fields (missing end-of-contents marker,
///   long-form length overflow)
/// - Children disagreeing with their parent's declared boundary
/// - Nesting deeper than the configured limit
pub struct BerDecoder<'a> {
    buffer: &'a [u8],
    limits: DecodeLimits,
}

impl<'a> BerDecoder<'a> {
    /// Create a decoder over `buffer` with the default [`DecodeLimits`].
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            limits: DecodeLimits::default(),
        }
    }

    /// Create a decoder with caller-supplied limits.
    pub fn with_limits(buffer: &'a [u8], limits: DecodeLimits) -> Self {
        Self { buffer, limits }
    }

    /// Decode exactly one object starting at offset 0.
    ///
    /// Bytes after the decoded object are ignored unless the limits set
    /// `reject_trailing`, in which case a non-empty trailer fails with
    /// `InvalidFormat`.
    pub fn decode(&self) -> DerNormResult<Asn1Node<'a>> {
        let (node, end) = self.read_object(0, self.buffer.len(), 1)?;
        if self.limits.reject_trailing && end != self.buffer.len() {
            return Err(DerNormError::InvalidFormat(format!(
                "{} trailing bytes after top-level object",
                self.buffer.len() - end
            )));
        }
        Ok(node)
    }

    /// Decode one object at `offset`, bounded by `end`.
    ///
    /// Returns the node and the offset of the first byte after it, which is
    /// past the end-of-contents marker when the length was indefinite.
    fn read_object(
        &self,
        offset: usize,
        end: usize,
        depth: usize,
    ) -> DerNormResult<(Asn1Node<'a>, usize)> {
        if depth > self.limits.max_depth {
            return Err(DerNormError::RecursionLimitExceeded(self.limits.max_depth));
        }

        let (tag, tag_len) = Tag::parse(&self.buffer[offset..end])?;
        let tag_bytes = &self.buffer[offset..offset + tag_len];

        let (length, content_start, indefinite) = self.read_length(offset + tag_len, end)?;
        let content_end = content_start.checked_add(length).ok_or_else(|| {
            DerNormError::InvalidFormat("content length overflows usize".to_string())
        })?;
        if content_end > end {
            // Declared content runs past the available bytes. At the top
            // level that is a short buffer; inside a parent it means the
            // child and the parent's declared boundary disagree.
            return Err(if end == self.buffer.len() {
                DerNormError::OutOfBounds(format!(
                    "declared length {} exceeds {} remaining bytes",
                    length,
                    end - content_start
                ))
            } else {
                DerNormError::Truncated(format!(
                    "content of {} bytes crosses enclosing boundary at {}",
                    length, end
                ))
            });
        }

        let node = if tag.is_constructed() {
            let mut children = Vec::new();
            let mut child_offset = content_start;
            while child_offset < content_end {
                let (child, next) = self.read_object(child_offset, content_end, depth + 1)?;
                children.push(child);
                child_offset = next;
            }
            Asn1Node::Structured {
                tag_bytes,
                children,
            }
        } else {
            Asn1Node::Primitive {
                tag_bytes,
                length,
                content: &self.buffer[content_start..content_end],
            }
        };

        // An indefinite length is terminated by a two-octet end-of-contents
        // marker sitting just past the content; skip it.
        let next = if indefinite {
            content_end + 2
        } else {
            content_end
        };
        Ok((node, next))
    }

    /// Read a BER length field at `offset`, bounded by `end`.
    ///
    /// # Returns
    ///
    /// Returns `(content_length, content_start, is_indefinite)`:
    /// - Short form (first octet < 0x80): the octet is the length.
    /// - Indefinite form (first octet == 0x80): the content runs up to the
    ///   last two-octet `00 00` end-of-contents marker in the remaining
    ///   range, so nested indefinite values resolve their own inner
    ///   markers. No marker fails with `InvalidFormat`.
    /// - Long form (first octet > 0x80): the low 7 bits count the
    ///   following big-endian length octets. A value that does not fit in
    ///   `usize` fails with `InvalidFormat` rather than wrapping.
    fn read_length(&self, offset: usize, end: usize) -> DerNormResult<(usize, usize, bool)> {
        let first = self.byte_at(offset, end)?;
        let mut pos = offset + 1;

        if first < 0x80 {
            return Ok((first as usize, pos, false));
        }

        if first == 0x80 {
            let marker = self.buffer[pos..end]
                .windows(2)
                .rposition(|window| window == [0x00, 0x00])
                .ok_or_else(|| {
                    DerNormError::InvalidFormat(
                        "indefinite length without end-of-contents marker".to_string(),
                    )
                })?;
            return Ok((marker, pos, true));
        }

        let num_octets = (first & 0x7F) as usize;
        let mut length: usize = 0;
        for _ in 0..num_octets {
            let byte = self.byte_at(pos, end)?;
            length = length
                .checked_mul(256)
                .and_then(|l| l.checked_add(byte as usize))
                .ok_or_else(|| {
                    DerNormError::InvalidFormat(
                        "long form length overflows usize".to_string(),
                    )
                })?;
            pos += 1;
        }
        Ok((length, pos, false))
    }

    fn byte_at(&self, offset: usize, end: usize) -> DerNormResult<u8> {
        if offset >= end {
            return Err(DerNormError::OutOfBounds(format!(
                "offset {} past end of readable range ({})",
                offset, end
            )));
        }
        Ok(self.buffer[offset])
    }
}
