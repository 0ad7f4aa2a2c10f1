//! Canonical DER encoder for [`Asn1Node`] trees
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use dernorm_asn1::{BerDecoder, DerEncoder};
//!
//! let data = [0x30, 0x03, 0x02, 0x01, 0x05];
//! let node = BerDecoder::new(&data).decode().unwrap();
//! let mut encoder = DerEncoder::new();
//! encoder.encode_node(&node).unwrap();
//! let der = encoder.into_bytes();
//! ```

use crate::ber::types::Asn1Node;
use dernorm_core::DerNormResult;
use std::io::Write;

/// DER encoder accumulating canonical output bytes.
///
/// Serializes [`Asn1Node`] trees with definite, minimally encoded lengths.
/// BER indefinite-length forms disappear here: a structured node's length
/// is recomputed from the serialized size of its children, never copied
/// from the source encoding. Tag octets are re-emitted verbatim.
///
/// # Memory Management
///
/// The encoder accumulates into a `Vec<u8>`. Each structured node is
/// serialized through a scratch encoder first, since its length field must
/// be written before its content.
pub struct DerEncoder {
    buffer: Vec<u8>,
}

impl DerEncoder {
    /// Create a new DER encoder.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create a new DER encoder with initial buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Serialize one node and its subtree into the buffer.
    ///
    /// # Encoding Process
    ///
    /// - Primitive: tag octets verbatim, the DER length of the content
    ///   size, then the content bytes unchanged.
    /// - Structured: children are serialized in order into a scratch
    ///   buffer, then tag octets, the DER length of the scratch size
    ///   (always definite form), then the scratch bytes.
    pub fn encode_node(&mut self, node: &Asn1Node<'_>) -> DerNormResult<()> {
        match node {
            Asn1Node::Primitive {
                tag_bytes, content, ..
            } => {
                // The emitted length comes from the content actually held,
                // not from the length captured at decode time.
                self.buffer.extend_from_slice(tag_bytes);
                self.push_length(content.len());
                self.buffer.extend_from_slice(content);
            }
            Asn1Node::Structured {
                tag_bytes,
                children,
            } => {
                let mut inner = DerEncoder::new();
                for child in children {
                    inner.encode_node(child)?;
                }
                self.buffer.extend_from_slice(tag_bytes);
                self.push_length(inner.buffer.len());
                self.buffer.extend_from_slice(&inner.buffer);
            }
        }
        Ok(())
    }

    /// Append a definite DER length in its canonical minimal encoding:
    /// a single octet below 128, otherwise `0x80 | k` followed by the k
    /// big-endian octets of the value with no leading zero octet.
    fn push_length(&mut self, length: usize) {
        if length < 128 {
            self.buffer.push(length as u8);
            return;
        }

        let mut num_octets = 1;
        let mut remaining = length;
        while remaining > 0xFF {
            num_octets += 1;
            remaining >>= 8;
        }

        self.buffer.push(0x80 | num_octets as u8);
        for shift in (0..num_octets).rev() {
            self.buffer.push((length >> (shift * 8)) as u8);
        }
    }

    /// Get a reference to the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Clear the encoder buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for DerEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Asn1Node<'_> {
    /// Serialize this node as canonical DER.
    pub fn to_der(&self) -> DerNormResult<Vec<u8>> {
        let mut encoder = DerEncoder::new();
        encoder.encode_node(self)?;
        Ok(encoder.into_bytes())
    }

    /// Serialize this node as canonical DER into an output sink.
    ///
    /// # Errors
    ///
    /// A sink write failure surfaces as `IoFailure`.
    pub fn encode_to<W: Write>(&self, out: &mut W) -> DerNormResult<()> {
        out.write_all(&self.to_der()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dernorm_core::DerNormError;
    use std::io;

    #[test]
    fn test_encode_primitive() {
        let node = Asn1Node::Primitive {
            tag_bytes: &[0x02],
            length: 1,
            content: &[0x05],
        };
        assert_eq!(node.to_der().unwrap(), vec![0x02, 0x01, 0x05]);
    }

    #[test]
    fn test_encode_structured_recomputes_length() {
        // The stored primitive metadata plays no part in the emitted
        // lengths; both come from the actual byte counts.
        let node = Asn1Node::Structured {
            tag_bytes: &[0x30],
            children: vec![Asn1Node::Primitive {
                tag_bytes: &[0x02],
                length: 1,
                content: &[0x05],
            }],
        };
        assert_eq!(node.to_der().unwrap(), vec![0x30, 0x03, 0x02, 0x01, 0x05]);
    }

    #[test]
    fn test_length_short_form_boundary() {
        let content = vec![0xAA; 127];
        let node = Asn1Node::Primitive {
            tag_bytes: &[0x04],
            length: content.len(),
            content: &content,
        };
        let der = node.to_der().unwrap();
        assert_eq!(der[1], 127);
        assert_eq!(der.len(), 2 + 127);
    }

    #[test]
    fn test_length_long_form_one_octet() {
        let content = vec![0xAA; 128];
        let node = Asn1Node::Primitive {
            tag_bytes: &[0x04],
            length: content.len(),
            content: &content,
        };
        let der = node.to_der().unwrap();
        assert_eq!(&der[1..3], &[0x81, 0x80]);
    }

    #[test]
    fn test_length_long_form_two_octets() {
        let content = vec![0xAA; 256];
        let node = Asn1Node::Primitive {
            tag_bytes: &[0x04],
            length: content.len(),
            content: &content,
        };
        let der = node.to_der().unwrap();
        // Minimal count of big-endian octets, no leading zero octet
        assert_eq!(&der[1..4], &[0x82, 0x01, 0x00]);
    }

    #[test]
    fn test_encode_nested_structured() {
        let node = Asn1Node::Structured {
            tag_bytes: &[0x30],
            children: vec![
                Asn1Node::Structured {
                    tag_bytes: &[0x31],
                    children: vec![Asn1Node::Primitive {
                        tag_bytes: &[0x02],
                        length: 1,
                        content: &[0x07],
                    }],
                },
                Asn1Node::Primitive {
                    tag_bytes: &[0x04],
                    length: 2,
                    content: &[0xDE, 0xAD],
                },
            ],
        };
        assert_eq!(
            node.to_der().unwrap(),
            vec![0x30, 0x09, 0x31, 0x03, 0x02, 0x01, 0x07, 0x04, 0x02, 0xDE, 0xAD]
        );
    }

    #[test]
    fn test_encoder_reuse_after_clear() {
        let node = Asn1Node::Primitive {
            tag_bytes: &[0x02],
            length: 1,
            content: &[0x05],
        };
        let mut encoder = DerEncoder::with_capacity(16);
        encoder.encode_node(&node).unwrap();
        assert_eq!(encoder.as_bytes(), &[0x02, 0x01, 0x05]);
        encoder.clear();
        assert!(encoder.as_bytes().is_empty());
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_encode_to_failing_sink() {
        let node = Asn1Node::Primitive {
            tag_bytes: &[0x02],
            length: 1,
            content: &[0x05],
        };
        let err = node.encode_to(&mut FailingSink).unwrap_err();
        assert!(matches!(err, DerNormError::IoFailure(_)));
    }

    #[test]
    fn test_encode_to_vec_sink() {
        let node = Asn1Node::Primitive {
            tag_bytes: &[0x02],
            length: 1,
            content: &[0x05],
        };
        let mut out = Vec::new();
        node.encode_to(&mut out).unwrap();
        assert_eq!(out, vec![0x02, 0x01, 0x05]);
    }
}
