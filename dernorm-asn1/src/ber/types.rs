//! BER encoding types (tag class, parsed tag, object tree)

use dernorm_core::{DerNormError, DerNormResult};

/// BER Tag Class
///
/// ASN.1 defines four tag classes:
/// - **Universal**: Standard ASN.1 types (INTEGER, OCTET STRING, etc.)
/// - **Application**: Application-specific types
/// - **Context-specific**: Context-dependent types (used in SEQUENCE/SET)
/// - **Private**: Private/implementation-specific types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl TagClass {
    /// Get the tag class from bits 7-6 of a tag's first octet.
    pub fn from_bits(bits: u8) -> Self {
        match (bits >> 6) & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }
}

/// Parsed view of a BER tag.
///
/// A tag consists of:
/// - **Class**: Universal, Application, Context-specific, or Private
/// - **Constructed/Primitive**: Whether the value contains other values
/// - **Tag Number**: 0-30 in the first octet's low 5 bits, or a high tag
///   number continued in base-128 octets when those bits are all ones
///
/// This type is a read-only convenience for inspecting decoded nodes.
/// Re-encoding always uses the raw tag octets captured at decode time, so
/// a tag round-trips verbatim even when its source encoding is unusual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    class: TagClass,
    constructed: bool,
    number: u32,
}

impl Tag {
    /// Get the tag class.
    pub fn class(&self) -> TagClass {
        self.class
    }

    /// Check whether the constructed bit (0x20) is set.
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Get the tag number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Decode a tag from the start of `data`.
    ///
    /// # Returns
    ///
    /// Returns `Ok((tag, bytes_consumed))` on success. `bytes_consumed` is
    /// the size of the raw tag octets, which callers slice out to preserve
    /// the encoding verbatim.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the buffer ends inside the tag, and
    /// `InvalidFormat` if a high tag number does not fit in a `u32`.
    pub fn parse(data: &[u8]) -> DerNormResult<(Self, usize)> {
        let first = *data.first().ok_or_else(|| {
            DerNormError::OutOfBounds("empty buffer while reading tag".to_string())
        })?;

        let class = TagClass::from_bits(first);
        let constructed = (first & 0x20) != 0;
        let tag_bits = first & 0x1F;

        if tag_bits < 0x1F {
            // Short form: tag number is in the low 5 bits
            return Ok((
                Self {
                    class,
                    constructed,
                    number: tag_bits as u32,
                },
                1,
            ));
        }

        // High tag number form: base-128 continuation octets, big-endian,
        // terminated by the first octet with the high bit clear
        let mut number: u32 = 0;
        let mut pos = 1;
        loop {
            let byte = *data.get(pos).ok_or_else(|| {
                DerNormError::OutOfBounds(
                    "buffer ended inside high tag number".to_string(),
                )
            })?;
            number = number
                .checked_mul(128)
                .and_then(|n| n.checked_add((byte & 0x7F) as u32))
                .ok_or_else(|| {
                    DerNormError::InvalidFormat("tag number overflow".to_string())
                })?;
            pos += 1;
            if byte & 0x80 == 0 {
                break;
            }
        }

        Ok((
            Self {
                class,
                constructed,
                number,
            },
            pos,
        ))
    }
}

/// One node of a decoded ASN.1 object tree.
///
/// The tree is built in a single decode pass over an immutable input buffer
/// and consumed exactly once by the encoder. Tag octets and primitive
/// content borrow from that buffer; nothing is copied until encode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asn1Node<'a> {
    /// A primitive value carrying opaque content octets.
    Primitive {
        /// Raw tag octets as decoded, re-emitted verbatim.
        tag_bytes: &'a [u8],
        /// Content byte count as declared by the source length field.
        length: usize,
        /// Value octets.
        content: &'a [u8],
    },
    /// A constructed value containing child nodes in encounter order.
    Structured {
        /// Raw tag octets as decoded, re-emitted verbatim.
        tag_bytes: &'a [u8],
        /// Child nodes, each exclusively owned by this parent.
        children: Vec<Asn1Node<'a>>,
    },
}

impl<'a> Asn1Node<'a> {
    /// The raw tag octets of this node.
    pub fn tag_bytes(&self) -> &'a [u8] {
        match self {
            Asn1Node::Primitive { tag_bytes, .. } => tag_bytes,
            Asn1Node::Structured { tag_bytes, .. } => tag_bytes,
        }
    }

    /// Parse the tag octets into their class/constructed/number view.
    pub fn tag(&self) -> DerNormResult<Tag> {
        Tag::parse(self.tag_bytes()).map(|(tag, _)| tag)
    }

    /// Check whether this node is a constructed value.
    pub fn is_structured(&self) -> bool {
        matches!(self, Asn1Node::Structured { .. })
    }

    /// The content octets of a primitive node.
    pub fn content(&self) -> Option<&'a [u8]> {
        match self {
            Asn1Node::Primitive { content, .. } => Some(content),
            Asn1Node::Structured { .. } => None,
        }
    }

    /// The children of a structured node.
    pub fn children(&self) -> Option<&[Asn1Node<'a>]> {
        match self {
            Asn1Node::Primitive { .. } => None,
            Asn1Node::Structured { children, .. } => Some(children),
        }
    }

    /// The content length declared by the source encoding of a primitive
    /// node. Kept as decode-time metadata only; the encoder recomputes
    /// every emitted length from the actual content.
    pub fn declared_length(&self) -> Option<usize> {
        match self {
            Asn1Node::Primitive { length, .. } => Some(*length),
            Asn1Node::Structured { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dernorm_core::DerNormError;

    #[test]
    fn test_parse_short_form_tag() {
        let data = [0x02]; // Universal, Primitive, tag 2 (INTEGER)
        let (tag, consumed) = Tag::parse(&data).unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(tag.class(), TagClass::Universal);
        assert!(!tag.is_constructed());
        assert_eq!(tag.number(), 2);
    }

    #[test]
    fn test_parse_constructed_tag() {
        let data = [0x30]; // Universal, Constructed, tag 16 (SEQUENCE)
        let (tag, _) = Tag::parse(&data).unwrap();
        assert_eq!(tag.class(), TagClass::Universal);
        assert!(tag.is_constructed());
        assert_eq!(tag.number(), 16);
    }

    #[test]
    fn test_parse_context_specific_tag() {
        let data = [0xA0]; // Context-specific, Constructed, tag 0
        let (tag, _) = Tag::parse(&data).unwrap();
        assert_eq!(tag.class(), TagClass::ContextSpecific);
        assert!(tag.is_constructed());
        assert_eq!(tag.number(), 0);
    }

    #[test]
    fn test_parse_high_tag_number() {
        // Application, Primitive, tag 33 in high tag number form
        let data = [0x5F, 0x21];
        let (tag, consumed) = Tag::parse(&data).unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(tag.class(), TagClass::Application);
        assert_eq!(tag.number(), 33);
    }

    #[test]
    fn test_parse_multi_byte_high_tag_number() {
        // Tag 1000 = 0x3E8: continuation octet 0x87 then terminal 0x68
        let data = [0x1F, 0x87, 0x68];
        let (tag, consumed) = Tag::parse(&data).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(tag.number(), 1000);
    }

    #[test]
    fn test_parse_empty_buffer() {
        let err = Tag::parse(&[]).unwrap_err();
        assert!(matches!(err, DerNormError::OutOfBounds(_)));
    }

    #[test]
    fn test_parse_unterminated_high_tag_number() {
        // Continuation bit set on the last available octet
        let data = [0x1F, 0x81];
        let err = Tag::parse(&data).unwrap_err();
        assert!(matches!(err, DerNormError::OutOfBounds(_)));
    }

    #[test]
    fn test_parse_high_tag_number_overflow() {
        // Six continuation octets exceed the u32 range
        let data = [0x1F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
        let err = Tag::parse(&data).unwrap_err();
        assert!(matches!(err, DerNormError::InvalidFormat(_)));
    }

    #[test]
    fn test_node_accessors() {
        let content = [0x05u8];
        let tag_bytes = [0x02u8];
        let node = Asn1Node::Primitive {
            tag_bytes: &tag_bytes,
            length: 1,
            content: &content,
        };
        assert!(!node.is_structured());
        assert_eq!(node.content(), Some(&content[..]));
        assert_eq!(node.children(), None);
        assert_eq!(node.declared_length(), Some(1));
        assert_eq!(node.tag().unwrap().number(), 2);

        let parent = Asn1Node::Structured {
            tag_bytes: &[0x30],
            children: vec![node],
        };
        assert!(parent.is_structured());
        assert_eq!(parent.content(), None);
        assert_eq!(parent.children().map(|c| c.len()), Some(1));
        assert_eq!(parent.declared_length(), None);
        assert!(parent.tag().unwrap().is_constructed());
    }
}
