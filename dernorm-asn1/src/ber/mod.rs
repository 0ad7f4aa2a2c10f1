//! BER (Basic Encoding Rules) decoding and canonical DER re-encoding
//!
//! This module decodes ASN.1 TLV structures under the permissive BER rules
//! and re-serializes them under the canonical DER rules, as specified in
//! ITU-T X.690.
//!
//! # ASN.1 TLV Encoding Overview
//!
//! Each ASN.1 value is encoded as a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! ## Tag Encoding
//!
//! The tag identifies the type of the data:
//! - **Class** (2 bits): Universal (00), Application (01), Context-specific (10), Private (11)
//! - **Constructed/Primitive** (1 bit): 0 = Primitive, 1 = Constructed
//! - **Tag Number** (5 bits, or extended): The actual tag number
//!
//! Tag encoding format:
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//! Where:
//! - CC = Class (00=Universal, 01=Application, 10=Context, 11=Private)
//! - P = Primitive (0) or Constructed (1)
//! - TTTTT = Tag number (0-30), or 11111 indicates a high tag number
//!   continued in base-128 octets with continuation bit 0x80
//!
//! ## Length Encoding
//!
//! BER allows three mutually exclusive length forms:
//! - **Short form** (1 byte): For lengths 0-127
//!   - Bit 7 = 0
//!   - Bits 6-0 = length value
//! - **Long form** (2-127 bytes): For lengths > 127
//!   - First byte: Bit 7 = 1, Bits 6-0 = number of length bytes
//!   - Following bytes: Big-endian length value
//! - **Indefinite form** (1 byte, constructed values): Indicator byte 0x80.
//!   The content extent is not stated; it runs up to a two-octet
//!   end-of-contents marker `00 00`.
//!
//! DER permits only definite lengths in their minimal encoding: short form
//! below 128, otherwise the smallest possible count of big-endian octets.
//! Converting indefinite forms to definite forms changes the byte counts of
//! every enclosing value, so constructed lengths are recomputed bottom-up
//! at encode time rather than copied from the source.
//!
//! # Implementation Notes
//!
//! 1. **Tag preservation**: Raw tag octets are carried through decode and
//!    re-emitted verbatim; only length fields are rewritten.
//! 2. **Borrowed content**: Decoded primitive content aliases the input
//!    buffer. The tree lives no longer than the buffer it was decoded from.
//! 3. **Hardening**: Nesting depth is bounded by
//!    `dernorm_core::DecodeLimits`, and all offset arithmetic is
//!    bounds-checked. Malformed input fails with a closed set of error
//!    kinds rather than panicking.
//! 4. **Scope**: No knowledge of object identifiers, certificate fields, or
//!    any structure above the byte level; those belong to the calling
//!    signature/certificate layer.

pub mod decoder;
pub mod encoder;
pub mod transcode;
pub mod types;

pub use decoder::BerDecoder;
pub use encoder::DerEncoder;
pub use transcode::{ber_to_der, ber_to_der_to, ber_to_der_with};
pub use types::{Asn1Node, Tag, TagClass};
