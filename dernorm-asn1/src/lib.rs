//! ASN.1 BER decoding and canonical DER re-encoding
//!
//! This crate converts ASN.1 data encoded under the Basic Encoding Rules
//! (BER) into canonical Distinguished Encoding Rules (DER) form. BER
//! permits multiple valid encodings of the same value, including
//! indefinite-length constructed forms; strict DER consumers such as
//! signature and certificate unmarshallers reject those, so data emitted
//! by looser BER producers has to be normalized first.
//!
//! The crate operates at the raw TLV (Tag-Length-Value) layer: it has no
//! notion of certificates, signatures, or object identifiers. Input is a
//! single byte buffer holding one BER-encoded object; output is the same
//! object tree re-serialized as canonical DER.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use dernorm_asn1::ber_to_der;
//!
//! let ber = [0x30, 0x80, 0x02, 0x01, 0x05, 0x00, 0x00];
//! let der = ber_to_der(&ber).unwrap();
//! assert_eq!(der, [0x30, 0x03, 0x02, 0x01, 0x05]);
//! ```

pub mod ber;

pub use ber::{Asn1Node, BerDecoder, DerEncoder, Tag, TagClass};
pub use ber::{ber_to_der, ber_to_der_to, ber_to_der_with};
