//! One-shot BER to canonical DER transcoding

use crate::ber::decoder::BerDecoder;
use dernorm_core::{DecodeLimits, DerNormResult};
use std::io::Write;

/// Transcode one BER-encoded object into canonical DER.
///
/// Decodes exactly one object starting at offset 0 of `input` and
/// re-serializes it with definite, minimally encoded lengths. Trailing
/// bytes after the object are ignored under the default limits. Decode
/// errors propagate unchanged and no partial output is produced on
/// failure. Already-canonical input transcodes to itself byte for byte.
pub fn ber_to_der(input: &[u8]) -> DerNormResult<Vec<u8>> {
    ber_to_der_with(input, &DecodeLimits::default())
}

/// Transcode with caller-supplied decode limits.
pub fn ber_to_der_with(input: &[u8], limits: &DecodeLimits) -> DerNormResult<Vec<u8>> {
    log::trace!("transcoding {} BER bytes", input.len());
    let node = BerDecoder::with_limits(input, *limits).decode()?;
    let output = node.to_der()?;
    log::trace!("transcoded into {} DER bytes", output.len());
    Ok(output)
}

/// Transcode and write the canonical DER into an output sink.
///
/// # Errors
///
/// Decode errors propagate unchanged; a sink write failure surfaces as
/// `IoFailure`.
pub fn ber_to_der_to<W: Write>(input: &[u8], out: &mut W) -> DerNormResult<()> {
    let der = ber_to_der(input)?;
    out.write_all(&der)?;
    Ok(())
}
