//! Identifier and filename derivation for generated documents.
//!
//! Identifiers are deterministic: the sanitized source code plus a per-code
//! 1-based sequence index. Two rows sharing a code within one run get
//! distinct, ordered identifiers; reruns on identical input reproduce the
//! same identifiers.

/// Replace path-hostile characters in a source code.
///
/// Codes can contain `/` (UCUM-style codes, some local codes), which must
/// not leak into filenames.
pub fn sanitize_code(code: &str) -> String {
    code.replace(['/', '\\'], "-")
}

/// Resource id for one generated observation.
pub fn observation_id(code: &str, sequence: u32) -> String {
    format!("observation-{}-{}", sanitize_code(code), sequence)
}

/// Output filename for one generated observation.
pub fn observation_filename(code: &str, sequence: u32) -> String {
    format!("observation_{}_{:03}.json", sanitize_code(code), sequence)
}
