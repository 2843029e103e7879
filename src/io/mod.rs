//! Audio byte-stream handling
//!
//! Container sniffing and PCM extraction. Extraction never fails: malformed
//! or unrecognized input degrades to a deterministic low-energy fallback
//! signal that the rest of the pipeline treats conservatively.

pub mod extraction;
