//! Protocol definitions for sbts
// (c) 2026 sbts contributors
//!
//! # On-wire framing
//!
//! Everything on the wire is built from [varints](wire): a request is
//! `uvarint(version) || uvarint(path length) || path bytes`, and the
//! response header is a single zig-zag signed varint. A non-negative header
//! is the exact length of the file content that follows; negative values are
//! error codes (see [`session::Status`]).
//!
//! Varints keep the common cases (version 0, short paths, small error codes)
//! at one byte while still admitting arbitrarily large file lengths, so no
//! fixed-width length field had to be chosen up front.

pub mod session;
pub mod wire;
