//! Integer-sequence compression codecs for inverted-index posting lists.
//!
//! Seven encoders/decoders share two supporting components: [`bits`] (bit
//! I/O over a byte buffer) and [`bit_byte_array`] (a growable bit sink built
//! on it). [`gaps`] converts a monotone posting list to and from d-gaps, the
//! usual first step before handing a list to most of these codecs.
//!
//! | Codec | Module | Unit |
//! |---|---|---|
//! | Unary | [`unary`] | bytes |
//! | Elias gamma | [`gamma`] | bytes |
//! | Variable byte | [`vbyte`] | bytes |
//! | Fixed-width bit packing | [`bitpacking`] | bytes |
//! | Simple16 | [`simple16`] | 32-bit words |
//! | NewPFD | [`pfor`] | 32-bit words |
//! | Chunk-local Elias-Fano | [`elias_fano`] | bytes |
//!
//! Every fallible operation returns [`error::Result`]; there is no global
//! state and no I/O — each call allocates its own output and hands it back
//! to the caller.
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

pub mod bit_byte_array;
pub mod bitpacking;
pub mod bits;
pub mod elias_fano;
pub mod error;
pub mod gamma;
pub mod gaps;
pub mod pfor;
pub mod simple16;
pub mod unary;
pub mod vbyte;

pub use error::{CodecError, Result};

/// Re-exports the codec entry points under their own names, for callers who
/// want `use postings_codecs::prelude::*;` instead of naming every module.
pub mod prelude {
    pub use crate::bit_byte_array::BitByteArray;
    pub use crate::bits::{bits, packed_length, read_bits, write_bits};
    pub use crate::error::{CodecError, Result};
    pub use crate::gaps::{from_gaps, to_gaps};
    pub use crate::{bitpacking, elias_fano, gamma, pfor, simple16, unary, vbyte};
}
