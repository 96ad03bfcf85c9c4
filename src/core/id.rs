//! Protocol identifier types.

#[cfg(feature = "codec")]
use bincode::{Decode, Encode};

/// A 256-bit identifier that implements a non-euclidian XOR-based distance metric.
///
/// The bytes are stored big-endian, so the derived ordering compares
/// identifiers as big-endian unsigned integers: `a.xor(t) < b.xor(t)` means
/// `a` is closer to `t` than `b` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub struct Id {
    bytes: [u8; Self::BYTES],
}

impl Id {
    /// The size of the identifier in bytes.
    pub const BYTES: usize = 32;

    /// The size of the identifier in bits.
    pub const BITS: usize = 32 * 8;

    /// Creates a new identifier from the supplied bytes.
    pub fn new(bytes: [u8; Self::BYTES]) -> Self {
        Id { bytes }
    }

    /// Returns the bytes backing the identifier.
    pub fn bytes(&self) -> [u8; Self::BYTES] {
        self.bytes
    }

    #[cfg(test)]
    /// Convenience function for working with small identifiers during testing.
    pub fn from_u16(raw: u16) -> Self {
        let mut bytes = [0u8; Self::BYTES];
        bytes[Self::BYTES - 2..].copy_from_slice(&raw.to_be_bytes());

        Self { bytes }
    }

    #[doc(hidden)]
    /// Convenience function for generating random identifiers during testing.
    pub fn rand() -> Self {
        use rand::{thread_rng, Fill};

        let mut rng = thread_rng();
        let mut bytes = [0u8; Self::BYTES];
        assert!(bytes.try_fill(&mut rng).is_ok());

        Self { bytes }
    }

    /// Computes the bitwise XOR of two identifiers.
    ///
    /// Compared as a big-endian unsigned integer (the derived `Ord`), the
    /// result is the Kademlia distance between the two.
    pub fn xor(&self, other: &Id) -> Id {
        let mut bytes = [0u8; Self::BYTES];
        for (byte, (a, b)) in bytes.iter_mut().zip(self.bytes.iter().zip(other.bytes.iter())) {
            *byte = a ^ b;
        }

        Id { bytes }
    }

    /// Counts the leading bits this identifier shares with another, in
    /// `0..=255`.
    ///
    /// Equal identifiers are reported as sharing `Id::BITS - 1` bits, the
    /// deepest bucket index a table can hold.
    pub fn common_prefix_length(&self, other: &Id) -> u32 {
        for (i, (a, b)) in self.bytes.iter().zip(other.bytes.iter()).enumerate() {
            let xor = a ^ b;
            if xor != 0 {
                // The left shift multiplies the byte index by 8 to get its
                // value in bits.
                return ((i as u32) << 3) + xor.leading_zeros();
            }
        }

        Self::BITS as u32 - 1
    }
}
