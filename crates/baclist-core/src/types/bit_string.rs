use alloc::vec::Vec;

/// Owned BACnet bit string; `unused_bits` counts padding bits in the last octet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitString {
    pub unused_bits: u8,
    pub data: Vec<u8>,
}

impl BitString {
    pub fn new(unused_bits: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            unused_bits,
            data: data.into(),
        }
    }

    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.unused_bits as usize)
    }

    /// Bit `index`, counting from the most significant bit of the first octet.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len() {
            return None;
        }
        let octet = self.data[index / 8];
        Some(octet & (0x80 >> (index % 8)) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::BitString;

    #[test]
    fn bits_are_msb_first() {
        let bits = BitString::new(4, [0b1010_0000]);
        assert_eq!(bits.bit_len(), 4);
        assert_eq!(bits.bit(0), Some(true));
        assert_eq!(bits.bit(1), Some(false));
        assert_eq!(bits.bit(2), Some(true));
        assert_eq!(bits.bit(4), None);
    }
}
