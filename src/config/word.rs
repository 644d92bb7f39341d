use soroban_sdk::contracttype;

/// A 256 bit configuration word, kept as two u128 limbs so it can be stored
/// and bit-addressed without a big integer host object.
///
/// `lo` holds bits 0-127 and `hi` holds bits 128-255. Fields are addressed
/// as `(offset, bits)` ranges and may straddle the limb boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ConfigWord {
    pub lo: u128,
    pub hi: u128,
}

impl ConfigWord {
    pub fn zero() -> ConfigWord {
        ConfigWord { lo: 0, hi: 0 }
    }

    pub fn is_zero(&self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Read the `bits` wide field starting at `offset`
    ///
    /// ### Arguments
    /// * `offset` - The bit position of the field's LSB (0-255)
    /// * `bits` - The width of the field (1-127)
    pub fn get_bits(&self, offset: u32, bits: u32) -> u128 {
        let mask = (1u128 << bits) - 1;
        if offset >= 128 {
            (self.hi >> (offset - 128)) & mask
        } else if offset + bits <= 128 {
            (self.lo >> offset) & mask
        } else {
            // field straddles the limb boundary
            ((self.lo >> offset) | (self.hi << (128 - offset))) & mask
        }
    }

    /// Write the `bits` wide field starting at `offset`. Value bits above
    /// the field width are discarded.
    pub fn set_bits(&mut self, offset: u32, bits: u32, value: u128) {
        let mask = (1u128 << bits) - 1;
        let value = value & mask;
        if offset >= 128 {
            let shift = offset - 128;
            self.hi = (self.hi & !(mask << shift)) | (value << shift);
        } else if offset + bits <= 128 {
            self.lo = (self.lo & !(mask << offset)) | (value << offset);
        } else {
            let lo_bits = 128 - offset;
            let lo_mask = (1u128 << lo_bits) - 1;
            let hi_mask = (1u128 << (bits - lo_bits)) - 1;
            self.lo = (self.lo & !(lo_mask << offset)) | ((value & lo_mask) << offset);
            self.hi = (self.hi & !hi_mask) | (value >> lo_bits);
        }
    }

    /// Read the single bit flag at `bit`
    pub fn get_flag(&self, bit: u32) -> bool {
        self.get_bits(bit, 1) != 0
    }

    /// Write the single bit flag at `bit`
    pub fn set_flag(&mut self, bit: u32, value: bool) {
        self.set_bits(bit, 1, value as u128);
    }
}
