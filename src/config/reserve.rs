// Bit layout adapted from: https://github.com/aave/aave-v3-core/blob/master/contracts/protocol/libraries/configuration/ReserveConfiguration.sol

use soroban_sdk::contracttype;

use super::word::ConfigWord;

// Bit ranges of each field within the packed reserve configuration word.
// Fields never overlap and bits 252-255 are reserved, reading as zero.
const LTV_OFFSET: u32 = 0;
const LTV_BITS: u32 = 16;
const LIQ_THRESHOLD_OFFSET: u32 = 16;
const LIQ_THRESHOLD_BITS: u32 = 16;
const LIQ_BONUS_OFFSET: u32 = 32;
const LIQ_BONUS_BITS: u32 = 16;
const DECIMALS_OFFSET: u32 = 48;
const DECIMALS_BITS: u32 = 8;
const ACTIVE_BIT: u32 = 56;
const FROZEN_BIT: u32 = 57;
const BORROWING_BIT: u32 = 58;
const STABLE_BORROWING_BIT: u32 = 59;
const PAUSED_BIT: u32 = 60;
const ISOLATION_BORROWABLE_BIT: u32 = 61;
const SILOED_BORROWING_BIT: u32 = 62;
const FLASHLOAN_BIT: u32 = 63;
const RESERVE_FACTOR_OFFSET: u32 = 64;
const RESERVE_FACTOR_BITS: u32 = 16;
const BORROW_CAP_OFFSET: u32 = 80;
const BORROW_CAP_BITS: u32 = 36;
const SUPPLY_CAP_OFFSET: u32 = 116;
const SUPPLY_CAP_BITS: u32 = 36;
const LIQ_PROTOCOL_FEE_OFFSET: u32 = 152;
const LIQ_PROTOCOL_FEE_BITS: u32 = 16;
const EMODE_CATEGORY_OFFSET: u32 = 168;
const EMODE_CATEGORY_BITS: u32 = 8;
const UNBACKED_MINT_CAP_OFFSET: u32 = 176;
const UNBACKED_MINT_CAP_BITS: u32 = 36;
const DEBT_CEILING_OFFSET: u32 = 212;
const DEBT_CEILING_BITS: u32 = 40;

/// The decoded risk and operational parameters of a reserve. Stored in the
/// ledger as a single packed [ConfigWord] - the raw word never crosses this
/// codec's boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ReserveConfig {
    pub ltv: u32,                   // max borrowing power per unit of collateral, in 4 decimal percent
    pub liquidation_threshold: u32, // collateral ratio at which the position becomes liquidatable
    pub liquidation_bonus: u32,     // liquidator incentive, in 4 decimal percent
    pub decimals: u32,              // the decimals of the underlying and its tokens
    pub active: bool,
    pub frozen: bool,
    pub borrowing_enabled: bool,
    pub stable_borrowing_enabled: bool,
    pub paused: bool,
    pub borrowable_in_isolation: bool,
    pub siloed_borrowing: bool,
    pub flashloan_enabled: bool,
    pub reserve_factor: u32,          // share of interest taken by the treasury, in 4 decimal percent
    pub borrow_cap: u64,              // in whole tokens, 0 == no cap
    pub supply_cap: u64,              // in whole tokens, 0 == no cap
    pub liquidation_protocol_fee: u32, // in 4 decimal percent
    pub emode_category: u32,          // the efficiency mode category id, 0 == none
    pub unbacked_mint_cap: u64,       // in whole tokens, 0 == no cap
    pub debt_ceiling: u64,            // isolation mode debt ceiling, 0 == not isolated
}

impl ReserveConfig {
    /// Decode a packed configuration word. Pure bit extraction - reserved
    /// bits are ignored, validation is the writer's responsibility.
    pub fn decode(word: &ConfigWord) -> ReserveConfig {
        ReserveConfig {
            ltv: word.get_bits(LTV_OFFSET, LTV_BITS) as u32,
            liquidation_threshold: word.get_bits(LIQ_THRESHOLD_OFFSET, LIQ_THRESHOLD_BITS) as u32,
            liquidation_bonus: word.get_bits(LIQ_BONUS_OFFSET, LIQ_BONUS_BITS) as u32,
            decimals: word.get_bits(DECIMALS_OFFSET, DECIMALS_BITS) as u32,
            active: word.get_flag(ACTIVE_BIT),
            frozen: word.get_flag(FROZEN_BIT),
            borrowing_enabled: word.get_flag(BORROWING_BIT),
            stable_borrowing_enabled: word.get_flag(STABLE_BORROWING_BIT),
            paused: word.get_flag(PAUSED_BIT),
            borrowable_in_isolation: word.get_flag(ISOLATION_BORROWABLE_BIT),
            siloed_borrowing: word.get_flag(SILOED_BORROWING_BIT),
            flashloan_enabled: word.get_flag(FLASHLOAN_BIT),
            reserve_factor: word.get_bits(RESERVE_FACTOR_OFFSET, RESERVE_FACTOR_BITS) as u32,
            borrow_cap: word.get_bits(BORROW_CAP_OFFSET, BORROW_CAP_BITS) as u64,
            supply_cap: word.get_bits(SUPPLY_CAP_OFFSET, SUPPLY_CAP_BITS) as u64,
            liquidation_protocol_fee: word.get_bits(LIQ_PROTOCOL_FEE_OFFSET, LIQ_PROTOCOL_FEE_BITS)
                as u32,
            emode_category: word.get_bits(EMODE_CATEGORY_OFFSET, EMODE_CATEGORY_BITS) as u32,
            unbacked_mint_cap: word.get_bits(UNBACKED_MINT_CAP_OFFSET, UNBACKED_MINT_CAP_BITS)
                as u64,
            debt_ceiling: word.get_bits(DEBT_CEILING_OFFSET, DEBT_CEILING_BITS) as u64,
        }
    }

    /// Encode into a packed configuration word with reserved bits zero.
    /// Fields are masked to their bit width - the writer validates ranges
    /// before encoding.
    pub fn encode(&self) -> ConfigWord {
        let mut word = ConfigWord::zero();
        word.set_bits(LTV_OFFSET, LTV_BITS, self.ltv as u128);
        word.set_bits(
            LIQ_THRESHOLD_OFFSET,
            LIQ_THRESHOLD_BITS,
            self.liquidation_threshold as u128,
        );
        word.set_bits(LIQ_BONUS_OFFSET, LIQ_BONUS_BITS, self.liquidation_bonus as u128);
        word.set_bits(DECIMALS_OFFSET, DECIMALS_BITS, self.decimals as u128);
        word.set_flag(ACTIVE_BIT, self.active);
        word.set_flag(FROZEN_BIT, self.frozen);
        word.set_flag(BORROWING_BIT, self.borrowing_enabled);
        word.set_flag(STABLE_BORROWING_BIT, self.stable_borrowing_enabled);
        word.set_flag(PAUSED_BIT, self.paused);
        word.set_flag(ISOLATION_BORROWABLE_BIT, self.borrowable_in_isolation);
        word.set_flag(SILOED_BORROWING_BIT, self.siloed_borrowing);
        word.set_flag(FLASHLOAN_BIT, self.flashloan_enabled);
        word.set_bits(
            RESERVE_FACTOR_OFFSET,
            RESERVE_FACTOR_BITS,
            self.reserve_factor as u128,
        );
        word.set_bits(BORROW_CAP_OFFSET, BORROW_CAP_BITS, self.borrow_cap as u128);
        word.set_bits(SUPPLY_CAP_OFFSET, SUPPLY_CAP_BITS, self.supply_cap as u128);
        word.set_bits(
            LIQ_PROTOCOL_FEE_OFFSET,
            LIQ_PROTOCOL_FEE_BITS,
            self.liquidation_protocol_fee as u128,
        );
        word.set_bits(
            EMODE_CATEGORY_OFFSET,
            EMODE_CATEGORY_BITS,
            self.emode_category as u128,
        );
        word.set_bits(
            UNBACKED_MINT_CAP_OFFSET,
            UNBACKED_MINT_CAP_BITS,
            self.unbacked_mint_cap as u128,
        );
        word.set_bits(DEBT_CEILING_OFFSET, DEBT_CEILING_BITS, self.debt_ceiling as u128);
        word
    }
}
