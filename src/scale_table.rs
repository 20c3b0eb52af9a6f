use super::common::*;
use lazy_static::lazy_static;

lazy_static! {
    // iscale[i] = ((1 << 16) + (i + 2) / 2) / (i + 2)
    pub static ref ISCALE: [u32; 64] = {
        let mut iscale = [0; 64];
        for (i, s) in iscale.iter_mut().enumerate() {
            let d = i as u32 + 2;
            *s = ((1 << 16) + d / 2) / d;
        }
        iscale
    };
}

/// Divides `value` by `i + 2` with rounding, using the reciprocal table.
///
/// Ties can round down where the reciprocal was rounded down; encoder and
/// decoder must both go through this table to stay in sync.
#[inline(always)]
pub fn iscale_round(value: u32, i: usize) -> u32 {
    round_power_of_two(value * ISCALE[i], 16)
}
