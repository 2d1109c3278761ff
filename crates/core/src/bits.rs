//! Single-bit helpers over `i64` flag words.

use crate::error::{Result, SatchelError};

const BITS: i32 = i64::BITS as i32;

fn check_position(position: i32) -> Result<()> {
    if (0..BITS).contains(&position) {
        Ok(())
    } else {
        Err(SatchelError::InvalidArgument(format!(
            "bit position {} is outside 0..={}",
            position,
            BITS - 1
        )))
    }
}

/// Word with only `position` set
pub fn set_bit(position: i32) -> Result<i64> {
    check_position(position)?;
    Ok(1i64 << position)
}

pub fn clear_bit(value: i64, position: i32) -> Result<i64> {
    check_position(position)?;
    Ok(value & !(1i64 << position))
}

pub fn clear_bits_by_mask(value: i64, mask: i64) -> i64 {
    value & !mask
}

/// Word with every bit set
pub fn all_bits() -> i64 {
    -1
}
