//! Constants bounding schema binding and comparison.

use std::ops::RangeInclusive;

/// Largest field number a message may declare (2^29 - 1).
pub const MAX_FIELD_NUMBER: u32 = 536_870_911;

/// Field numbers reserved by the protobuf implementation.
pub const RESERVED_FIELD_NUMBERS: RangeInclusive<u32> = 19_000..=19_999;

/// Initial capacity of the pending-comparison stack.
///
/// The stack grows past this on demand; it only avoids reallocation for
/// typical nesting depths.
pub const WORK_STACK_CAPACITY: usize = 32;

/// Returns true if `number` may be used as a field number.
pub fn is_valid_field_number(number: u32) -> bool {
    (1..=MAX_FIELD_NUMBER).contains(&number) && !RESERVED_FIELD_NUMBERS.contains(&number)
}
