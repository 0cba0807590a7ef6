//! The 32-bit packed cell word: up to three `(start, length)` references to
//! consecutive-segment ranges within one contour, plus the filled-sentinel
//! encoding consumed by the fragment shader.
//!
//! ```text
//! bit   0  1  2  3  4  5  6  7 | 8 .. 15 | 16 .. 23 | 24 .. 31
//!       length0     length1     length2    start0     start1     start2
//!       (2 bits)    (3 bits)    (3 bits)   (8 bits)   (8 bits)   (8 bits)
//! ```

/// Maximum consecutive-segment length representable in slot A.
const SLOT_A_MAX_LENGTH: u32 = 0x3;
/// Maximum consecutive-segment length representable in slots B and C.
const SLOT_BC_MAX_LENGTH: u32 = 0x7;
/// `start` values at or above this are unrepresentable in any slot.
const MAX_START: u32 = 0xFF;

const SLOT_A_LENGTH_MASK: u32 = 0x03;
const SLOT_B_LENGTH_MASK: u32 = 0x1C;
const SLOT_C_LENGTH_MASK: u32 = 0xE0;

/// Attempts to place the segment range `[from, to)` (even point indices) into
/// the first free slot of `cell` that can hold it. Returns the updated word,
/// or `0` (packing failure for this attempt) if every slot that could fit it
/// is occupied, or the range is too long or starts too late to represent.
///
/// `cell == 0` is always "empty" going in, but note it is also the failure
/// return value: callers must treat a `0` result as *the cell word did not
/// change* only when it started at `0` and nothing was supposed to be added;
/// in the packer this is only ever called to add a genuine range, so `0`
/// unambiguously means overflow.
pub fn cell_add_range(mut cell: u32, from: u32, to: u32) -> u32 {
    debug_assert!(from % 2 == 0 && to % 2 == 0);

    let from = from / 2;
    let to = to / 2;

    if from >= MAX_START || to >= MAX_START {
        return 0;
    }

    let length = to - from;

    if length <= SLOT_A_MAX_LENGTH && (cell & SLOT_A_LENGTH_MASK) == 0 {
        cell |= from << 8;
        cell |= length;
        return cell;
    }

    if length > SLOT_BC_MAX_LENGTH {
        return 0;
    }

    if (cell & SLOT_B_LENGTH_MASK) == 0 {
        cell |= from << 16;
        cell |= length << 2;
        return cell;
    }

    if (cell & SLOT_C_LENGTH_MASK) == 0 {
        cell |= from << 24;
        cell |= length << 5;
        return cell;
    }

    0
}

/// One decoded `(start, length)` slot: segments `start ..= start + length`
/// (inclusive of both endpoints, i.e. `length + 1` consecutive segments).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSlot {
    pub start: u32,
    pub length: u32,
}

/// Decodes a packed cell word into its (at most three) occupied slots, for
/// GPU-side consumers or tests. A `0` word decodes to no slots.
pub fn decode_cell(cell: u32) -> [Option<CellSlot>; 3] {
    let a = cell & SLOT_A_LENGTH_MASK;
    let b = (cell & SLOT_B_LENGTH_MASK) >> 2;
    let c = (cell & SLOT_C_LENGTH_MASK) >> 5;

    [
        (a != 0).then(|| CellSlot { start: (cell >> 8) & MAX_START, length: a }),
        (b != 0).then(|| CellSlot { start: (cell >> 16) & MAX_START, length: b }),
        (c != 0).then(|| CellSlot { start: (cell >> 24) & MAX_START, length: c }),
    ]
}

/// Builds the single-edge "filled" sentinel cell word: segment index `e / 2`
/// in slot A with length 1, the pattern the fragment shader recognizes as
/// "this cell is unconditionally inside the glyph."
#[inline]
pub fn make_cell_from_single_edge(e: u32) -> u32 {
    debug_assert!(e % 2 == 0);
    (e << 7) | 1
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_short_range_uses_slot_a() {
        let cell = cell_add_range(0, 0, 6);
        assert_eq!(decode_cell(cell)[0], Some(CellSlot { start: 0, length: 3 }));
    }

    #[test]
    fn range_too_long_for_a_falls_through_to_b() {
        // length 4 (8 points / 2 = 4 segments delta) exceeds slot A's max of 3.
        let cell = cell_add_range(0, 0, 8);
        assert_eq!(decode_cell(cell)[0], None);
        assert_eq!(decode_cell(cell)[1], Some(CellSlot { start: 0, length: 4 }));
    }

    #[test]
    fn three_ranges_fill_all_slots() {
        let mut cell = 0;
        cell = cell_add_range(cell, 0, 2);
        cell = cell_add_range(cell, 10, 20);
        cell = cell_add_range(cell, 30, 44);
        let slots = decode_cell(cell);
        assert_eq!(slots[0], Some(CellSlot { start: 0, length: 1 }));
        assert_eq!(slots[1], Some(CellSlot { start: 5, length: 5 }));
        assert_eq!(slots[2], Some(CellSlot { start: 15, length: 7 }));
    }

    #[test]
    fn fourth_range_overflows() {
        let mut cell = 0;
        cell = cell_add_range(cell, 0, 2);
        cell = cell_add_range(cell, 10, 20);
        cell = cell_add_range(cell, 30, 44);
        let overflowed = cell_add_range(cell, 100, 110);
        assert_eq!(overflowed, 0);
    }

    #[test]
    fn start_at_or_past_255_overflows() {
        assert_eq!(cell_add_range(0, 510, 512), 0);
    }

    #[test]
    fn length_over_seven_overflows_when_only_bc_available() {
        // First fill A with something tiny so only B/C remain, then try a
        // range whose length exceeds slot B/C's 3-bit field.
        let cell = cell_add_range(0, 0, 2);
        assert_eq!(cell_add_range(cell, 10, 30), 0);
    }

    #[test]
    fn filled_sentinel_decodes_to_slot_a_length_one() {
        let word = make_cell_from_single_edge(40);
        assert_eq!(decode_cell(word)[0], Some(CellSlot { start: 20, length: 1 }));
    }

    #[test]
    fn square_example_from_spec() {
        // A single square contour packed into one cell: 4 segments as one
        // range [0, 8) — length 4 overflows slot A, lands in slot B.
        let cell = cell_add_range(0, 0, 8);
        assert_eq!(cell, 0x0000_0010);
    }
}
