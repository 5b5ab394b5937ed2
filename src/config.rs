pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 10;

/// Vessel lengths of the standard fleet, in placement order.
pub const FLEET: [usize; NUM_SHIPS] = [1, 1, 1, 1, 2, 2, 2, 3, 3, 4];

/// Total number of vessel cells in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 * 1 + 3 * 2 + 2 * 3 + 4;

/// Random placement attempts per vessel before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;
