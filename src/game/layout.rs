/// Geometry of one row of guess slots, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    pub slot_width: u16,
    pub gap: u16,
}

impl SlotLayout {
    /// Total width of a row of `count` slots, saturating at `u16::MAX`.
    pub fn row_width(&self, count: usize) -> u16 {
        let count = u16::try_from(count).unwrap_or(u16::MAX);
        count
            .saturating_mul(self.slot_width)
            .saturating_add(count.saturating_sub(1).saturating_mul(self.gap))
    }
}

// Indexed by slot count; fewer slots get wider cards.
const LAYOUTS: [(usize, SlotLayout); 3] = [
    (3, SlotLayout { slot_width: 9, gap: 3 }),
    (4, SlotLayout { slot_width: 7, gap: 2 }),
    (5, SlotLayout { slot_width: 5, gap: 2 }),
];

const FALLBACK: SlotLayout = SlotLayout { slot_width: 3, gap: 1 };

/// Look up the slot geometry for a row of `num_slots` slots.
pub fn slot_layout(num_slots: usize) -> SlotLayout {
    LAYOUTS
        .iter()
        .find(|(slots, _)| *slots == num_slots)
        .map(|(_, layout)| *layout)
        .unwrap_or(FALLBACK)
}
