//! The GSF file table (§4.F): state carried across records in one open file.

use crate::scale::ScaleFactors;

/// Per-file state that persists across records: the canonical scale-factor table (carried
/// forward from whichever ping last supplied one) and an index of which scale factors were
/// in effect as of which ping, for random access.
#[derive(Clone, Debug, Default)]
pub struct FileTable {
    /// The scale factors currently in effect, updated whenever a ping supplies its own.
    pub scale_factors: ScaleFactors,
    /// `(ping_index, scale_factors_as_of_that_ping)`, appended to every time a ping changes
    /// the table, so a random-access reader can recover "what were the scale factors as of
    /// ping N" without replaying the whole file from the start.
    index: Vec<(u64, ScaleFactors)>,
    ping_count: u64,
    /// True once any ping has used scale-factor compression, so readers can tell an absent
    /// table apart from one that was simply never needed.
    has_scale_factors: bool,
}

impl FileTable {
    /// A fresh, empty file table.
    pub fn new() -> FileTable {
        FileTable::default()
    }

    /// Records that a ping at `ping_index` supplied a fresh scale-factor table.
    pub fn set_scale_factors(&mut self, ping_index: u64, scale_factors: ScaleFactors) {
        self.has_scale_factors = true;
        self.scale_factors = scale_factors.clone();
        self.index.push((ping_index, scale_factors));
    }

    /// Advances the ping counter; call once per ping read or written.
    pub fn advance_ping(&mut self) -> u64 {
        let index = self.ping_count;
        self.ping_count += 1;
        index
    }

    /// The scale factors in effect as of `ping_index`, found by scanning backward through
    /// the index for the most recent entry at or before that ping.
    pub fn scale_factors_as_of(&self, ping_index: u64) -> Option<&ScaleFactors> {
        self.index
            .iter()
            .rev()
            .find(|(idx, _)| *idx <= ping_index)
            .map(|(_, sf)| sf)
    }

    /// Whether any ping in the file has supplied a scale-factor table yet.
    pub fn has_scale_factors(&self) -> bool {
        self.has_scale_factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::FieldSize;

    #[test]
    fn scale_factors_as_of_finds_the_most_recent_entry() {
        let mut ft = FileTable::new();
        let mut sf = ScaleFactors::new();
        sf.set_field_size(1, FieldSize::Two);
        ft.set_scale_factors(0, sf);
        let mut sf2 = ScaleFactors::new();
        sf2.set_field_size(1, FieldSize::Four);
        ft.set_scale_factors(5, sf2);

        assert_eq!(
            FieldSize::Two,
            ft.scale_factors_as_of(2).unwrap().get(1).unwrap().field_size().unwrap()
        );
        assert_eq!(
            FieldSize::Four,
            ft.scale_factors_as_of(10).unwrap().get(1).unwrap().field_size().unwrap()
        );
        assert!(ft.scale_factors_as_of(0).is_some());
    }
}
