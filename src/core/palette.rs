use indexmap::IndexMap;

/// Ten-color categorical palette, as `0xRRGGBB`.
pub const CATEGORY10: [u32; 10] = [
    0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x7f7f7f, 0xbcbd22,
    0x17becf,
];

/// Assigns palette colors to series names in first-seen order.
///
/// A name keeps its color for the lifetime of the assigner; the palette wraps
/// after ten distinct names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorAssigner {
    assigned: IndexMap<String, usize>,
}

impl ColorAssigner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color of `name`, assigning the next palette slot on first sight.
    pub fn assign(&mut self, name: &str) -> u32 {
        let next = self.assigned.len();
        let index = *self.assigned.entry(name.to_owned()).or_insert(next);
        CATEGORY10[index % CATEGORY10.len()]
    }

    /// Assigns every name of `names` in iteration order.
    pub fn assign_all<'a, I>(&mut self, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.assign(name);
        }
    }

    #[must_use]
    pub fn color_of(&self, name: &str) -> Option<u32> {
        self.assigned
            .get(name)
            .map(|index| CATEGORY10[index % CATEGORY10.len()])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
