use soroban_sdk::contracttype;

const FIVE_BAND_LABELS: [&str; 5] = ["18-25", "26-35", "36-50", "51-65", "65+"];

const EIGHT_BAND_LABELS: [&str; 8] = [
    "0-12", "13-18", "19-25", "26-35", "36-50", "51-65", "66-80", "80+",
];

/// Age-group bucketing scheme a vault validates `age_group` against.
///
/// Groups are 1-based indexes into the scheme's label table.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AgeBanding {
    /// Adult bands, 18-25 up to 65+.
    Five,
    /// Whole-life bands, 0-12 up to 80+.
    Eight,
}

impl AgeBanding {
    fn labels(self) -> &'static [&'static str] {
        match self {
            AgeBanding::Five => &FIVE_BAND_LABELS,
            AgeBanding::Eight => &EIGHT_BAND_LABELS,
        }
    }

    /// Highest valid group under this scheme.
    pub fn max_group(self) -> u32 {
        self.labels().len() as u32
    }

    pub fn contains(self, group: u32) -> bool {
        (1..=self.max_group()).contains(&group)
    }

    /// Human-readable age range for `group`, `None` when out of range.
    pub fn label(self, group: u32) -> Option<&'static str> {
        if !self.contains(group) {
            return None;
        }
        self.labels().get(group as usize - 1).copied()
    }
}
