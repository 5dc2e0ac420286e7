//! Age bands used to give the language model age-appropriate sleep guidance.

/// A contiguous range of ages in months with the sleep needs typical for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeBand {
    pub label: &'static str,
    pub min_months: u32,
    /// Exclusive upper bound; `None` for the last band
    pub max_months: Option<u32>,
    pub guidance: &'static str,
}

impl AgeBand {
    pub fn contains(&self, age_months: u32) -> bool {
        age_months >= self.min_months && self.max_months.map_or(true, |max| age_months < max)
    }
}

/// Ordered from youngest to oldest; the first band containing the age wins.
pub static AGE_BANDS: [AgeBand; 5] = [
    AgeBand {
        label: "newborn (0-3 months)",
        min_months: 0,
        max_months: Some(3),
        guidance: "Newborns need 14-17 hours of sleep per day spread over 4-6 naps. \
                   Wake windows are short, usually 45-90 minutes, and night sleep is \
                   not yet consolidated, so naps can happen at any hour.",
    },
    AgeBand {
        label: "infant (3-6 months)",
        min_months: 3,
        max_months: Some(6),
        guidance: "Babies of 3-6 months need 12-16 hours of sleep per day with 3-4 naps. \
                   Wake windows stretch to 1.5-2.5 hours and longer night stretches start \
                   to appear, with bedtime drifting earlier in the evening.",
    },
    AgeBand {
        label: "older baby (6-12 months)",
        min_months: 6,
        max_months: Some(12),
        guidance: "Babies of 6-12 months need 12-15 hours of sleep per day, usually as \
                   2-3 naps. Wake windows are 2-3.5 hours; a mid-morning and an early \
                   afternoon nap are common, and most sleep happens at night.",
    },
    AgeBand {
        label: "toddler (12-24 months)",
        min_months: 12,
        max_months: Some(24),
        guidance: "Toddlers of 12-24 months need 11-14 hours of sleep per day and move \
                   from two naps to a single midday nap of 1.5-3 hours. Wake windows \
                   are 3-5 hours.",
    },
    AgeBand {
        label: "preschooler (24+ months)",
        min_months: 24,
        max_months: None,
        guidance: "Children over two years need 10-13 hours of sleep per day with at \
                   most one afternoon nap of 1-2 hours. Wake windows are 5-6 hours and \
                   bedtime usually falls between 19:00 and 20:30.",
    },
];

pub fn age_band_for(age_months: u32) -> &'static AgeBand {
    AGE_BANDS
        .iter()
        .find(|band| band.contains(age_months))
        .unwrap_or(&AGE_BANDS[AGE_BANDS.len() - 1])
}
