//! The values stored in a [`ProfileTree`][crate::ProfileTree]: a person's
//! [`Profile`] made of [`StrRecord`]s.
//!
//! # Examples
//!
//! ```
//! use forensic::profile::{Profile, StrRecord};
//!
//! let profile = Profile::new(vec![StrRecord::new("GGT", 1), StrRecord::new("TTA", 2)]);
//!
//! // "GGT" occurs once in "AGGTCCTT" but "TTA" doesn't occur twice. One match out of two STRs
//! // is still half of them (rounded up) so the profile is a match.
//! assert_eq!(profile.matching_strs("AGGTCCTT"), 1);
//! assert!(profile.is_match("AGGTCCTT"));
//! assert!(!profile.is_of_interest());
//! ```

use std::convert::TryFrom;

/// A short tandem repeat: a repeat unit and how many times it is expected to
/// show up in a subject's DNA.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrRecord {
    unit: String,
    expected_occurrences: i64,
}

impl StrRecord {
    /// Creates a new record. Nothing is validated: a negative count never
    /// matches and an empty unit only matches a count of zero.
    pub fn new(unit: impl Into<String>, expected_occurrences: i64) -> Self {
        Self {
            unit: unit.into(),
            expected_occurrences,
        }
    }

    /// The repeat unit, e.g. `"AGAT"`.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// How many times the unit is expected to occur.
    pub fn expected_occurrences(&self) -> i64 {
        self.expected_occurrences
    }

    /// Whether `sequence` contains exactly the expected number of
    /// non-overlapping occurrences of this record's unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use forensic::profile::StrRecord;
    ///
    /// assert!(StrRecord::new("AA", 2).matches("AAAAA"));
    /// assert!(!StrRecord::new("AA", 4).matches("AAAAA"));
    /// ```
    pub fn matches(&self, sequence: &str) -> bool {
        i64::try_from(occurrences(sequence, &self.unit))
            .map_or(false, |found| found == self.expected_occurrences)
    }
}

/// A person's STRs and whether they've been flagged as being of interest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Profile {
    strs: Vec<StrRecord>,
    of_interest: bool,
}

impl Profile {
    /// Creates a new, unflagged profile.
    pub fn new(strs: Vec<StrRecord>) -> Self {
        Self {
            strs,
            of_interest: false,
        }
    }

    /// The STRs in the order they were given.
    pub fn strs(&self) -> &[StrRecord] {
        &self.strs
    }

    /// Whether the last flagging pass marked this profile.
    pub fn is_of_interest(&self) -> bool {
        self.of_interest
    }

    /// Only the flagging pass gets to decide this.
    pub(crate) fn set_of_interest(&mut self, of_interest: bool) {
        self.of_interest = of_interest;
    }

    /// Counts how many of this profile's STRs match `sequence`.
    pub fn matching_strs(&self, sequence: &str) -> usize {
        self.strs.iter().filter(|record| record.matches(sequence)).count()
    }

    /// Whether at least half (rounded up) of the STRs match `sequence`. A
    /// profile without STRs always matches.
    pub fn is_match(&self, sequence: &str) -> bool {
        self.matching_strs(sequence) >= (self.strs.len() + 1) / 2
    }
}

/// Counts the non-overlapping occurrences of `unit` in `sequence`, scanning left to right and
/// resuming the search after the end of each occurrence. An empty `unit` never occurs.
///
/// # Examples
///
/// ```
/// use forensic::profile::occurrences;
///
/// assert_eq!(occurrences("AGATAGATAGAT", "AGAT"), 3);
/// assert_eq!(occurrences("AAAA", "AA"), 2);
/// assert_eq!(occurrences("AGAT", ""), 0);
/// assert_eq!(occurrences("AG", "AGAT"), 0);
/// ```
pub fn occurrences(sequence: &str, unit: &str) -> usize {
    if unit.is_empty() || unit.len() > sequence.len() {
        return 0;
    }

    sequence.matches(unit).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occurrences_do_not_overlap() {
        assert_eq!(occurrences("AAA", "AA"), 1);
        assert_eq!(occurrences("ATATAT", "ATA"), 1);
        assert_eq!(occurrences("ATAATA", "ATA"), 2);
    }

    #[test]
    fn occurrences_are_case_sensitive() {
        assert_eq!(occurrences("agat", "AGAT"), 0);
    }

    #[test]
    fn zero_expected_matches_absent_unit() {
        assert!(StrRecord::new("GATA", 0).matches("AGGTCCTT"));
        assert!(!StrRecord::new("GATA", 1).matches("AGGTCCTT"));
    }

    #[test]
    fn negative_count_never_matches() {
        assert!(!StrRecord::new("GATA", -1).matches("AGGTCCTT"));
        assert!(!StrRecord::new("", -1).matches(""));
    }

    #[test]
    fn extreme_counts_never_match() {
        let sequence = "AGGT".repeat(64);

        assert!(!StrRecord::new("AGGT", i64::MAX).matches(&sequence));
        assert!(!StrRecord::new("AGGT", i64::MIN).matches(&sequence));
        assert!(StrRecord::new("AGGT", 64).matches(&sequence));
    }

    #[test]
    fn empty_unit_matches_only_zero() {
        assert!(StrRecord::new("", 0).matches("AGGT"));
        assert!(!StrRecord::new("", 1).matches("AGGT"));
    }

    #[test]
    fn majority_rounds_up() {
        let sequence = "AGGTCCTT";
        let hit = || StrRecord::new("GGT", 1);
        let miss = || StrRecord::new("GGT", 3);

        // 1 of 3 isn't enough, ceil(3 / 2) = 2.
        assert!(!Profile::new(vec![hit(), miss(), miss()]).is_match(sequence));
        assert!(Profile::new(vec![hit(), hit(), miss()]).is_match(sequence));
        // 2 of 4 is.
        assert!(Profile::new(vec![hit(), miss(), hit(), miss()]).is_match(sequence));
        assert!(!Profile::new(vec![miss()]).is_match(sequence));
    }

    #[test]
    fn empty_profile_matches() {
        assert!(Profile::new(Vec::new()).is_match(""));
        assert!(Profile::default().is_match("AGGT"));
    }

    #[test]
    fn new_profiles_are_not_of_interest() {
        let profile = Profile::new(vec![StrRecord::new("GGT", 1)]);
        assert!(!profile.is_of_interest());
    }
}
