//! Shared scalar normalizers for WQD crates.
//!
//! Everything here is pure and total: bad input yields `None`, never a panic
//! or an error, so callers can drop the offending row and move on.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;
    use std::fmt;

    /// A calendar day in canonical `MM/DD/YYYY` form.
    ///
    /// Only constructed through [`normalize_date`], so the label always has
    /// three non-empty `/`-separated components with a zero-padded month and
    /// day. Whether those components are numeric is checked lazily by
    /// [`date_sort_key`].
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct NormalizedDate {
        label: String,
    }

    impl NormalizedDate {
        /// The canonical `MM/DD/YYYY` label.
        pub fn as_str(&self) -> &str {
            &self.label
        }

        /// Integer `YYYYMMDD` key, see [`date_sort_key`].
        pub fn sort_key(&self) -> Option<u64> {
            date_sort_key(self)
        }

        /// The date as a chrono `NaiveDate`, if it names a real calendar day.
        pub fn to_naive_date(&self) -> Option<NaiveDate> {
            let (mm, dd, yyyy) = self.parts()?;
            let month = mm.parse::<u32>().ok()?;
            let day = dd.parse::<u32>().ok()?;
            let year = yyyy.parse::<i32>().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        }

        /// Milliseconds since the Unix epoch at UTC midnight of this day.
        pub fn epoch_millis(&self) -> Option<i64> {
            let date = self.to_naive_date()?;
            Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
        }

        fn parts(&self) -> Option<(&str, &str, &str)> {
            let mut it = self.label.split('/');
            let mm = it.next()?;
            let dd = it.next()?;
            let yyyy = it.next()?;
            Some((mm, dd, yyyy))
        }
    }

    impl fmt::Display for NormalizedDate {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.label)
        }
    }

    /// Canonicalize `M/D/YYYY[ H:MM:SS AM|PM]` to `MM/DD/YYYY`.
    ///
    /// Takes the first whitespace-separated token, splits it on `/` and
    /// requires exactly three non-empty components. Month and day are
    /// zero-padded to two digits; the year is kept as written.
    pub fn normalize_date(raw: &str) -> Option<NormalizedDate> {
        let first = raw.split_whitespace().next()?;
        let parts: Vec<&str> = first.split('/').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        Some(NormalizedDate {
            label: format!("{:0>2}/{:0>2}/{}", parts[0], parts[1], parts[2]),
        })
    }

    /// Reassemble a normalized date as `YYYYMMDD` and parse it as an integer.
    ///
    /// Returns `None` when any component holds something other than ASCII
    /// digits.
    pub fn date_sort_key(date: &NormalizedDate) -> Option<u64> {
        let (mm, dd, yyyy) = date.parts()?;
        let joined = format!("{}{}{}", yyyy, mm, dd);
        if joined.is_empty() || !joined.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        joined.parse::<u64>().ok()
    }


}

/// Numeric coercion for loosely typed CSV fields
pub mod numbers {
    /// Parse text as a finite number after removing `,` thousands separators.
    ///
    /// Empty or whitespace-only text, unparseable text and non-finite results
    /// (`NaN`, `inf`) all yield `None`.
    pub fn coerce_str(raw: &str) -> Option<f64> {
        if raw.is_empty() {
            return None;
        }
        let stripped: String = raw.chars().filter(|c| *c != ',').collect();
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    /// Accept an already-numeric value only if it is finite.
    pub fn coerce_f64(n: f64) -> Option<f64> {
        Some(n).filter(|n| n.is_finite())
    }

    /// True when a raw CSV field should be typed as a number at decode time.
    ///
    /// Matches `-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?` after trimming, so
    /// `"1,234"`, `"inf"` and `"+5"` stay text.
    pub fn looks_numeric(raw: &str) -> bool {
        let s = raw.trim().as_bytes();
        let mut i = 0;
        if s.first() == Some(&b'-') {
            i += 1;
        }
        let int_start = i;
        while i < s.len() && s[i].is_ascii_digit() {
            i += 1;
        }
        let int_digits = i - int_start;
        let mut frac_digits = 0;
        if i < s.len() && s[i] == b'.' {
            i += 1;
            let frac_start = i;
            while i < s.len() && s[i].is_ascii_digit() {
                i += 1;
            }
            frac_digits = i - frac_start;
        }
        if int_digits == 0 && frac_digits == 0 {
            return false;
        }
        if i < s.len() && (s[i] == b'e' || s[i] == b'E') {
            i += 1;
            if i < s.len() && (s[i] == b'+' || s[i] == b'-') {
                i += 1;
            }
            let exp_start = i;
            while i < s.len() && s[i].is_ascii_digit() {
                i += 1;
            }
            if i == exp_start {
                return false;
            }
        }
        i == s.len()
    }

}

/// Group-key normalization and label ordering
pub mod text {
    use std::cmp::Ordering;
    use unicode_normalization::char::is_combining_mark;
    use unicode_normalization::UnicodeNormalization;

    /// Collapse internal whitespace runs to one space and trim both ends.
    pub fn normalize_key(raw: &str) -> String {
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Label ordering used for chart categories.
    ///
    /// Compares in three passes, like a root-locale collator: base letters
    /// with accents and case folded away, then accents, then case with
    /// lowercase first. `"Étang"` sorts between `"Eagle"` and `"Zebra"`.
    pub fn locale_cmp(a: &str, b: &str) -> Ordering {
        base_letters(a)
            .cmp(base_letters(b))
            .then_with(|| accented(a).cmp(accented(b)))
            .then_with(|| case_marks(a).cmp(case_marks(b)))
    }

    fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
    }

    fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
        s.nfd().flat_map(char::to_lowercase)
    }

    fn case_marks(s: &str) -> impl Iterator<Item = bool> + '_ {
        s.nfd().map(char::is_uppercase)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_normalize_key() {
            assert_eq!(normalize_key("  Mo Ave.   Well\t2 "), "Mo Ave. Well 2");
            assert_eq!(normalize_key("Sulfate as SO4 (mg/l)"), "Sulfate as SO4 (mg/l)");
            assert_eq!(normalize_key("   "), "");
        }

        #[test]
        fn test_locale_cmp() {
            assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
            assert_eq!(locale_cmp("Well 10", "well 2"), Ordering::Less);
            assert_eq!(locale_cmp("b", "a"), Ordering::Greater);
            assert_eq!(locale_cmp("abc", "abc"), Ordering::Equal);
        }

        #[test]
        fn test_locale_cmp_folds_accents() {
            let mut labels = vec!["Zebra Well", "Étang Well", "Eagle Well"];
            labels.sort_by(|a, b| locale_cmp(a, b));
            assert_eq!(labels, vec!["Eagle Well", "Étang Well", "Zebra Well"]);
            assert_eq!(locale_cmp("resume", "résumé"), Ordering::Less);
            assert_eq!(locale_cmp("résumé", "resumes"), Ordering::Less);
        }

        #[test]
        fn test_locale_cmp_lowercase_first() {
            assert_eq!(locale_cmp("well a", "Well A"), Ordering::Less);
            assert_eq!(locale_cmp("Well A", "well a"), Ordering::Greater);
            assert_eq!(locale_cmp("Well a", "well b"), Ordering::Less);
        }
    }

}
