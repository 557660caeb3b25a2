//! Utilities related to displaying things.

use std::fmt;

use num_format::Locale;
use num_format::ToFormattedString;

/// Utility struct for displays percentages. The first item in the struct is the
/// numerator and the second item in the struct is the denominator.
pub struct PercentageFormat(pub usize, pub usize);

impl fmt::Display for PercentageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.1 == 0 {
            f.write_str("N/A")
        } else {
            let (a, b) = (self.0 as f64, self.1 as f64);
            write!(f, "{:.2}%", a / b * 100.0)
        }
    }
}

/// Utility struct for displaying a count alongside its share of a total, e.g.
/// `1,024 (50.00%)`.
pub struct CountWithPercentage(pub usize, pub usize);

impl fmt::Display for CountWithPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.0.to_formatted_string(&Locale::en),
            PercentageFormat(self.0, self.1)
        )
    }
}

/// Formats a count with thousands separators.
pub fn count(n: usize) -> String {
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_format_guards_zero_total() {
        assert_eq!(PercentageFormat(0, 0).to_string(), "N/A");
        assert_eq!(PercentageFormat(1, 3).to_string(), "33.33%");
    }

    #[test]
    fn test_count_with_percentage() {
        assert_eq!(CountWithPercentage(1024, 2048).to_string(), "1,024 (50.00%)");
        assert_eq!(CountWithPercentage(0, 0).to_string(), "0 (N/A)");
    }
}
