//! Puzzle identifiers and new-puzzle scaffolding

mod scaffold;

pub use scaffold::create_puzzle;

use crate::error::{Result, RunError};
use std::fmt;
use std::str::FromStr;

/// First year puzzles were published
const FIRST_YEAR: u16 = 2015;

/// Number of puzzles per year
const LAST_DAY: u8 = 25;

/// A single daily puzzle, written `YEAR/DAY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Puzzle {
    year: u16,
    day: u8,
}

impl Puzzle {
    pub fn new(year: u16, day: u8) -> Result<Self> {
        if year < FIRST_YEAR || !(1..=LAST_DAY).contains(&day) {
            return Err(RunError::InvalidPuzzle(format!("{}/{}", year, day)));
        }
        Ok(Self { year, day })
    }

    #[inline]
    pub fn year(&self) -> u16 {
        self.year
    }

    /// File name shared by the solution and the input, without extension
    pub fn file_stem(&self) -> String {
        format!("day{:02}", self.day)
    }
}

impl FromStr for Puzzle {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RunError::InvalidPuzzle(s.to_string());
        let (year, day) = s
            .trim()
            .split_once(|c: char| c == '/' || c == '-')
            .ok_or_else(invalid)?;
        let year: u16 = year.parse().map_err(|_| invalid())?;
        let day: u8 = day.parse().map_err(|_| invalid())?;
        Puzzle::new(year, day).map_err(|_| invalid())
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.year, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash_and_dash() {
        assert_eq!(Puzzle::from_str("2023/1").unwrap(), Puzzle::new(2023, 1).unwrap());
        assert_eq!(Puzzle::from_str("2023/01").unwrap(), Puzzle::new(2023, 1).unwrap());
        assert_eq!(Puzzle::from_str("2016-25").unwrap(), Puzzle::new(2016, 25).unwrap());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        for raw in ["2023/0", "2023/26", "2014/1"] {
            let result = Puzzle::from_str(raw);
            assert!(
                matches!(result, Err(RunError::InvalidPuzzle(ref s)) if s == raw),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Puzzle::from_str("day1").is_err());
        assert!(Puzzle::from_str("2023/x").is_err());
        assert!(Puzzle::from_str("").is_err());
    }

    #[test]
    fn test_display_pads_day() {
        let puzzle = Puzzle::new(2019, 7).unwrap();
        assert_eq!(puzzle.to_string(), "2019/07");
        assert_eq!(puzzle.file_stem(), "day07");
    }
}
