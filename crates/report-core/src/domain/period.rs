//! 월 단위 기간 레이블.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// 달력상의 한 달을 나타내는 레이블.
///
/// 텍스트 형식은 `MM/YYYY`이며 연도, 월 순으로 정렬됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodLabel {
    year: i32,
    month: u32,
}

impl PeriodLabel {
    /// 연도와 월(1-12)로 레이블을 생성합니다.
    pub fn new(year: i32, month: u32) -> ReportResult<Self> {
        if !(1000..=9999).contains(&year) {
            return Err(ReportError::Data(format!(
                "연도는 네 자리여야 합니다: {}",
                year
            )));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|date| Self {
                year: date.year(),
                month: date.month(),
            })
            .ok_or_else(|| ReportError::Data(format!("잘못된 월: {:02}/{}", month, year)))
    }

    /// 연도.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 월 (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// 다음 달 레이블.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// `other`까지의 개월 수 (`other`가 이전이면 음수).
    pub fn months_until(&self, other: &PeriodLabel) -> i64 {
        let from = i64::from(self.year) * 12 + i64::from(self.month);
        let to = i64::from(other.year) * 12 + i64::from(other.month);
        to - from
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for PeriodLabel {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReportError::Data(format!("레이블 형식은 MM/YYYY여야 합니다: '{}'", s));

        let (month, year) = s.trim().split_once('/').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if month.len() != 2 || year.len() != 4 || !all_digits(month) || !all_digits(year) {
            return Err(invalid());
        }

        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for PeriodLabel {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodLabel> for String {
    fn from(label: PeriodLabel) -> Self {
        label.to_string()
    }
}

/// `start`부터 연속된 `count`개의 월 레이블을 생성합니다.
pub fn monthly_labels(start: PeriodLabel, count: usize) -> Vec<PeriodLabel> {
    std::iter::successors(Some(start), |label| Some(label.next()))
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let label: PeriodLabel = "05/2019".parse().unwrap();
        assert_eq!(label.year(), 2019);
        assert_eq!(label.month(), 5);
        assert_eq!(label.to_string(), "05/2019");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["5/2019", "2019-05", "13/2019", "00/2019", "05/19", "ab/2019", ""] {
            assert!(input.parse::<PeriodLabel>().is_err(), "{input}");
        }
    }

    #[test]
    fn test_next_rolls_over_year() {
        let dec: PeriodLabel = "12/2014".parse().unwrap();
        assert_eq!(dec.next().to_string(), "01/2015");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a: PeriodLabel = "12/2013".parse().unwrap();
        let b: PeriodLabel = "01/2014".parse().unwrap();
        assert!(a < b);
        assert_eq!(a.months_until(&b), 1);
        assert_eq!(b.months_until(&a), -1);
    }

    #[test]
    fn test_monthly_labels() {
        let start: PeriodLabel = "01/2011".parse().unwrap();
        let labels = monthly_labels(start, 172);
        assert_eq!(labels.len(), 172);
        assert_eq!(labels[45].to_string(), "10/2014");
        assert_eq!(labels[171].to_string(), "04/2025");
    }

    #[test]
    fn test_serde_as_string() {
        let label: PeriodLabel = "03/2020".parse().unwrap();
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"03/2020\"");
        let back: PeriodLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }
}
