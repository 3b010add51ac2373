//! 리베이스 시작 날짜 선택기.
//!
//! 상태는 `Initial`(인덱스 0)과 `Selected(k)` 두 가지입니다.
//! 모든 전이는 호출자에게 정확히 한 번의 재렌더링을 요구합니다.

use serde::Serialize;

use crate::domain::PeriodLabel;
use crate::error::{ReportError, ReportResult};

/// 선택기 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorState {
    /// 초기 상태 (가장 이른 날짜)
    #[default]
    Initial,
    /// 사용자가 고른 인덱스
    Selected(usize),
}

impl SelectorState {
    /// 리베이스에 사용할 인덱스.
    pub fn index(self) -> usize {
        match self {
            SelectorState::Initial => 0,
            SelectorState::Selected(index) => index,
        }
    }
}

/// 드롭다운 옵션 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    /// 옵션 값 (레이블 인덱스)
    pub value: usize,
    /// 표시 텍스트 (`MM/YYYY`)
    pub text: String,
}

/// 레이블 시퀀스에서 채워지는 날짜 선택기.
#[derive(Debug, Clone)]
pub struct RebaseSelector {
    labels: Vec<PeriodLabel>,
    state: SelectorState,
}

impl RebaseSelector {
    /// 레이블 시퀀스로 선택기를 만듭니다.
    pub fn new(labels: &[PeriodLabel]) -> Self {
        Self {
            labels: labels.to_vec(),
            state: SelectorState::Initial,
        }
    }

    /// 레이블마다 하나씩, 순서대로 `0..len` 값을 가진 옵션.
    pub fn options(&self) -> Vec<SelectorOption> {
        self.labels
            .iter()
            .enumerate()
            .map(|(value, label)| SelectorOption {
                value,
                text: label.to_string(),
            })
            .collect()
    }

    /// 현재 상태.
    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// 현재 리베이스 인덱스.
    pub fn current_index(&self) -> usize {
        self.state.index()
    }

    /// 현재 리베이스 레이블.
    pub fn current_label(&self) -> Option<PeriodLabel> {
        self.labels.get(self.current_index()).copied()
    }

    /// 레이블 수.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 사용자가 인덱스를 고릅니다.
    ///
    /// 범위를 벗어나면 상태를 바꾸지 않고 에러를 반환합니다.
    pub fn pick(&mut self, index: usize) -> ReportResult<SelectorState> {
        if index >= self.labels.len() {
            return Err(ReportError::InvalidSelection {
                index,
                len: self.labels.len(),
            });
        }
        self.state = SelectorState::Selected(index);
        Ok(self.state)
    }

    /// 초기 상태로 되돌립니다.
    pub fn reset(&mut self) -> SelectorState {
        self.state = SelectorState::Initial;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::monthly_labels;

    fn selector(len: usize) -> RebaseSelector {
        RebaseSelector::new(&monthly_labels("05/2019".parse().unwrap(), len))
    }

    #[test]
    fn test_options_cover_every_label_in_order() {
        let selector = selector(72);
        let options = selector.options();

        assert_eq!(options.len(), 72);
        assert!(options.iter().enumerate().all(|(i, o)| o.value == i));
        assert_eq!(options[0].text, "05/2019");
        assert_eq!(options[71].text, "04/2025");
    }

    #[test]
    fn test_transitions() {
        let mut selector = selector(12);
        assert_eq!(selector.state(), SelectorState::Initial);
        assert_eq!(selector.current_index(), 0);

        assert_eq!(selector.pick(5).unwrap(), SelectorState::Selected(5));
        assert_eq!(selector.current_label().unwrap().to_string(), "10/2019");

        assert_eq!(selector.pick(0).unwrap(), SelectorState::Selected(0));
        assert_eq!(selector.reset(), SelectorState::Initial);
        assert_eq!(selector.current_index(), 0);
    }

    #[test]
    fn test_out_of_range_pick_keeps_state() {
        let mut selector = selector(3);
        selector.pick(2).unwrap();

        assert!(selector.pick(3).is_err());
        assert_eq!(selector.state(), SelectorState::Selected(2));
    }
}
