//! 진행 막대 프레임 계산.

/// 막대 세그먼트 수. 총 스텝 수와 무관하게 고정된다.
pub const BAR_WIDTH: usize = 20;

/// 진행 막대 한 프레임. 실행 중에만 존재하는 값이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressFrame {
    pub step: usize,
    pub total: usize,
}

impl ProgressFrame {
    /// 정수 백분율(내림). 총 스텝이 0이면 완료(100)로 본다.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        100 * self.step / self.total
    }

    pub fn filled(&self) -> usize {
        if self.total == 0 {
            return BAR_WIDTH;
        }
        BAR_WIDTH * self.step / self.total
    }

    /// `#`(채움)과 `-`(빈칸)로 구성된 막대 본문.
    pub fn bar(&self) -> String {
        let filled = self.filled();
        format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
    }
}

/// 0%와 100%를 모두 포함하는 `total + 1`개의 프레임을 만든다.
/// `total == 0`이면 100% 프레임 하나만 만든다.
pub fn frames(total: usize) -> impl Iterator<Item = ProgressFrame> {
    (0..=total).map(move |step| ProgressFrame { step, total })
}
