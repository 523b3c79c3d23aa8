//! 표 출력용 열 너비 계산과 행 포맷.

use unicode_width::UnicodeWidthStr;

const COLUMN_SEPARATOR: &str = " | ";

/// 헤더보다 셀이 적은 행을 발견했을 때의 오류.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("table row {row} has {found} cells but {expected} headers")]
pub struct RaggedRow {
    pub row: usize,
    pub found: usize,
    pub expected: usize,
}

/// 열별 너비 정보.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    widths: Vec<usize>,
}

impl TableLayout {
    /// 헤더와 모든 행의 같은 열 셀 중 최대 표시 폭을 열 너비로 삼는다.
    /// 헤더 수를 넘는 셀은 무시한다.
    pub fn measure<H, C>(headers: &[H], rows: &[Vec<C>]) -> Result<Self, RaggedRow>
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h.as_ref())).collect();

        for (idx, row) in rows.iter().enumerate() {
            if row.len() < headers.len() {
                return Err(RaggedRow {
                    row: idx,
                    found: row.len(),
                    expected: headers.len(),
                });
            }
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(cell.as_ref()));
            }
        }

        Ok(Self { widths })
    }

    #[cfg(test)]
    fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// 각 셀을 열 너비만큼 왼쪽 정렬해 ` | `로 잇는다.
    pub fn format_row<S: AsRef<str>>(&self, cells: &[S]) -> String {
        self.widths
            .iter()
            .zip(cells)
            .map(|(width, cell)| pad_display(cell.as_ref(), *width))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR)
    }

    /// 주어진 헤더 줄과 같은 길이의 구분선.
    pub fn rule_for(line: &str) -> String {
        "-".repeat(display_width(line))
    }
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn pad_display(text: &str, width: usize) -> String {
    let used = display_width(text);
    let mut out = text.to_string();
    if used < width {
        out.push_str(&" ".repeat(width - used));
    }
    out
}
