//! 시작 배너 렌더링 모듈.

use unicode_width::UnicodeWidthStr;

const MAX_TITLE_WIDTH: usize = 58;

/// 셸 이름을 테두리 상자로 감싼 배너 줄을 만든다.
pub fn render_banner(title: &str) -> Vec<String> {
    let title = fit_box_line(title, MAX_TITLE_WIDTH);
    let width = UnicodeWidthStr::width(title.as_str());
    let border = format!("+{}+", "-".repeat(width + 2));

    vec![border.clone(), format!("| {title} |"), border]
}

/// 시작 직후 출력하는 로딩 완료 문구.
pub fn render_loaded_line(name: &str) -> String {
    format!("SpectraCLI Loaded: {name}")
}

fn fit_box_line(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }

    if width <= 3 {
        return ".".repeat(width);
    }

    let mut head = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > width - 3 {
            break;
        }
        head.push(ch);
        used += cw;
    }
    format!("{head}...")
}
