//! 색상 태그와 ANSI 스타일 래핑 규칙.

const RESET: &str = "\x1b[0m";

/// 설정/명령에서 이름으로 지정하는 전경색 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorTag {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    #[default]
    White,
    Gray,
}

impl ColorTag {
    /// 색상 이름을 태그로 변환한다.
    /// 대소문자를 구분하지 않으며, 알 수 없는 이름은 기본값(white)으로 처리한다.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "red" => Self::Red,
            "green" => Self::Green,
            "blue" => Self::Blue,
            "yellow" => Self::Yellow,
            "cyan" => Self::Cyan,
            "magenta" => Self::Magenta,
            "gray" | "grey" => Self::Gray,
            _ => Self::White,
        }
    }

    /// 선택적 이름을 해석하고, 없으면 주어진 기본 태그를 쓴다.
    pub fn from_name_or(name: Option<&str>, fallback: Self) -> Self {
        name.map(Self::from_name).unwrap_or(fallback)
    }

    pub fn ansi_code(self) -> &'static str {
        match self {
            Self::Red => "31",
            Self::Green => "32",
            Self::Yellow => "33",
            Self::Blue => "34",
            Self::Magenta => "35",
            Self::Cyan => "36",
            Self::White => "37",
            Self::Gray => "90",
        }
    }
}

/// 텍스트를 시작/리셋 시퀀스 쌍으로 감싼다.
pub fn colorize(text: &str, tag: ColorTag) -> String {
    format!("\x1b[{}m{text}{RESET}", tag.ansi_code())
}

/// 스타일 가능한 터미널일 때만 색을 입힌다.
pub fn paint(text: &str, tag: ColorTag, styled: bool) -> String {
    if styled {
        colorize(text, tag)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorize_wraps_with_start_and_reset() {
        assert_eq!(colorize("hi", ColorTag::Green), "\x1b[32mhi\x1b[0m");
    }

    #[test]
    fn unknown_names_fall_back_to_white() {
        assert_eq!(ColorTag::from_name("chartreuse"), ColorTag::White);
        assert_eq!(colorize("x", ColorTag::from_name("")), "\x1b[37mx\x1b[0m");
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(ColorTag::from_name("CyAn"), ColorTag::Cyan);
        assert_eq!(ColorTag::from_name("grey"), ColorTag::Gray);
    }

    #[test]
    fn paint_leaves_plain_text_when_unstyled() {
        assert_eq!(paint("plain", ColorTag::Red, false), "plain");
        assert_eq!(
            ColorTag::from_name_or(None, ColorTag::Yellow),
            ColorTag::Yellow
        );
    }
}
