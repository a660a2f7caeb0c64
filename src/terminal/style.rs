//! ANSI style markers embedded in terminal output. The UI turns them into colours.

use std::sync::LazyLock;

use regex::Regex;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("ANSI pattern is valid"));

pub fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}

pub fn strip(text: &str) -> String {
    ANSI_RE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_and_strip() {
        let painted = paint(BLUE, "Documents");
        assert_eq!(painted, "\x1b[34mDocuments\x1b[0m");
        assert_eq!(strip(&painted), "Documents");
        assert_eq!(strip(&format!("{BOLD}a{RESET} {RED}b{RESET}")), "a b");
        assert_eq!(strip("plain"), "plain");
    }
}
