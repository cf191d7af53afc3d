//! Static directory of the lines with a dataset.

use serde::Serialize;

/// Color used for lines missing from the directory.
pub const DEFAULT_COLOR: &str = "#999999";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineInfo {
    pub name: &'static str,
    pub file_stem: &'static str,
    pub color: &'static str,
}

impl LineInfo {
    /// Button-sized label: `METRO 3BIS` becomes `M3BIS`, RER names are unchanged.
    pub fn short_label(&self) -> String {
        match self.name.strip_prefix("METRO ") {
            Some(rest) => format!("M{rest}"),
            None => self.name.to_string(),
        }
    }
}

const fn line(name: &'static str, file_stem: &'static str, color: &'static str) -> LineInfo {
    LineInfo {
        name,
        file_stem,
        color,
    }
}

pub static LINES: &[LineInfo] = &[
    line("METRO 1", "final_M1", "#FFCD00"),
    line("METRO 2", "final_M2", "#5A9FD4"),
    line("METRO 3", "final_M3", "#A89D3D"),
    line("METRO 3BIS", "final_M3b", "#6EC4E8"),
    line("METRO 4", "final_M4", "#C04191"),
    line("METRO 5", "final_M5", "#F28E42"),
    line("METRO 6", "final_M6", "#6ECA97"),
    line("METRO 7", "final_M7", "#F3A4BA"),
    line("METRO 7BIS", "final_M7b", "#6ECA97"),
    line("METRO 8", "final_M8", "#CEADD2"),
    line("METRO 9", "final_M9", "#CECE00"),
    line("METRO 10", "final_M10", "#E3B32A"),
    line("METRO 11", "final_M11", "#B8936D"),
    line("METRO 12", "final_M12", "#2CA67A"),
    line("METRO 13", "final_M13", "#6EC4E8"),
    line("METRO 14", "final_M14", "#9060B0"),
    line("RER A", "final_RA", "#E4002B"),
    line("RER B", "final_RB", "#5291CE"),
    line("RER C", "final_RC", "#F99D1D"),
    line("RER D", "final_RD", "#00A88F"),
    line("RER E", "final_RE", "#C760AA"),
];

/// Looks a line up by name, ignoring ASCII case.
pub fn find_line(name: &str) -> Option<&'static LineInfo> {
    LINES.iter().find(|l| l.name.eq_ignore_ascii_case(name.trim()))
}

pub fn line_color(name: &str) -> &'static str {
    find_line(name).map_or(DEFAULT_COLOR, |l| l.color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_line() {
        assert_eq!(find_line("METRO 1").map(|l| l.file_stem), Some("final_M1"));
        assert_eq!(find_line("rer b").map(|l| l.file_stem), Some("final_RB"));
        assert_eq!(find_line("METRO 15"), None);
    }

    #[test]
    fn test_line_color_fallback() {
        assert_eq!(line_color("RER A"), "#E4002B");
        assert_eq!(line_color("TRAM 3a"), DEFAULT_COLOR);
    }

    #[test]
    fn test_short_label() {
        let label = |name| find_line(name).map(LineInfo::short_label);
        assert_eq!(label("METRO 7BIS").as_deref(), Some("M7BIS"));
        assert_eq!(label("RER E").as_deref(), Some("RER E"));
    }

    #[test]
    fn test_directory_size() {
        assert_eq!(LINES.len(), 21);
    }
}
