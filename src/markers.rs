//! Decorative text that frames the generated file and every inlined block.

/// Border drawn above and below each begin/end marker line.
pub const BLOCK_BORDER: &str = "/*---------------------------*/";

/// Border drawn around the version banner at the top of the output.
pub const BANNER_BORDER: &str = "/*+++++++++++++++++++++++++++*/";

pub fn begin_marker(id: &str) -> String {
    format!("//   begin of \"{id}\"")
}

pub fn end_marker(id: &str) -> String {
    format!("//   end of \"{id}\"")
}

/// Wraps an expanded root with the version banner.
pub fn with_banner(version_label: &str, body: &str) -> String {
    format!("{BANNER_BORDER}\n//   version {version_label}\n{BANNER_BORDER}\n\n{body}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_matches_layout() {
        let out = with_banner("1.2.3", "BODY");
        assert_eq!(
            out,
            "/*+++++++++++++++++++++++++++*/\n//   version 1.2.3\n/*+++++++++++++++++++++++++++*/\n\nBODY\n"
        );
    }

    #[test]
    fn markers_quote_the_identifier() {
        assert_eq!(begin_marker("a.hpp"), "//   begin of \"a.hpp\"");
        assert_eq!(end_marker("dir/b.hpp"), "//   end of \"dir/b.hpp\"");
    }
}
