//! Section reader for EPANET-style `.inp` network files.
//!
//! The format is line oriented:
//!
//! ```text
//! [JUNCTIONS]
//! ;ID   Elev   Demand
//!  J1   82.5   10
//!
//! [PIPES]
//!  P1   J1   J2   1200   300   100
//! ```
//!
//! Headers are bracketed names (case-insensitive), `;` starts a comment line,
//! and anything before the first header is ignored. The reader only groups raw
//! lines by section; interpreting the columns is left to the graph loader.

use std::collections::BTreeMap;

const SECTION_START: char = '[';
const SECTION_END: char = ']';
const COMMENT: char = ';';

/// Raw record lines grouped by upper-cased section name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    sections: BTreeMap<String, Vec<String>>,
}

impl Sections {
    /// Split `text` into sections.
    pub fn parse(text: &str) -> Self {
        let mut sections: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut current: Option<String> = None;

        // `\r\n`, `\n` and a lone `\r` all end a line; the empty pieces
        // between `\r` and `\n` are skipped as blank lines.
        for raw in text.split(['\r', '\n']) {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(COMMENT) {
                continue;
            }

            if is_section_header(line) {
                let name = line
                    .trim_matches(|c| c == SECTION_START || c == SECTION_END)
                    .to_uppercase();
                sections.entry(name.clone()).or_default();
                // An empty header ("[]") closes the previous section without opening one.
                current = (!name.is_empty()).then_some(name);
                continue;
            }

            if let Some(name) = &current {
                sections.entry(name.clone()).or_default().push(line.to_string());
            }
        }

        Self { sections }
    }

    /// Decode `bytes` (dropping invalid UTF-8) and split into sections.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::parse(&decode_lossy(bytes))
    }

    /// Record lines of a section. Missing sections read as empty.
    pub fn get(&self, name: &str) -> &[String] {
        self.sections
            .get(&name.to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a header with this name was seen.
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(&name.to_uppercase())
    }

    /// Section names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for Sections {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut sections: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, lines) in iter {
            sections.entry(name.to_uppercase()).or_default().extend(lines);
        }
        Self { sections }
    }
}

fn is_section_header(line: &str) -> bool {
    line.starts_with(SECTION_START) && line.ends_with(SECTION_END)
}

/// Decode UTF-8, silently dropping byte sequences that are not valid.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
; leading comment
ignored before first header
[TITLE]
Sample network

[junctions]
;ID  Elev
 J1  50
 J2  150

[PIPES]
P1 J1 J2 100
";

    #[test]
    fn test_parse_sections() {
        let sections = Sections::parse(SAMPLE);

        assert_eq!(sections.get("TITLE"), &["Sample network".to_string()]);
        assert_eq!(
            sections.get("JUNCTIONS"),
            &["J1  50".to_string(), "J2  150".to_string()]
        );
        assert_eq!(sections.get("PIPES"), &["P1 J1 J2 100".to_string()]);
    }

    #[test]
    fn test_mixed_line_endings() {
        let sections = Sections::parse("[JUNCTIONS]\rJ1 10\r[PIPES]\r\nP1 J1 J2\nP2 J2 J3\r");

        assert_eq!(sections.get("JUNCTIONS"), &["J1 10".to_string()]);
        assert_eq!(
            sections.get("PIPES"),
            &["P1 J1 J2".to_string(), "P2 J2 J3".to_string()]
        );
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let sections = Sections::parse(SAMPLE);
        assert!(sections.contains("junctions"));
        assert_eq!(sections.get("Junctions").len(), 2);
    }

    #[test]
    fn test_lines_before_first_header_are_dropped() {
        let sections = Sections::parse("J1 10\nP1 A B\n");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_missing_section_reads_empty() {
        let sections = Sections::parse("[PIPES]\nP1 A B\n");
        assert!(sections.get("JUNCTIONS").is_empty());
    }

    #[test]
    fn test_repeated_header_appends() {
        let sections = Sections::parse("[PIPES]\nP1 A B\n[TAGS]\nx\n[pipes]\nP2 B C\n");
        assert_eq!(sections.get("PIPES").len(), 2);
    }

    #[test]
    fn test_empty_header_closes_section() {
        let sections = Sections::parse("[PIPES]\nP1 A B\n[]\nP2 B C\n");
        assert_eq!(sections.get("PIPES"), &["P1 A B".to_string()]);
    }

    #[test]
    fn test_invalid_utf8_is_dropped() {
        let mut bytes = b"[PIPES]\nP1 A".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b" B\n");

        let sections = Sections::from_bytes(&bytes);
        assert_eq!(sections.get("PIPES"), &["P1 A B".to_string()]);
    }

    #[test]
    fn test_from_iter_normalizes_names() {
        let sections: Sections = vec![("pipes".to_string(), vec!["P1 A B".to_string()])]
            .into_iter()
            .collect();
        assert_eq!(sections.names().collect::<Vec<_>>(), vec!["PIPES"]);
    }
}
