//! Markdown profile parser
//!
//! Turns raw markdown text into a structured [`Profile`]. The parser is a
//! total function: any input text is accepted and produces a profile, never
//! an error. A document without headings simply yields no sections and falls
//! back to the profile id for its name.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Profile, ProfileSection};

static DEFAULT_PARSER: Lazy<ProfileParser> = Lazy::new(ProfileParser::new);

/// Parse markdown text with the shared default parser.
pub fn parse(source: &str, id: &str, modified_at: f64) -> Profile {
    DEFAULT_PARSER.parse(source, id, modified_at)
}

/// Markdown profile parser with pre-compiled line patterns
#[derive(Debug, Clone)]
pub struct ProfileParser {
    /// ATX heading line: 1-6 leading `#` followed by the title
    heading_pattern: Regex,
    /// Bulleted checkbox line: `-`/`*`/`+` bullet carrying `[ ]`/`[x]`/`[X]`
    checklist_pattern: Regex,
}

impl ProfileParser {
    /// Create a new parser with the default patterns
    pub fn new() -> Self {
        Self {
            heading_pattern: Regex::new(r"^(#{1,6})\s+(.+)$").unwrap(),
            checklist_pattern: Regex::new(r"^[-*+]\s+\[([ xX])\]\s+(.*)$").unwrap(),
        }
    }

    /// Parse `source` into a [`Profile`] identified by `id`.
    ///
    /// Sections accumulate as a flat list in document order; a level-3
    /// heading under a level-2 heading is a sibling entry, not a child.
    /// `modified_at` is carried through untouched and only feeds the
    /// persisted summary index.
    pub fn parse(&self, source: &str, id: &str, modified_at: f64) -> Profile {
        let lines: Vec<&str> = source.lines().collect();

        // Positions of every heading line, in document order.
        let mut headings: Vec<(usize, u8, String)> = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            if let Some(caps) = self.heading_pattern.captures(line) {
                let level = caps[1].len() as u8;
                let title = caps[2].trim().to_string();
                headings.push((idx, level, title));
            }
        }

        // Each section's content spans from the line after its heading up to
        // the next heading line of any level, trimmed of surrounding blanks.
        let mut sections = Vec::with_capacity(headings.len());
        for (pos, (idx, level, title)) in headings.iter().enumerate() {
            let end = headings
                .get(pos + 1)
                .map(|(next_idx, _, _)| *next_idx)
                .unwrap_or(lines.len());
            let content = lines[idx + 1..end].join("\n").trim().to_string();
            sections.push(ProfileSection {
                title: title.clone(),
                level: *level,
                content,
            });
        }

        let first_h1 = headings.iter().find(|(_, level, _)| *level == 1);
        let name = first_h1
            .map(|(_, _, title)| title.clone())
            .unwrap_or_else(|| id.to_string());

        let description = match first_h1 {
            Some((title_idx, _, _)) => {
                let end = headings
                    .iter()
                    .find(|(idx, _, _)| idx > title_idx)
                    .map(|(idx, _, _)| *idx)
                    .unwrap_or(lines.len());
                self.leading_paragraph(&lines[title_idx + 1..end])
            }
            None => String::new(),
        };

        // Checklist items are collected document-wide, regardless of which
        // section they fall in.
        let checklist = lines
            .iter()
            .filter_map(|line| {
                self.checklist_pattern.captures(line).map(|caps| {
                    format!("[{}] {}", caps[1].to_ascii_lowercase(), &caps[2])
                })
            })
            .collect();

        Profile {
            id: id.to_string(),
            name,
            description,
            sections,
            checklist,
            raw_content: source.to_string(),
            last_modified: modified_at,
        }
    }

    /// First paragraph of body text: leading blank lines are skipped, then
    /// lines accumulate until a blank line or a checklist line ends the run.
    fn leading_paragraph(&self, lines: &[&str]) -> String {
        let mut paragraph: Vec<&str> = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                if paragraph.is_empty() {
                    continue;
                }
                break;
            }
            if self.checklist_pattern.is_match(line) {
                break;
            }
            paragraph.push(line);
        }
        paragraph.join("\n").trim().to_string()
    }
}

impl Default for ProfileParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_profile() {
        let source = "# Test Profile\n\nA one-line summary.\n\n## Setup\n\nInstall things.\n\n## Usage\n\nRun things.\n";
        let profile = parse(source, "test-profile", 0.0);

        assert_eq!(profile.id, "test-profile");
        assert_eq!(profile.name, "Test Profile");
        assert_eq!(profile.description, "A one-line summary.");
        assert_eq!(profile.sections.len(), 3);
        assert_eq!(profile.sections[0].title, "Test Profile");
        assert_eq!(profile.sections[0].level, 1);
        assert_eq!(profile.sections[1].title, "Setup");
        assert_eq!(profile.sections[1].level, 2);
        assert_eq!(profile.sections[1].content, "Install things.");
        assert_eq!(profile.sections[2].title, "Usage");
        assert_eq!(profile.raw_content, source);
    }

    #[test]
    fn test_no_headings_falls_back_to_id() {
        let profile = parse("just some prose\nover two lines\n", "fallback", 1.0);
        assert_eq!(profile.name, "fallback");
        assert_eq!(profile.description, "");
        assert!(profile.sections.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let profile = parse("", "empty", 0.0);
        assert_eq!(profile.name, "empty");
        assert_eq!(profile.description, "");
        assert!(profile.sections.is_empty());
        assert!(profile.checklist.is_empty());
        assert_eq!(profile.raw_content, "");
    }

    #[test]
    fn test_checklist_normalization() {
        let source = "- [ ] Item one\n- [x] Item two (completed)\n- [ ] Item three\n";
        let profile = parse(source, "tasks", 0.0);
        assert_eq!(
            profile.checklist,
            vec![
                "[ ] Item one",
                "[x] Item two (completed)",
                "[ ] Item three"
            ]
        );
    }

    #[test]
    fn test_checklist_mixed_bullets_and_case() {
        let source = "* [X] Upper\n+ [x] Plus bullet\n- [ ] Dash\nnot a list line\n1. [x] numbered lists do not count\n";
        let profile = parse(source, "mixed", 0.0);
        assert_eq!(
            profile.checklist,
            vec!["[x] Upper", "[x] Plus bullet", "[ ] Dash"]
        );
    }

    #[test]
    fn test_checklist_collected_across_sections() {
        let source = "# Top\n\n## A\n\n- [ ] first\n\n## B\n\n- [x] second\n";
        let profile = parse(source, "spread", 0.0);
        assert_eq!(profile.checklist, vec!["[ ] first", "[x] second"]);
        // The section bodies keep their checklist lines verbatim.
        assert_eq!(profile.sections[1].content, "- [ ] first");
        assert_eq!(profile.sections[2].content, "- [x] second");
    }

    #[test]
    fn test_sections_stay_flat() {
        let source = "# Root\n\n## Child\n\n### Grandchild\n\n#### Deeper\n";
        let profile = parse(source, "flat", 0.0);
        let levels: Vec<u8> = profile.sections.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_heading_requires_space_and_max_six_hashes() {
        let source = "#NoSpace\n####### seven hashes\n###### six is fine\n";
        let profile = parse(source, "edges", 0.0);
        assert_eq!(profile.sections.len(), 1);
        assert_eq!(profile.sections[0].title, "six is fine");
        assert_eq!(profile.sections[0].level, 6);
        assert_eq!(profile.name, "edges");
    }

    #[test]
    fn test_description_stops_at_checklist_line() {
        let source = "# Plan\n\nIntro paragraph.\n- [ ] a task\nmore text after\n";
        let profile = parse(source, "plan", 0.0);
        assert_eq!(profile.description, "Intro paragraph.");
        assert_eq!(profile.checklist, vec!["[ ] a task"]);
    }

    #[test]
    fn test_description_only_from_first_h1_span() {
        let source = "## Preamble\n\nnot the description\n\n# Real Title\n\nthe description\n";
        let profile = parse(source, "ordering", 0.0);
        assert_eq!(profile.name, "Real Title");
        assert_eq!(profile.description, "the description");
    }

    #[test]
    fn test_multiline_description() {
        let source = "# Doc\n\nfirst line\nsecond line\n\nnext paragraph\n";
        let profile = parse(source, "doc", 0.0);
        assert_eq!(profile.description, "first line\nsecond line");
    }

    #[test]
    fn test_section_content_trimmed_of_surrounding_blanks() {
        let source = "# A\n\n\nbody text\n\n\n# B\n";
        let profile = parse(source, "trim", 0.0);
        assert_eq!(profile.sections[0].content, "body text");
        assert_eq!(profile.sections[1].content, "");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "# T\n\ndesc\n\n## S\n\n- [X] item\n";
        let a = parse(source, "t", 42.0);
        let b = parse(source, "t", 42.0);
        assert_eq!(a.name, b.name);
        assert_eq!(a.description, b.description);
        assert_eq!(a.sections.len(), b.sections.len());
        assert_eq!(a.checklist, b.checklist);
        assert_eq!(a.raw_content, b.raw_content);
        assert_eq!(a.last_modified, b.last_modified);
    }

    #[test]
    fn test_section_count_matches_heading_lines() {
        let source = "# one\ntext\n## two\n### three\nmore\n###### six\n";
        let parser = ProfileParser::new();
        let profile = parser.parse(source, "count", 0.0);
        let heading_lines = source
            .lines()
            .filter(|l| parser.heading_pattern.is_match(l))
            .count();
        assert_eq!(profile.sections.len(), heading_lines);
    }
}
