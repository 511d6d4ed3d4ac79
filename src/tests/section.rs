use super::{anchor_from_title, build_sections, Heading, Section};
use std::path::Path;

fn headings(levels: &[usize]) -> Vec<Heading> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| Heading {
            level,
            title: format!("H{i}"),
            line: i + 1,
        })
        .collect()
}

fn shape(sections: &[Section]) -> Vec<(String, Vec<String>)> {
    sections
        .iter()
        .map(|s| {
            (
                s.title.clone(),
                s.children.iter().map(|c| c.title.clone()).collect(),
            )
        })
        .collect()
}

#[test]
fn test_anchor_punctuation_and_digits() {
    assert_eq!(anchor_from_title("Hello, World! 2024"), "#hello-world-2024");
}

#[test]
fn test_anchor_trims_hyphens() {
    assert_eq!(anchor_from_title("  --trim--  "), "#trim");
}

#[test]
fn test_anchor_non_ascii_collapses() {
    assert_eq!(anchor_from_title("Café au lait"), "#caf-au-lait");
    assert_eq!(anchor_from_title("1. Intro"), "#1-intro");
}

#[test]
fn test_duplicate_titles_share_anchor() {
    let sections = build_sections(
        Path::new("a.md"),
        vec![
            Heading {
                level: 2,
                title: "Usage".to_string(),
                line: 1,
            },
            Heading {
                level: 2,
                title: "Usage".to_string(),
                line: 5,
            },
        ],
    );
    assert_eq!(sections[0].anchor, sections[1].anchor);
}

#[test]
fn test_nesting_under_nearest_shallower_heading() {
    let sections = build_sections(Path::new("a.md"), headings(&[1, 2, 3, 2]));

    assert_eq!(sections.len(), 1);
    let root = &sections[0];
    assert_eq!(root.level, 1);
    assert_eq!(shape(&root.children), [
        ("H1".to_string(), vec!["H2".to_string()]),
        ("H3".to_string(), vec![]),
    ]);
}

#[test]
fn test_shallower_heading_closes_several_levels() {
    let sections = build_sections(Path::new("a.md"), headings(&[2, 3, 4, 2, 3]));

    assert_eq!(shape(&sections), [
        ("H0".to_string(), vec!["H1".to_string()]),
        ("H3".to_string(), vec!["H4".to_string()]),
    ]);
    assert_eq!(sections[0].children[0].children[0].title, "H2");
}

#[test]
fn test_skipped_levels_still_nest() {
    let sections = build_sections(Path::new("a.md"), headings(&[2, 4, 3]));
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].children.len(), 2);
}

#[test]
fn test_sections_remember_filename() {
    let sections = build_sections(Path::new("docs/a.md"), headings(&[2, 3]));
    assert_eq!(sections[0].filename, Path::new("docs/a.md"));
    assert_eq!(sections[0].children[0].filename, Path::new("docs/a.md"));
}

#[test]
fn test_visit_stops_below_max_level() {
    let sections = build_sections(Path::new("a.md"), headings(&[2, 3, 4, 2]));
    let mut visited = Vec::new();
    for section in &sections {
        section.visit(3, &mut visited);
    }
    let titles: Vec<&str> = visited.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["H0", "H1", "H3"]);
}
