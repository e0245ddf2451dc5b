use super::*;
use crate::test_helpers::level;

#[test]
fn static_catalog_has_seven_courses() {
    let ids: Vec<_> = static_courses().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["cs", "math", "physics", "chemistry", "coding", "browsing", "gk"]);
}

#[test]
fn static_course_levels_are_contiguous() {
    for course in static_courses() {
        let (loaded, mut levels) = static_course(&course.id).unwrap();
        assert_eq!(loaded, course);
        assert_eq!(levels.len(), 3);
        assert_eq!(validate_levels(&course.id, &mut levels), Ok(()));
        assert_eq!(levels[0].id, format!("{}-1", course.id));
    }
}

#[test]
fn static_level_content() {
    let (_, levels) = static_course("math").unwrap();
    let sections = &levels[1].content.sections;
    assert_eq!(sections[0].title, "Introduction");
    assert_eq!(sections[0].body, "Welcome to Algebra. Equations, variables, and functions.");
    assert_eq!(sections[1].title, "Learning Objectives");
}

#[test]
fn unknown_static_course() {
    assert!(static_course("astronomy").is_none());
}

#[test]
fn validate_sorts_levels() {
    let mut levels = vec![level("c", 3), level("c", 1), level("c", 2)];
    validate_levels("c", &mut levels).unwrap();
    let numbers: Vec<_> = levels.iter().map(|l| l.level_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn validate_rejects_gaps_and_duplicates() {
    let mut gap = vec![level("c", 1), level("c", 3)];
    assert_eq!(validate_levels("c", &mut gap), Err(CatalogError::NonContiguous { expected: 2, found: 3 }));

    let mut duplicate = vec![level("c", 1), level("c", 1)];
    assert_eq!(validate_levels("c", &mut duplicate), Err(CatalogError::NonContiguous { expected: 2, found: 1 }));

    let mut late_start = vec![level("c", 2)];
    assert_eq!(validate_levels("c", &mut late_start), Err(CatalogError::NonContiguous { expected: 1, found: 2 }));
}

#[test]
fn validate_rejects_foreign_levels() {
    let mut levels = vec![level("c", 1), level("other", 2)];
    assert!(matches!(validate_levels("c", &mut levels), Err(CatalogError::ForeignLevel { .. })));
}

#[test]
fn validate_accepts_empty() {
    assert_eq!(validate_levels("c", &mut []), Ok(()));
}

#[test]
fn section_body_serializes_as_content() {
    let section = Section { title: "Intro".into(), body: "Hello".into() };
    assert_eq!(serde_json::to_value(&section).unwrap(), serde_json::json!({ "title": "Intro", "content": "Hello" }));
}

#[test]
fn filter_by_term_is_case_insensitive() {
    let courses = static_courses();
    let found: Vec<_> = filter_courses(&courses, "PHYSICS", ALL_CATEGORIES).into_iter().map(|c| c.id.as_str()).collect();
    assert_eq!(found, vec!["physics"]);
}

#[test]
fn filter_matches_description_and_category() {
    let courses = static_courses();
    let found: Vec<_> = filter_courses(&courses, "", "technology").into_iter().map(|c| c.id.as_str()).collect();
    assert_eq!(found, vec!["cs", "coding"]);

    let found = filter_courses(&courses, "matter", "academics");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "chemistry");

    assert_eq!(filter_courses(&courses, "", ALL_CATEGORIES).len(), 7);
    assert!(filter_courses(&courses, "matter", "technology").is_empty());
}

#[test]
fn announcements() {
    assert_eq!(search_announcement("math", 1), "Searching for math. 1 results found.");
    assert_eq!(category_announcement("academics", 3), "Showing academics courses. 3 courses found.");
    let (course, _) = static_course("cs").unwrap();
    assert_eq!(focus_announcement(&course), format!("{}: {}", course.title, course.description));
}
