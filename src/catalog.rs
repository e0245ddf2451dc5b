//! Courses, levels, and the static fallback catalog.
//!
//! DESIGN
//! ======
//! Course data is read-only input. It normally comes from the backend; when
//! that fails the view falls back to the static catalog below, which carries
//! three levels per course with generated introductory content.
//!
//! Level numbers within a course must be contiguous from 1 with no
//! duplicates. Progress gating depends on it, so `validate_levels` is run
//! on every list before it is handed to a gate.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// One titled block of level content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelContent {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLevel {
    pub id: String,
    pub course_id: String,
    pub level_number: u32,
    pub title: String,
    pub description: String,
    pub content: LevelContent,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("level {level_id} belongs to course {found}, expected {expected}")]
    ForeignLevel { level_id: String, expected: String, found: String },
    #[error("level numbers are not contiguous: expected {expected}, found {found}")]
    NonContiguous { expected: u32, found: u32 },
}

/// Sort levels by number and check they run 1..=N within one course.
///
/// # Errors
///
/// Returns an error for a level of another course, a gap, a duplicate, or a
/// list that does not start at 1.
pub fn validate_levels(course_id: &str, levels: &mut [CourseLevel]) -> Result<(), CatalogError> {
    levels.sort_by_key(|level| level.level_number);
    for (expected, level) in (1u32..).zip(levels.iter()) {
        if level.course_id != course_id {
            return Err(CatalogError::ForeignLevel {
                level_id: level.id.clone(),
                expected: course_id.to_owned(),
                found: level.course_id.clone(),
            });
        }
        if level.level_number != expected {
            return Err(CatalogError::NonContiguous { expected, found: level.level_number });
        }
    }
    Ok(())
}

// =============================================================================
// STATIC CATALOG
// =============================================================================

struct StaticCourse {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    image: &'static str,
    category: &'static str,
    levels: [(&'static str, &'static str); 3],
}

const STATIC_COURSES: &[StaticCourse] = &[
    StaticCourse {
        id: "cs",
        title: "Computer Science",
        description: "Learn the fundamentals of computer science and algorithms.",
        image: "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?w=800&auto=format&fit=crop",
        category: "technology",
        levels: [
            ("Introduction to CS", "Basic computer science concepts"),
            ("Data Structures", "Arrays, lists, trees, and graphs"),
            ("Algorithms", "Sorting, searching, and optimization algorithms"),
        ],
    },
    StaticCourse {
        id: "math",
        title: "Mathematics",
        description: "Explore mathematical concepts and problem-solving techniques.",
        image: "https://images.unsplash.com/photo-1509228468518-180dd4864904?w=800&auto=format&fit=crop",
        category: "academics",
        levels: [
            ("Basic Arithmetic", "Addition, subtraction, multiplication, and division"),
            ("Algebra", "Equations, variables, and functions"),
            ("Calculus", "Limits, derivatives, and integrals"),
        ],
    },
    StaticCourse {
        id: "physics",
        title: "Physics",
        description: "Discover the laws of physics and understand the universe.",
        image: "https://images.unsplash.com/photo-1636466497217-26a8cbeaf0aa?w=800&auto=format&fit=crop",
        category: "academics",
        levels: [
            ("Motion and Forces", "Newton's laws and mechanics"),
            ("Energy", "Kinetic and potential energy concepts"),
            ("Electricity", "Electrical circuits and magnetism"),
        ],
    },
    StaticCourse {
        id: "chemistry",
        title: "Chemistry",
        description: "Understand the structure and properties of matter.",
        image: "https://images.unsplash.com/photo-1603126857599-f6e157fa2fe6?w=800&auto=format&fit=crop",
        category: "academics",
        levels: [
            ("Atoms and Molecules", "Basic structure of matter"),
            ("Chemical Reactions", "Balancing equations and reaction types"),
            ("Organic Chemistry", "Carbon compounds and their properties"),
        ],
    },
    StaticCourse {
        id: "coding",
        title: "Coding Fundamentals",
        description: "Start your coding journey with the basics of programming.",
        image: "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=800&auto=format&fit=crop",
        category: "technology",
        levels: [
            ("Intro to Programming", "Basic concepts and syntax"),
            ("Data Types and Functions", "Working with variables and functions"),
            ("Program Structure", "Building complete applications"),
        ],
    },
    StaticCourse {
        id: "browsing",
        title: "Web Browsing Basics",
        description: "Learn how to navigate the web effectively and safely.",
        image: "https://images.unsplash.com/photo-1481487196290-c152efe083f5?w=800&auto=format&fit=crop",
        category: "digital-skills",
        levels: [
            ("Internet Basics", "Understanding how the web works"),
            ("Browser Navigation", "Using browsers effectively"),
            ("Online Safety", "Privacy and security online"),
        ],
    },
    StaticCourse {
        id: "gk",
        title: "General Knowledge",
        description: "Expand your awareness with various interesting topics.",
        image: "https://images.unsplash.com/photo-1457369804613-52c61a468e7d?w=800&auto=format&fit=crop",
        category: "general",
        levels: [
            ("World History", "Key events and civilizations"),
            ("Geography", "Countries, capitals, and natural features"),
            ("Current Affairs", "Recent events and developments"),
        ],
    },
];

impl StaticCourse {
    fn course(&self) -> Course {
        Course {
            id: self.id.to_owned(),
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            image_url: Some(self.image.to_owned()),
            category: Some(self.category.to_owned()),
        }
    }

    fn levels(&self) -> Vec<CourseLevel> {
        (1u32..)
            .zip(self.levels.iter())
            .map(|(number, (title, description))| CourseLevel {
                id: format!("{}-{number}", self.id),
                course_id: self.id.to_owned(),
                level_number: number,
                title: (*title).to_owned(),
                description: (*description).to_owned(),
                content: LevelContent {
                    sections: vec![
                        Section {
                            title: "Introduction".to_owned(),
                            body: format!("Welcome to {title}. {description}."),
                        },
                        Section {
                            title: "Learning Objectives".to_owned(),
                            body: "In this level, you'll learn the fundamental concepts and build a strong foundation."
                                .to_owned(),
                        },
                    ],
                },
            })
            .collect()
    }
}

/// Every course in the static catalog.
#[must_use]
pub fn static_courses() -> Vec<Course> {
    STATIC_COURSES.iter().map(StaticCourse::course).collect()
}

/// The static course and its levels, if the catalog has it.
#[must_use]
pub fn static_course(course_id: &str) -> Option<(Course, Vec<CourseLevel>)> {
    STATIC_COURSES
        .iter()
        .find(|course| course.id == course_id)
        .map(|course| (course.course(), course.levels()))
}

// =============================================================================
// BROWSING
// =============================================================================

/// Category filter value that matches every course.
pub const ALL_CATEGORIES: &str = "all";

/// Case-insensitive search over title and description, combined with a
/// category filter.
#[must_use]
pub fn filter_courses<'a>(courses: &'a [Course], term: &str, category: &str) -> Vec<&'a Course> {
    let term = term.to_lowercase();
    courses
        .iter()
        .filter(|course| {
            course.title.to_lowercase().contains(&term) || course.description.to_lowercase().contains(&term)
        })
        .filter(|course| category == ALL_CATEGORIES || course.category.as_deref() == Some(category))
        .collect()
}

#[must_use]
pub fn search_announcement(term: &str, results: usize) -> String {
    format!("Searching for {term}. {results} results found.")
}

#[must_use]
pub fn category_announcement(category: &str, results: usize) -> String {
    format!("Showing {category} courses. {results} courses found.")
}

/// Narration for a course card gaining focus or hover.
#[must_use]
pub fn focus_announcement(course: &Course) -> String {
    format!("{}: {}", course.title, course.description)
}
