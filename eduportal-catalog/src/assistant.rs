// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Keyword-matched answers about courses, colleges and careers.

use tracing::error;

use crate::catalog::{Catalog, CourseFilter};
use crate::error::Result;

const GREETING: &str =
    "Hello! I'm your education assistant. How can I help you find the right course or college?";
const CAPABILITIES: &str = "I can help you find courses, colleges, and career paths. You can ask me about specific fields like engineering or medicine, or about undergraduate or postgraduate programs.";
const NO_COURSES: &str = "I couldn't find any courses matching your criteria. Try adjusting your filters or ask me about a specific field.";
const NO_COLLEGES: &str = "I don't have information about specific colleges at the moment. Can you tell me more about what you're looking for?";
const NO_CAREERS: &str = "I don't have specific career information at the moment. Can you tell me more about your interests?";
const GUIDANCE: &str = "I'm here to help you navigate educational options. You can ask me about courses, colleges, or career paths. Try using filters to narrow down your search.";
const APOLOGY: &str =
    "I'm sorry, I encountered an error while processing your message. Please try again.";

/// Chooses one of `len` candidates.
pub trait Picker {
    /// Index below `len`; only called with `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice from the operating system's random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl Picker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        getrandom::u64()
            .map(|n| (n % len as u64) as usize)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Greeting,
    Help,
    Courses,
    Colleges,
    Careers,
    Other,
}

fn contains_any(message: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| message.contains(n))
}

fn classify(message: &str) -> Topic {
    if contains_any(message, &["hello", "hi", "hey"]) {
        Topic::Greeting
    } else if contains_any(message, &["help", "what can you do"]) {
        Topic::Help
    } else if contains_any(message, &["course", "program", "degree"]) {
        Topic::Courses
    } else if contains_any(message, &["college", "university", "institution"]) {
        Topic::Colleges
    } else if contains_any(message, &["career", "job", "profession"]) {
        Topic::Careers
    } else {
        Topic::Other
    }
}

/// Rule-based responder over a [`Catalog`].
pub struct Assistant<P = RandomPicker> {
    catalog: Catalog,
    picker: P,
}

impl Assistant<RandomPicker> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_picker(catalog, RandomPicker)
    }
}

impl<P: Picker> Assistant<P> {
    pub fn with_picker(catalog: Catalog, picker: P) -> Self {
        Self { catalog, picker }
    }

    /// Answer `message`. Store failures turn into an apology.
    pub async fn reply(&self, message: &str, filter: &CourseFilter) -> String {
        let message = message.to_lowercase();
        match self.answer(classify(&message), filter).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Failed to answer message: {e}");
                APOLOGY.to_string()
            }
        }
    }

    async fn answer(&self, topic: Topic, filter: &CourseFilter) -> Result<String> {
        let answer = match topic {
            Topic::Greeting => GREETING.to_string(),
            Topic::Help => CAPABILITIES.to_string(),
            Topic::Courses => {
                let courses = self.catalog.find_courses(filter).await?;
                match self.choose(&courses) {
                    Some(course) => format!(
                        "You might be interested in {} which is a {} program in {}. It takes {} to complete. Would you like more information about this course?",
                        course.name, course.level, course.field, course.duration
                    ),
                    None => NO_COURSES.to_string(),
                }
            }
            Topic::Colleges => {
                let courses = self.catalog.get_all_courses().await?;
                let colleges: Vec<_> = courses.iter().flat_map(|c| &c.top_colleges).collect();
                match self.choose(&colleges) {
                    Some(college) => format!(
                        "{} is a great institution located in {}. It's ranked {} and offers various programs. Would you like to know which courses they offer?",
                        college.name, college.location, college.ranking
                    ),
                    None => NO_COLLEGES.to_string(),
                }
            }
            Topic::Careers => {
                let courses = self.catalog.get_all_courses().await?;
                let careers: Vec<_> = courses.iter().flat_map(|c| &c.career_prospects).collect();
                match self.choose(&careers) {
                    Some(career) => format!(
                        "A career as a {career} can be very rewarding. Would you like to know which courses can lead to this profession?"
                    ),
                    None => NO_CAREERS.to_string(),
                }
            }
            Topic::Other => GUIDANCE.to_string(),
        };
        Ok(answer)
    }

    fn choose<'a, T>(&self, candidates: &'a [T]) -> Option<&'a T> {
        if candidates.is_empty() {
            return None;
        }
        candidates.get(self.picker.pick(candidates.len()))
    }
}

#[cfg(test)]
mod tests {
    use eduportal_catalog_db::{CourseLevel, Field};
    use rstest::rstest;

    use super::*;
    use crate::database::DatabaseCatalog;
    use crate::fallback::StaticCatalog;
    use crate::pool::{ConnectionPool, PoolConfig};

    struct First;

    impl Picker for First {
        fn pick(&self, _len: usize) -> usize {
            0
        }
    }

    fn assistant() -> Assistant<First> {
        Assistant::with_picker(Catalog::Static(StaticCatalog::default()), First)
    }

    #[rstest]
    #[case("Hello there", Topic::Greeting)]
    #[case("hi, can you help?", Topic::Greeting)]
    #[case("is this course good", Topic::Greeting)]
    #[case("which", Topic::Greeting)]
    #[case("tell me more", Topic::Other)]
    #[case("What can you do", Topic::Help)]
    #[case("any good degree options", Topic::Courses)]
    #[case("top university", Topic::Colleges)]
    #[case("a job in finance", Topic::Careers)]
    #[case("a course at a college", Topic::Courses)]
    fn test_classify(#[case] message: &str, #[case] topic: Topic) {
        assert_eq!(classify(&message.to_lowercase()), topic);
    }

    #[tokio::test]
    async fn test_course_answer_respects_filter() {
        let filter = CourseFilter {
            level: CourseLevel::All,
            field: Field::Medicine,
        };
        let answer = assistant().reply("Suggest a course", &filter).await;
        assert_eq!(
            answer,
            "You might be interested in Bachelor of Medicine, Bachelor of Surgery which is a undergraduate program in medicine. It takes 5.5 years to complete. Would you like more information about this course?"
        );
    }

    #[tokio::test]
    async fn test_no_matching_course() {
        let filter = CourseFilter {
            level: CourseLevel::Doctorate,
            field: Field::Business,
        };
        let answer = assistant().reply("any programs?", &filter).await;
        assert_eq!(answer, NO_COURSES);
    }

    #[tokio::test]
    async fn test_college_and_career_answers() {
        let filter = CourseFilter::default();
        let college = assistant().reply("Best college?", &filter).await;
        assert!(college.starts_with("IIT Bombay is a great institution located in Mumbai"));
        assert!(college.contains("#3 in NIRF Engineering"));

        let career = assistant().reply("What job can I get", &filter).await;
        assert!(career.starts_with("A career as a Software Engineer"));
    }

    #[tokio::test]
    async fn test_canned_answers() {
        let filter = CourseFilter::default();
        assert_eq!(assistant().reply("HEY", &filter).await, GREETING);
        assert_eq!(assistant().reply("I need help", &filter).await, CAPABILITIES);
        assert_eq!(assistant().reply("tell me more", &filter).await, GUIDANCE);
    }

    #[tokio::test]
    async fn test_store_failure_apologizes() {
        let dir = tempfile::tempdir().unwrap();
        // No schema, so every query fails
        let pool = ConnectionPool::new(
            dir.path().join("empty.sqlite"),
            PoolConfig {
                max_size: 1,
                ..Default::default()
            },
        );
        let assistant =
            Assistant::with_picker(Catalog::Database(DatabaseCatalog::new(pool)), First);

        let filter = CourseFilter::default();
        assert_eq!(assistant.reply("list a course", &filter).await, APOLOGY);
        assert_eq!(assistant.reply("careers?", &filter).await, APOLOGY);
        assert_eq!(assistant.reply("hello", &filter).await, GREETING);
    }

    #[test]
    fn test_random_picker_in_range() {
        for len in 1..20 {
            assert!(RandomPicker.pick(len) < len);
        }
    }
}
