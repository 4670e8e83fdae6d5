// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Smoke tests for eduportal-catalog-db.
//!
//! These tests verify the schema and the read/write operations using an
//! in-memory database.

use eduportal_catalog_db::{CatalogDb, College, Course, CourseLevel, Field, SeedReport};

fn college(name: &str, location: &str, features: &[&str]) -> College {
    College {
        name: name.to_string(),
        location: location.to_string(),
        ranking: "#1".to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

fn course(id: &str, careers: &[&str], colleges: Vec<College>) -> Course {
    Course {
        id: id.to_string(),
        name: format!("Course {id}"),
        level: CourseLevel::Undergraduate,
        field: Field::Engineering,
        duration: "4 years".to_string(),
        description: format!("About {id}"),
        career_prospects: careers.iter().map(|c| c.to_string()).collect(),
        top_colleges: colleges,
    }
}

/// Verify schema creation and empty queries work.
#[test]
fn test_schema_creation() {
    let db = CatalogDb::open_memory().unwrap();
    assert!(db.has_schema().unwrap());
    assert_eq!(db.count_courses().unwrap(), 0);
    assert!(db.query_all_courses().unwrap().is_empty());
}

/// Verify a saved course reads back fully hydrated.
#[test]
fn test_course_roundtrip() {
    let mut db = CatalogDb::open_memory().unwrap();
    let c = course(
        "btech-cse",
        &["Software Engineer", "Data Scientist"],
        vec![
            college("IIT Bombay", "Mumbai", &["Research labs", "Hostel"]),
            college("IIT Delhi", "New Delhi", &["Incubator"]),
        ],
    );

    db.save_course(&c).unwrap();

    let read = db.query_course("btech-cse").unwrap().unwrap();
    assert_eq!(read, c);
    assert!(db.has_course("btech-cse").unwrap());
}

/// Absence is a value, not an error.
#[test]
fn test_missing_course() {
    let db = CatalogDb::open_memory().unwrap();
    assert_eq!(db.query_course("nonexistent-id").unwrap(), None);
    assert!(!db.has_course("nonexistent-id").unwrap());
}

/// Saving again replaces the career list wholesale.
#[test]
fn test_save_replaces_careers() {
    let mut db = CatalogDb::open_memory().unwrap();
    db.save_course(&course("mba", &["Manager", "Consultant"], vec![]))
        .unwrap();

    let mut updated = course("mba", &["Analyst"], vec![]);
    updated.name = "Master of Business Administration".to_string();
    updated.level = CourseLevel::Postgraduate;
    updated.field = Field::Business;
    db.save_course(&updated).unwrap();

    let read = db.query_course("mba").unwrap().unwrap();
    assert_eq!(read.name, "Master of Business Administration");
    assert_eq!(read.level, CourseLevel::Postgraduate);
    assert_eq!(read.field, Field::Business);
    assert_eq!(read.career_prospects, vec!["Analyst"]);
    assert_eq!(db.count_courses().unwrap(), 1);
}

/// Duplicate careers and features are ignored on write.
#[test]
fn test_duplicates_ignored() {
    let mut db = CatalogDb::open_memory().unwrap();
    db.save_course(&course(
        "bsc",
        &["Chemist", "Chemist", "Physicist"],
        vec![college("Miranda House", "Delhi", &["Library", "Library"])],
    ))
    .unwrap();

    let read = db.query_course("bsc").unwrap().unwrap();
    assert_eq!(read.career_prospects, vec!["Chemist", "Physicist"]);
    assert_eq!(read.top_colleges[0].features, vec!["Library"]);
}

/// Two courses naming the same college share one college record.
#[test]
fn test_college_deduplication() {
    let mut db = CatalogDb::open_memory().unwrap();
    db.save_course(&course(
        "btech-ee",
        &[],
        vec![college("IIT Madras", "Chennai", &["Old feature"])],
    ))
    .unwrap();
    db.save_course(&course(
        "btech-me",
        &[],
        vec![college("IIT Madras", "Chennai, Tamil Nadu", &["New feature"])],
    ))
    .unwrap();

    assert_eq!(db.count_colleges().unwrap(), 1);

    let stored = db.query_college("IIT Madras").unwrap().unwrap();
    assert_eq!(stored.location, "Chennai, Tamil Nadu");
    assert_eq!(stored.features, vec!["New feature"]);

    // Both courses see the updated record
    for id in ["btech-ee", "btech-me"] {
        let read = db.query_course(id).unwrap().unwrap();
        assert_eq!(read.top_colleges.len(), 1);
        assert_eq!(read.top_colleges[0], stored);
    }
}

/// Links to colleges no longer listed survive a save.
#[test]
fn test_save_keeps_existing_links() {
    let mut db = CatalogDb::open_memory().unwrap();
    db.save_course(&course("ba", &[], vec![college("LSR", "Delhi", &[])]))
        .unwrap();
    db.save_course(&course("ba", &[], vec![college("Hindu College", "Delhi", &[])]))
        .unwrap();

    let names: Vec<_> = db
        .query_course("ba")
        .unwrap()
        .unwrap()
        .top_colleges
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["LSR", "Hindu College"]);
}

/// A failure while writing college features leaves prior state intact.
#[test]
fn test_save_is_atomic() {
    let mut db = CatalogDb::open_memory().unwrap();
    let original = course(
        "mbbs",
        &["Doctor"],
        vec![college("AIIMS", "New Delhi", &["Hospital"])],
    );
    db.save_course(&original).unwrap();

    db.connection()
        .execute_batch(
            r#"
            CREATE TRIGGER RejectFeature BEFORE INSERT ON college_features
            WHEN NEW.feature = 'reject-me'
            BEGIN
                SELECT RAISE(ABORT, 'forced failure');
            END;
            "#,
        )
        .unwrap();

    let mut broken = course(
        "mbbs",
        &["Surgeon"],
        vec![
            college("AIIMS", "Delhi", &["Trauma centre"]),
            college("CMC Vellore", "Vellore", &["Hospital", "reject-me"]),
        ],
    );
    broken.name = "Changed".to_string();
    assert!(db.save_course(&broken).is_err());

    assert_eq!(db.query_course("mbbs").unwrap().unwrap(), original);
    assert_eq!(db.query_college("CMC Vellore").unwrap(), None);
    assert_eq!(db.count_colleges().unwrap(), 1);
}

/// Seeding is idempotent and shares colleges across courses.
#[test]
fn test_seed_idempotent() {
    let mut db = CatalogDb::open_memory().unwrap();
    let shared = college("BITS Pilani", "Pilani", &["Practice school"]);
    let dataset = vec![
        course("btech-cse", &["Developer"], vec![shared.clone()]),
        course("btech-ece", &["Chip designer"], vec![shared]),
    ];

    let first = db.seed(&dataset).unwrap();
    assert_eq!(
        first,
        SeedReport {
            courses_inserted: 2,
            colleges_inserted: 1
        }
    );

    let second = db.seed(&dataset).unwrap();
    assert_eq!(second, SeedReport::default());

    assert_eq!(db.query_all_courses().unwrap(), dataset);
}

/// Seeding never overwrites a course that already exists.
#[test]
fn test_seed_skips_existing_course() {
    let mut db = CatalogDb::open_memory().unwrap();
    let mut edited = course("btech-cse", &["Developer"], vec![]);
    edited.name = "Edited".to_string();
    db.save_course(&edited).unwrap();

    let report = db
        .seed(&[course(
            "btech-cse",
            &["Developer", "Tester"],
            vec![college("IIT Delhi", "New Delhi", &[])],
        )])
        .unwrap();

    assert_eq!(report, SeedReport::default());
    let read = db.query_course("btech-cse").unwrap().unwrap();
    assert_eq!(read.name, "Edited");
    assert_eq!(read.career_prospects, vec!["Developer"]);
    assert!(read.top_colleges.is_empty());
    assert_eq!(db.count_colleges().unwrap(), 0);
}

/// Deleting a course cascades to its careers and links only.
#[test]
fn test_delete_cascade() {
    let mut db = CatalogDb::open_memory().unwrap();
    db.save_course(&course(
        "llb",
        &["Lawyer"],
        vec![college("NLSIU", "Bengaluru", &["Moot court"])],
    ))
    .unwrap();

    assert!(db.delete_course("llb").unwrap());
    assert!(!db.delete_course("llb").unwrap());

    let careers: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM career_prospects", [], |row| row.get(0))
        .unwrap();
    let links: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM course_colleges", [], |row| row.get(0))
        .unwrap();
    assert_eq!(careers, 0);
    assert_eq!(links, 0);
    assert!(db.query_college("NLSIU").unwrap().is_some());
}
