// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Database schema definitions for the course catalog.
//!
//! Five relations: courses and colleges as parents, career_prospects and
//! college_features as owned children, and course_colleges as the junction.
//! Every child row is removed together with its parent.

/// Catalog schema SQL
pub const SCHEMA_SQL: &str = r#"
create table if not exists colleges (
    id        integer primary key autoincrement not null,
    name      text unique not null,
    location  text not null,
    ranking   text,
    createdAt integer not null default (strftime('%s', 'now')),
    updatedAt integer not null default (strftime('%s', 'now'))
);

create table if not exists college_features (
    id        integer primary key autoincrement not null,
    collegeId integer not null,
    feature   text not null,
    unique (collegeId, feature),
    foreign key (collegeId) references colleges(id) on delete cascade
);

create index if not exists IndexCollegeFeatures on college_features(collegeId);

create table if not exists courses (
    id          text primary key not null,
    name        text not null,
    level       text not null,
    field       text not null,
    duration    text not null,
    description text,
    createdAt   integer not null default (strftime('%s', 'now')),
    updatedAt   integer not null default (strftime('%s', 'now'))
);

create table if not exists career_prospects (
    id         integer primary key autoincrement not null,
    courseId   text not null,
    careerName text not null,
    unique (courseId, careerName),
    foreign key (courseId) references courses(id) on delete cascade
);

create index if not exists IndexCareerProspects on career_prospects(courseId);

create table if not exists course_colleges (
    courseId  text not null,
    collegeId integer not null,
    linkedAt  integer not null default (strftime('%s', 'now')),
    primary key (courseId, collegeId),
    foreign key (courseId) references courses(id) on delete cascade,
    foreign key (collegeId) references colleges(id) on delete cascade
);

create index if not exists IndexCourseCollegesCollege on course_colleges(collegeId);
"#;

/// Schema version, stored in `PRAGMA user_version`
pub const SCHEMA_VERSION: i32 = 1;
