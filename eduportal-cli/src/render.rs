// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Plain-text rendering of catalog entities.

use std::fmt::Write;

use eduportal_catalog::{CareerSummary, CollegeSummary, Course};

pub fn course_line(course: &Course) -> String {
    format!(
        "{:<16} {} ({}, {}, {})",
        course.id, course.name, course.level, course.field, course.duration
    )
}

pub fn course_detail(course: &Course) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", course.name, course.id);
    let _ = writeln!(
        out,
        "  {} programme in {}, {}",
        course.level, course.field, course.duration
    );
    if !course.description.is_empty() {
        let _ = writeln!(out, "  {}", course.description);
    }
    if !course.career_prospects.is_empty() {
        let _ = writeln!(out, "Careers:");
        for career in &course.career_prospects {
            let _ = writeln!(out, "  - {career}");
        }
    }
    if !course.top_colleges.is_empty() {
        let _ = writeln!(out, "Top colleges:");
        for college in &course.top_colleges {
            let _ = writeln!(
                out,
                "  - {}, {} ({})",
                college.name, college.location, college.ranking
            );
            for feature in &college.features {
                let _ = writeln!(out, "      * {feature}");
            }
        }
    }
    out
}

pub fn college_line(summary: &CollegeSummary) -> String {
    format!(
        "{} | {} | {} | {}",
        summary.college.name,
        summary.college.location,
        summary.college.ranking,
        summary.course_ids.join(", ")
    )
}

pub fn career_line(summary: &CareerSummary) -> String {
    format!("{}: {}", summary.name, summary.course_ids.join(", "))
}
