// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Built-in course dataset.
//!
//! Seeds the relational store and backs the static catalog.

use eduportal_catalog_db::{College, Course, CourseLevel, Field};

fn college(name: &str, location: &str, ranking: &str, features: &[&str]) -> College {
    College {
        name: name.to_string(),
        location: location.to_string(),
        ranking: ranking.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn iit_bombay() -> College {
    college(
        "IIT Bombay",
        "Mumbai, Maharashtra",
        "#3 in NIRF Engineering",
        &["World-class research labs", "Strong alumni network", "Startup incubator"],
    )
}

fn iit_delhi() -> College {
    college(
        "IIT Delhi",
        "New Delhi, Delhi",
        "#2 in NIRF Engineering",
        &["Industry partnerships", "Excellent placements", "Research park"],
    )
}

fn bits_pilani() -> College {
    college(
        "BITS Pilani",
        "Pilani, Rajasthan",
        "#20 in NIRF Engineering",
        &["Practice School internships", "No reservation policy", "Flexible curriculum"],
    )
}

fn aiims_delhi() -> College {
    college(
        "AIIMS Delhi",
        "New Delhi, Delhi",
        "#1 in NIRF Medical",
        &["Premier teaching hospital", "Subsidised fees", "Advanced research facilities"],
    )
}

fn cmc_vellore() -> College {
    college(
        "Christian Medical College",
        "Vellore, Tamil Nadu",
        "#3 in NIRF Medical",
        &["Community health focus", "Large patient exposure"],
    )
}

fn iim_ahmedabad() -> College {
    college(
        "IIM Ahmedabad",
        "Ahmedabad, Gujarat",
        "#1 in NIRF Management",
        &["Case-based pedagogy", "Top recruiters", "Global exchange programmes"],
    )
}

fn srcc() -> College {
    college(
        "Shri Ram College of Commerce",
        "New Delhi, Delhi",
        "#1 in Commerce",
        &["Strong finance societies", "Central Delhi campus"],
    )
}

fn st_stephens() -> College {
    college(
        "St. Stephen's College",
        "New Delhi, Delhi",
        "#2 in NIRF Colleges",
        &["Residential college", "Historic campus", "Active debating society"],
    )
}

fn iisc() -> College {
    college(
        "Indian Institute of Science",
        "Bengaluru, Karnataka",
        "#1 in NIRF Research",
        &["Research-first culture", "Interdisciplinary centres", "Generous fellowships"],
    )
}

fn nid() -> College {
    college(
        "National Institute of Design",
        "Ahmedabad, Gujarat",
        "#1 in Design",
        &["Studio-based learning", "Industry projects"],
    )
}

/// The built-in course dataset.
pub fn courses() -> Vec<Course> {
    vec![
        Course {
            id: "btech-cse".to_string(),
            name: "B.Tech in Computer Science".to_string(),
            level: CourseLevel::Undergraduate,
            field: Field::Engineering,
            duration: "4 years".to_string(),
            description: "Algorithms, systems, software engineering and the mathematics \
                          behind modern computing."
                .to_string(),
            career_prospects: strings(&[
                "Software Engineer",
                "Data Scientist",
                "Systems Architect",
                "Product Manager",
            ]),
            top_colleges: vec![iit_bombay(), iit_delhi(), bits_pilani()],
        },
        Course {
            id: "btech-mech".to_string(),
            name: "B.Tech in Mechanical Engineering".to_string(),
            level: CourseLevel::Undergraduate,
            field: Field::Engineering,
            duration: "4 years".to_string(),
            description: "Design, manufacturing, thermodynamics and the mechanics of solids \
                          and fluids."
                .to_string(),
            career_prospects: strings(&[
                "Mechanical Engineer",
                "Automotive Designer",
                "Manufacturing Manager",
            ]),
            top_colleges: vec![iit_delhi(), bits_pilani()],
        },
        Course {
            id: "mtech-ai".to_string(),
            name: "M.Tech in Artificial Intelligence".to_string(),
            level: CourseLevel::Postgraduate,
            field: Field::Engineering,
            duration: "2 years".to_string(),
            description: "Machine learning, deep learning and their application to vision \
                          and language."
                .to_string(),
            career_prospects: strings(&["Machine Learning Engineer", "Research Scientist", "Data Scientist"]),
            top_colleges: vec![iisc(), iit_bombay()],
        },
        Course {
            id: "mbbs".to_string(),
            name: "Bachelor of Medicine, Bachelor of Surgery".to_string(),
            level: CourseLevel::Undergraduate,
            field: Field::Medicine,
            duration: "5.5 years".to_string(),
            description: "Pre-clinical, para-clinical and clinical training followed by a \
                          one-year internship."
                .to_string(),
            career_prospects: strings(&["Doctor", "Surgeon", "Medical Researcher"]),
            top_colleges: vec![aiims_delhi(), cmc_vellore()],
        },
        Course {
            id: "md-medicine".to_string(),
            name: "Doctor of Medicine (General Medicine)".to_string(),
            level: CourseLevel::Postgraduate,
            field: Field::Medicine,
            duration: "3 years".to_string(),
            description: "Specialist training in the diagnosis and non-surgical treatment of \
                          adult disease."
                .to_string(),
            career_prospects: strings(&["Physician", "Consultant", "Medical Educator"]),
            top_colleges: vec![aiims_delhi()],
        },
        Course {
            id: "mba".to_string(),
            name: "Master of Business Administration".to_string(),
            level: CourseLevel::Postgraduate,
            field: Field::Business,
            duration: "2 years".to_string(),
            description: "Strategy, finance, marketing and operations taught through cases \
                          and live projects."
                .to_string(),
            career_prospects: strings(&[
                "Management Consultant",
                "Investment Banker",
                "Product Manager",
                "Entrepreneur",
            ]),
            top_colleges: vec![iim_ahmedabad()],
        },
        Course {
            id: "bcom-hons".to_string(),
            name: "B.Com (Honours)".to_string(),
            level: CourseLevel::Undergraduate,
            field: Field::Business,
            duration: "3 years".to_string(),
            description: "Accounting, economics, taxation and business law.".to_string(),
            career_prospects: strings(&["Chartered Accountant", "Financial Analyst", "Tax Consultant"]),
            top_colleges: vec![srcc()],
        },
        Course {
            id: "ba-english".to_string(),
            name: "BA (Honours) in English".to_string(),
            level: CourseLevel::Undergraduate,
            field: Field::Arts,
            duration: "3 years".to_string(),
            description: "Literature from Chaucer to the contemporary novel, with critical \
                          theory and writing."
                .to_string(),
            career_prospects: strings(&["Writer", "Journalist", "Editor", "Teacher"]),
            top_colleges: vec![st_stephens()],
        },
        Course {
            id: "diploma-design".to_string(),
            name: "Graduate Diploma in Design".to_string(),
            level: CourseLevel::Diploma,
            field: Field::Arts,
            duration: "2.5 years".to_string(),
            description: "Communication, product and interaction design through studio work."
                .to_string(),
            career_prospects: strings(&["Graphic Designer", "UX Designer", "Product Designer"]),
            top_colleges: vec![nid()],
        },
        Course {
            id: "bsc-physics".to_string(),
            name: "B.Sc in Physics".to_string(),
            level: CourseLevel::Undergraduate,
            field: Field::Science,
            duration: "3 years".to_string(),
            description: "Classical and quantum mechanics, electromagnetism and laboratory \
                          physics."
                .to_string(),
            career_prospects: strings(&["Physicist", "Research Scientist", "Teacher"]),
            top_colleges: vec![st_stephens(), iisc()],
        },
        Course {
            id: "phd-biology".to_string(),
            name: "PhD in Biological Sciences".to_string(),
            level: CourseLevel::Doctorate,
            field: Field::Science,
            duration: "5 years".to_string(),
            description: "Independent research in molecular, cellular and ecological biology."
                .to_string(),
            career_prospects: strings(&["Research Scientist", "Professor", "Biotech Consultant"]),
            top_colleges: vec![iisc()],
        },
    ]
}
