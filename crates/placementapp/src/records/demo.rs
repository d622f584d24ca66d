//! Demo data for every family.
//!
//! The CLI lists these when no data file is configured, and tests use them as
//! a realistic starting point.

use super::*;
use crate::review::ReviewStatus;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn applications() -> Vec<Application> {
    vec![
        Application {
            id: 1,
            student_name: "Ahmed Hassan".into(),
            job_title: "Frontend Developer Intern".into(),
            company: "Instabug".into(),
            post_id: 1,
            applied_date: date(2025, 5, 10),
            status: ApplicationStatus::Pending,
            skills: strings(&["React", "TypeScript"]),
        },
        Application {
            id: 2,
            student_name: "Mariam Adel".into(),
            job_title: "Data Analyst Intern".into(),
            company: "Vodafone".into(),
            post_id: 2,
            applied_date: date(2025, 5, 9),
            status: ApplicationStatus::Finalized,
            skills: strings(&["Python", "SQL"]),
        },
        Application {
            id: 3,
            student_name: "Omar Khaled".into(),
            job_title: "Backend Engineer Intern".into(),
            company: "Valeo".into(),
            post_id: 3,
            applied_date: date(2025, 5, 8),
            status: ApplicationStatus::Accepted,
            skills: strings(&["Rust", "PostgreSQL"]),
        },
        Application {
            id: 4,
            student_name: "Nour Ibrahim".into(),
            job_title: "Frontend Developer Intern".into(),
            company: "Instabug".into(),
            post_id: 1,
            applied_date: date(2025, 5, 7),
            status: ApplicationStatus::Rejected,
            skills: strings(&["Vue", "CSS"]),
        },
    ]
}

pub fn posts() -> Vec<InternshipPost> {
    vec![
        InternshipPost {
            id: 1,
            job_title: "Frontend Developer Intern".into(),
            company: "Instabug".into(),
            location: "Cairo".into(),
            duration: "3 months".into(),
            paid: true,
            salary: Some(6000),
            skills: strings(&["React", "TypeScript"]),
            posted_date: date(2025, 4, 20),
            applicants: 14,
            status: PostStatus::Active,
        },
        InternshipPost {
            id: 2,
            job_title: "Data Analyst Intern".into(),
            company: "Vodafone".into(),
            location: "Smart Village".into(),
            duration: "2 months".into(),
            paid: false,
            salary: None,
            skills: strings(&["Python", "SQL"]),
            posted_date: date(2025, 4, 2),
            applicants: 31,
            status: PostStatus::Closed,
        },
        InternshipPost {
            id: 3,
            job_title: "Backend Engineer Intern".into(),
            company: "Valeo".into(),
            location: "Giza".into(),
            duration: "6 months".into(),
            paid: true,
            salary: Some(8000),
            skills: strings(&["Rust", "PostgreSQL"]),
            posted_date: date(2025, 5, 1),
            applicants: 6,
            status: PostStatus::Active,
        },
    ]
}

pub fn interns() -> Vec<Intern> {
    vec![
        Intern {
            id: 1,
            student_name: "Omar Khaled".into(),
            job_title: "Backend Engineer Intern".into(),
            company: "Valeo".into(),
            start_date: date(2025, 6, 1),
            end_date: None,
            status: InternStatus::Current,
        },
        Intern {
            id: 2,
            student_name: "Salma Youssef".into(),
            job_title: "QA Intern".into(),
            company: "Instabug".into(),
            start_date: date(2024, 7, 1),
            end_date: Some(date(2024, 9, 30)),
            status: InternStatus::Completed,
        },
    ]
}

pub fn reports() -> Vec<Report> {
    vec![
        Report {
            id: 1,
            title: "Summer Internship Report".into(),
            student_name: "Salma Youssef".into(),
            company: "Instabug".into(),
            major: "Computer Science".into(),
            submitted_date: date(2024, 10, 5),
            status: ReviewStatus::Pending,
            reason: None,
        },
        Report {
            id: 2,
            title: "Embedded Systems Internship".into(),
            student_name: "Youssef Tarek".into(),
            company: "Valeo".into(),
            major: "Computer Engineering".into(),
            submitted_date: date(2024, 9, 28),
            status: ReviewStatus::Accepted,
            reason: None,
        },
        Report {
            id: 3,
            title: "Marketing Analytics Internship".into(),
            student_name: "Hana Mostafa".into(),
            company: "Vodafone".into(),
            major: "Business Informatics".into(),
            submitted_date: date(2024, 9, 20),
            status: ReviewStatus::Flagged,
            reason: Some("Missing supervisor evaluation".into()),
        },
    ]
}

pub fn companies() -> Vec<Company> {
    vec![
        Company {
            id: 1,
            name: "Instabug".into(),
            industry: "Software".into(),
            size: CompanySize::Medium,
            email: "careers@instabug.com".into(),
            applied_date: date(2025, 1, 15),
            status: CompanyStatus::Accepted,
        },
        Company {
            id: 2,
            name: "Valeo".into(),
            industry: "Automotive".into(),
            size: CompanySize::Corporate,
            email: "internships@valeo.com".into(),
            applied_date: date(2025, 2, 3),
            status: CompanyStatus::Accepted,
        },
        Company {
            id: 3,
            name: "Breadfast".into(),
            industry: "Retail".into(),
            size: CompanySize::Large,
            email: "talent@breadfast.com".into(),
            applied_date: date(2025, 3, 11),
            status: CompanyStatus::Pending,
        },
    ]
}

pub fn students() -> Vec<Student> {
    vec![
        Student {
            id: 1,
            name: "Ahmed Hassan".into(),
            email: "ahmed.hassan@student.guc.edu.eg".into(),
            major: "Computer Science".into(),
            semester: 6,
            gpa: Some(3.4),
            skills: strings(&["React", "TypeScript"]),
            status: StudentStatus::Active,
        },
        Student {
            id: 2,
            name: "Omar Khaled".into(),
            email: "omar.khaled@student.guc.edu.eg".into(),
            major: "Computer Engineering".into(),
            semester: 8,
            gpa: Some(3.1),
            skills: strings(&["Rust", "PostgreSQL"]),
            status: StudentStatus::OnInternship,
        },
        Student {
            id: 3,
            name: "Salma Youssef".into(),
            email: "salma.youssef@student.guc.edu.eg".into(),
            major: "Computer Science".into(),
            semester: 10,
            gpa: None,
            skills: strings(&["Testing"]),
            status: StudentStatus::Graduated,
        },
    ]
}

pub fn workshops() -> Vec<Workshop> {
    vec![
        Workshop {
            id: 1,
            title: "Writing a Standout CV".into(),
            speaker: "Dina Fathy".into(),
            date: date(2025, 6, 12),
            start_time: "11:00".into(),
            end_time: "12:30".into(),
            capacity: 80,
            tags: strings(&["career", "cv"]),
            status: WorkshopStatus::Upcoming,
        },
        Workshop {
            id: 2,
            title: "Technical Interviews 101".into(),
            speaker: "Karim Samir".into(),
            date: date(2025, 3, 4),
            start_time: "14:00".into(),
            end_time: "16:00".into(),
            capacity: 120,
            tags: strings(&["interviews"]),
            status: WorkshopStatus::Completed,
        },
    ]
}

pub fn cycles() -> Vec<Cycle> {
    vec![
        Cycle {
            id: 1,
            name: "Summer 2024".into(),
            start_date: date(2024, 6, 1),
            end_date: date(2024, 9, 30),
            status: CycleStatus::Closed,
        },
        Cycle {
            id: 2,
            name: "Summer 2025".into(),
            start_date: date(2025, 6, 1),
            end_date: date(2025, 9, 30),
            status: CycleStatus::Upcoming,
        },
    ]
}
