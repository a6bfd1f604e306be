use serde::Serialize;

/// Where a `ParsedResume` came from.
///
/// No parsing service is wired in yet, so every resume is the canned
/// `Sample`, unrelated to the uploaded file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseSource {
    Sample,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalInfo {
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub location: &'static str,
    pub linkedin: &'static str,
    pub website: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillLevel {
    pub name: &'static str,
    /// Proficiency, 0-100.
    pub level: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceItem {
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub description: &'static str,
    pub highlights: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EducationItem {
    pub degree: &'static str,
    pub institution: &'static str,
    pub location: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub gpa: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CertificationItem {
    pub name: &'static str,
    pub issuer: &'static str,
    pub date: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    pub overall_score: u8,
    pub missing_keywords: Vec<&'static str>,
    pub strengths: Vec<&'static str>,
    pub suggestions: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedResume {
    pub source: ParseSource,
    pub personal_info: PersonalInfo,
    pub skills: Vec<SkillLevel>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub certifications: Vec<CertificationItem>,
    pub job_match: JobMatch,
}

pub fn sample_parsed_resume() -> ParsedResume {
    let skill = |name, level| SkillLevel { name, level };

    ParsedResume {
        source: ParseSource::Sample,
        personal_info: PersonalInfo {
            name: "John Doe",
            email: "john.doe@example.com",
            phone: "(555) 123-4567",
            location: "San Francisco, CA",
            linkedin: "linkedin.com/in/johndoe",
            website: "johndoe.com",
        },
        skills: vec![
            skill("JavaScript", 90),
            skill("React", 85),
            skill("TypeScript", 80),
            skill("Node.js", 75),
            skill("HTML/CSS", 90),
            skill("UI/UX Design", 70),
            skill("Git", 85),
            skill("Agile/Scrum", 80),
        ],
        experience: vec![
            ExperienceItem {
                title: "Senior Frontend Developer",
                company: "Tech Solutions Inc.",
                location: "San Francisco, CA",
                start_date: "Jan 2020",
                end_date: "Present",
                description: "Led the development of responsive web applications using React and TypeScript. Implemented state management with Redux and improved performance by 40%.",
                highlights: vec![
                    "Developed and maintained multiple React applications",
                    "Implemented CI/CD pipelines using GitHub Actions",
                    "Mentored junior developers and conducted code reviews",
                    "Reduced bundle size by 35% through code splitting and lazy loading",
                ],
            },
            ExperienceItem {
                title: "Frontend Developer",
                company: "Web Innovations",
                location: "Seattle, WA",
                start_date: "Mar 2017",
                end_date: "Dec 2019",
                description: "Developed and maintained web applications using React, Redux, and JavaScript. Collaborated with designers to implement responsive UI components.",
                highlights: vec![
                    "Built reusable component library used across multiple projects",
                    "Implemented responsive designs for mobile and desktop",
                    "Integrated RESTful APIs and GraphQL endpoints",
                    "Participated in agile development process",
                ],
            },
        ],
        education: vec![EducationItem {
            degree: "Bachelor of Science in Computer Science",
            institution: "University of California, Berkeley",
            location: "Berkeley, CA",
            start_date: "2013",
            end_date: "2017",
            gpa: "3.8/4.0",
        }],
        certifications: vec![
            CertificationItem {
                name: "AWS Certified Developer - Associate",
                issuer: "Amazon Web Services",
                date: "2021",
            },
            CertificationItem {
                name: "Professional Scrum Master I (PSM I)",
                issuer: "Scrum.org",
                date: "2020",
            },
        ],
        job_match: JobMatch {
            overall_score: 85,
            missing_keywords: vec!["Docker", "Kubernetes", "AWS", "CI/CD"],
            strengths: vec!["React", "TypeScript", "Frontend Development", "UI/UX"],
            suggestions: vec![
                "Add experience with Docker and containerization",
                "Highlight any cloud platform experience (AWS, Azure, GCP)",
                "Include CI/CD tools you've worked with",
                "Emphasize team leadership and project management skills",
            ],
        },
    }
}
