//! Rubric and few-shot prompt construction for the judgment service

use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Builds the full message list for one judgment call: the fixed rubric,
/// three worked examples anchoring the scale, then the candidate/query pair
/// under evaluation.
pub fn build_judgment_messages(candidate_text: &str, query_text: &str) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(RUBRIC_SYSTEM_PROMPT)];
    messages.extend(few_shot_examples());
    messages.push(ChatMessage::user(render_evaluation_request(
        candidate_text,
        query_text,
    )));
    messages
}

fn render_evaluation_request(candidate_text: &str, query_text: &str) -> String {
    format!(
        r#"Please evaluate this resume against the job description:

**Job Description:**
{}

**Resume:**
{}

Provide a comprehensive evaluation in JSON format with all the following fields:
- overall_score (0.0-1.0)
- experience_score (0.0-1.0)
- skills_score (0.0-1.0)
- education_score (0.0-1.0)
- projects_score (0.0-1.0)
- career_progression_score (0.0-1.0)
- cultural_fit_score (0.0-1.0)
- strengths (array of strings)
- concerns (array of strings)
- missing_skills (array of strings)
- recommendation (string: "Strong Hire" | "Hire" | "Consider" | "Weak Fit" | "No Hire")
- reasoning (string explaining the overall assessment)
- total_experience (string describing years/type of experience)
- education_level (string describing highest education)
- key_achievements (array of notable accomplishments)"#,
        query_text, candidate_text
    )
}

const RUBRIC_SYSTEM_PROMPT: &str = r#"You are an expert HR professional and technical recruiter with 15+ years of experience. Your task is to evaluate resumes against job descriptions and provide comprehensive, fair, and insightful assessments.

You must evaluate candidates based on these criteria:
1. **Experience Relevance** (25%): How well does their experience match the role?
2. **Technical Skills** (20%): Do they have the required technical competencies?
3. **Education Background** (15%): Does their education align with requirements?
4. **Project Portfolio** (15%): Quality and relevance of projects/achievements
5. **Career Progression** (15%): Growth trajectory and advancement
6. **Cultural & Role Fit** (10%): Soft skills, leadership, teamwork

**Important Guidelines:**
- Be objective and fair - avoid bias based on name, gender, or background
- Consider career gaps contextually (education, family, economic factors)
- Value diverse paths to expertise (bootcamps, self-taught, non-traditional backgrounds)
- Look for growth potential, not just current perfect matches
- Consider the full candidate profile, not just keyword matching
- Provide actionable, constructive feedback

**Output Format:** Always respond with valid JSON containing all required fields."#;

/// Three worked examples spanning a strong senior hire, a junior with
/// potential, and a poor fit, each with a fully worked expected judgment,
/// to calibrate the scale across calls.
fn few_shot_examples() -> Vec<ChatMessage> {
    vec![
        ChatMessage::user(render_evaluation_request(STRONG_SENIOR_RESUME, STRONG_SENIOR_JOB)),
        ChatMessage::assistant(
            json!({
                "overall_score": 0.88,
                "experience_score": 0.90,
                "skills_score": 0.95,
                "education_score": 0.80,
                "projects_score": 0.85,
                "career_progression_score": 0.90,
                "cultural_fit_score": 0.85,
                "strengths": [
                    "Strong technical match - all required skills present",
                    "Excellent leadership experience with team management",
                    "Clear career progression from developer to lead",
                    "Quantifiable achievements (500K users, 60% performance improvement)"
                ],
                "concerns": [
                    "Slightly below 5 years requirement in current leadership role"
                ],
                "missing_skills": [],
                "recommendation": "Strong Hire",
                "reasoning": "Sarah meets or exceeds most requirements. Eight years of progressive experience, strong technical skills, and proven leadership make her ideal for this senior role.",
                "total_experience": "8 years in software development with 4 years in leadership",
                "education_level": "Bachelor's in Computer Science",
                "key_achievements": [
                    "Led team building platform for 500K+ users",
                    "60% performance improvement through optimization"
                ]
            })
            .to_string(),
        ),
        ChatMessage::user(render_evaluation_request(JUNIOR_RESUME, JUNIOR_JOB)),
        ChatMessage::assistant(
            json!({
                "overall_score": 0.65,
                "experience_score": 0.70,
                "skills_score": 0.75,
                "education_score": 0.60,
                "projects_score": 0.55,
                "career_progression_score": 0.60,
                "cultural_fit_score": 0.70,
                "strengths": [
                    "Meets minimum 2-year experience requirement",
                    "Good technical skill alignment with React and Node.js",
                    "Career transition shows adaptability and motivation"
                ],
                "concerns": [
                    "Limited depth - mostly basic implementations",
                    "No SQL database experience (MongoDB only)",
                    "No exposure to enterprise-level applications"
                ],
                "missing_skills": [
                    "SQL databases (PostgreSQL, MySQL)",
                    "Advanced React patterns",
                    "Testing frameworks"
                ],
                "recommendation": "Consider",
                "reasoning": "Alex meets the basic requirements but shows limited depth. Could be a good fit if mentoring is available.",
                "total_experience": "2+ years software development, career transition from marketing",
                "education_level": "Coding Bootcamp + Bachelor's in Marketing",
                "key_achievements": [
                    "Successfully transitioned careers to software development",
                    "Built full-stack applications using modern technologies"
                ]
            })
            .to_string(),
        ),
        ChatMessage::user(render_evaluation_request(POOR_FIT_RESUME, POOR_FIT_JOB)),
        ChatMessage::assistant(
            json!({
                "overall_score": 0.15,
                "experience_score": 0.05,
                "skills_score": 0.10,
                "education_score": 0.20,
                "projects_score": 0.15,
                "career_progression_score": 0.25,
                "cultural_fit_score": 0.30,
                "strengths": [
                    "7 years of total technology experience",
                    "Self-directed freelance experience shows initiative"
                ],
                "concerns": [
                    "Zero machine learning or data science experience",
                    "No Python, statistical modeling, or ML framework experience",
                    "Educational background completely unrelated"
                ],
                "missing_skills": [
                    "Python programming",
                    "Machine learning frameworks (scikit-learn, TensorFlow, PyTorch)",
                    "Statistical analysis and modeling",
                    "SQL and database technologies"
                ],
                "recommendation": "No Hire",
                "reasoning": "John's background is entirely in web development with no relevant data science experience. This would require starting from scratch in a senior-level role.",
                "total_experience": "7 years in web development/design, 0 years in data science/ML",
                "education_level": "Associate Degree in Graphic Design",
                "key_achievements": [
                    "Built successful freelance web development business"
                ]
            })
            .to_string(),
        ),
    ]
}

const STRONG_SENIOR_JOB: &str = "Senior Software Engineer - Python/Django\nWe're seeking a Senior Software Engineer with 5+ years of experience in Python, Django, and cloud technologies. The role involves leading a small team, architecting scalable solutions, and mentoring junior developers. Requirements: Python, Django, AWS, PostgreSQL, Redis, leadership experience.";

const STRONG_SENIOR_RESUME: &str = "Sarah Johnson\n\nEXPERIENCE:\nLead Software Engineer | TechCorp | 2020-Present (4 years)\n- Led team of 4 developers building e-commerce platform serving 500K+ users\n- Architected microservices using Python/Django, deployed on AWS EKS\n- Implemented caching with Redis, reduced response times by 60%\n- Mentored 3 junior developers, 2 promoted to mid-level\n\nSoftware Engineer | StartupXYZ | 2018-2020 (2 years)\n- Built REST APIs using Django REST Framework\n- Designed PostgreSQL database schemas\n\nSoftware Developer | LocalCorp | 2016-2018 (2 years)\n- Developed web applications using Python/Flask\n\nEDUCATION:\nB.S. Computer Science | State University | 2016\n\nSKILLS: Python, Django, Flask, AWS, PostgreSQL, Redis, Docker, Kubernetes";

const JUNIOR_JOB: &str = "Software Engineer - Full Stack\nLooking for a Software Engineer with 2+ years experience in React, Node.js, and database technologies. Will work on our web application serving enterprise clients. Requirements: JavaScript, React, Node.js, SQL databases, REST APIs.";

const JUNIOR_RESUME: &str = "Alex Chen\n\nEXPERIENCE:\nJunior Developer | WebCorp | 2022-Present (2 years)\n- Built React components for customer dashboard\n- Created Node.js APIs for user authentication\n- Worked with MongoDB for data storage\n\nIntern | TechStart | Summer 2022 (3 months)\n- Built simple CRUD application with Express.js\n\nEDUCATION:\nCoding Bootcamp - Full Stack Web Development | 2022\nB.A. Marketing | University | 2019\n\nSKILLS: JavaScript, React, Node.js, Express, MongoDB, HTML, CSS, Git";

const POOR_FIT_JOB: &str = "Senior Data Scientist - Machine Learning\nSeeking a Senior Data Scientist with 5+ years experience in machine learning, Python, SQL, and statistical modeling. Will lead ML initiatives and work with large datasets. Requirements: Python, scikit-learn, TensorFlow/PyTorch, SQL, statistics, 5+ years ML experience.";

const POOR_FIT_RESUME: &str = "John Smith\n\nEXPERIENCE:\nWeb Developer | DesignCorp | 2019-Present (5 years)\n- Built WordPress websites for small businesses\n- Customized themes using PHP and CSS\n\nFreelance Web Designer | 2017-2019 (2 years)\n- Created static websites using HTML/CSS\n\nEDUCATION:\nAssociate Degree in Graphic Design | Community College | 2017\n\nSKILLS: HTML, CSS, JavaScript, PHP, WordPress, Photoshop";
