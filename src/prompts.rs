//! Prompt construction for the six generation task kinds.
//!
//! Each task kind has a typed parameter struct and a pure builder function
//! that interpolates the parameters into a fixed instruction template. The
//! backend sees plain text only; optional fields that are switched off drop
//! their instruction line entirely rather than leaving a blank.

/// The six fixed generation scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Syllabus,
    CourseDetail,
    SkillGap,
    Schedule,
    Comparison,
    Roadmap,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Syllabus => "Syllabus",
            TaskKind::CourseDetail => "Course Deep Dive",
            TaskKind::SkillGap => "Skill Gap",
            TaskKind::Schedule => "Study Schedule",
            TaskKind::Comparison => "Comparison",
            TaskKind::Roadmap => "Roadmap",
        }
    }

    /// Sampling temperature sent with the request. Syllabus generation runs
    /// slightly hotter than the other five kinds.
    pub fn temperature(&self) -> f64 {
        match self {
            TaskKind::Syllabus => 0.7,
            _ => 0.6,
        }
    }
}

/// Program type selector for syllabus generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgramType {
    #[default]
    DegreeProgram,
    CertificateProgram,
    Bootcamp,
    ProfessionalCourse,
    OnlineCourse,
}

impl ProgramType {
    pub const ALL: [ProgramType; 5] = [
        ProgramType::DegreeProgram,
        ProgramType::CertificateProgram,
        ProgramType::Bootcamp,
        ProgramType::ProfessionalCourse,
        ProgramType::OnlineCourse,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProgramType::DegreeProgram => "Degree Program",
            ProgramType::CertificateProgram => "Certificate Program",
            ProgramType::Bootcamp => "Bootcamp",
            ProgramType::ProfessionalCourse => "Professional Course",
            ProgramType::OnlineCourse => "Online Course",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// How much detail the syllabus template asks the backend for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    Brief,
    #[default]
    Standard,
    Comprehensive,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 3] = [
        DetailLevel::Brief,
        DetailLevel::Standard,
        DetailLevel::Comprehensive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DetailLevel::Brief => "Brief",
            DetailLevel::Standard => "Standard",
            DetailLevel::Comprehensive => "Comprehensive",
        }
    }

    /// The instruction sentence interpolated into the syllabus template.
    fn instruction(&self) -> &'static str {
        match self {
            DetailLevel::Brief => "Keep it concise and high-level",
            DetailLevel::Standard => "Provide balanced detail",
            DetailLevel::Comprehensive => {
                "Include extensive details, examples, and explanations"
            }
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Step through a fixed variant list with wraparound.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: i32) -> T {
    let pos = all.iter().position(|v| *v == current).unwrap_or(0) as i32;
    let len = all.len() as i32;
    all[((pos + step).rem_euclid(len)) as usize]
}

#[derive(Debug, Clone)]
pub struct SyllabusParams {
    pub skills: Vec<String>,
    pub semester_count: u32,
    pub program_name: String,
    pub program_type: ProgramType,
    pub additional_info: Option<String>,
    pub detail_level: DetailLevel,
    pub include_prerequisites: bool,
    pub include_resources: bool,
}

#[derive(Debug, Clone)]
pub struct CourseDetailParams {
    pub course_name: String,
    pub related_skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SkillGapParams {
    pub current_skills: Vec<String>,
    pub target_program: String,
}

#[derive(Debug, Clone)]
pub struct ScheduleParams {
    pub semester_count: u32,
    pub courses_per_semester: u32,
    pub hours_per_week: u32,
}

#[derive(Debug, Clone)]
pub struct ComparisonParams {
    pub program_a: String,
    pub program_b: String,
}

#[derive(Debug, Clone)]
pub struct RoadmapParams {
    pub skills: Vec<String>,
    pub timeline_weeks: u32,
}

/// Parameter set for one generation request, tagged by task kind.
///
/// A copy travels with the request into the worker thread and is stored
/// verbatim on the resulting [`crate::session::GenerationResult`].
#[derive(Debug, Clone)]
pub enum TaskParams {
    Syllabus(SyllabusParams),
    CourseDetail(CourseDetailParams),
    SkillGap(SkillGapParams),
    Schedule(ScheduleParams),
    Comparison(ComparisonParams),
    Roadmap(RoadmapParams),
}

impl TaskParams {
    pub fn task(&self) -> TaskKind {
        match self {
            TaskParams::Syllabus(_) => TaskKind::Syllabus,
            TaskParams::CourseDetail(_) => TaskKind::CourseDetail,
            TaskParams::SkillGap(_) => TaskKind::SkillGap,
            TaskParams::Schedule(_) => TaskKind::Schedule,
            TaskParams::Comparison(_) => TaskKind::Comparison,
            TaskParams::Roadmap(_) => TaskKind::Roadmap,
        }
    }

    /// User-facing label for history entries and export filenames.
    pub fn label(&self) -> String {
        match self {
            TaskParams::Syllabus(p) => p.program_name.clone(),
            TaskParams::CourseDetail(p) => p.course_name.clone(),
            TaskParams::SkillGap(p) => p.target_program.clone(),
            TaskParams::Schedule(_) => "Study schedule".to_string(),
            TaskParams::Comparison(p) => format!("{} vs {}", p.program_a, p.program_b),
            TaskParams::Roadmap(p) => format!("{} weeks", p.timeline_weeks),
        }
    }
}

/// Build the prompt string for a parameter set. Deterministic: identical
/// inputs always produce an identical prompt.
pub fn build_prompt(params: &TaskParams) -> String {
    match params {
        TaskParams::Syllabus(p) => syllabus_prompt(p),
        TaskParams::CourseDetail(p) => course_detail_prompt(p),
        TaskParams::SkillGap(p) => skill_gap_prompt(p),
        TaskParams::Schedule(p) => schedule_prompt(p),
        TaskParams::Comparison(p) => comparison_prompt(p),
        TaskParams::Roadmap(p) => roadmap_prompt(p),
    }
}

fn syllabus_prompt(p: &SyllabusParams) -> String {
    let skills_text = p.skills.join(", ");
    let additional = match p.additional_info.as_deref() {
        Some(info) if !info.is_empty() => info,
        _ => "None",
    };
    // Optional lines carry their own leading newline so an absent field
    // removes exactly one line from the template.
    let prereq_line = if p.include_prerequisites {
        "\n- Prerequisites and recommended background"
    } else {
        ""
    };
    let resources_line = if p.include_resources {
        "\n   - Required Resources: textbooks, software, tools"
    } else {
        ""
    };

    format!(
        "You are an expert curriculum designer. Create a detailed, comprehensive semester-wise syllabus.

Program Name: {program_name}
Program Type: {program_type}
Number of Semesters: {semesters}
Skills to Cover: {skills_text}
Detail Level: {detail}
Additional Requirements: {additional}

Generate a detailed syllabus with the following structure:

1. PROGRAM OVERVIEW
- Program duration
- Learning objectives
- Target audience{prereq_line}

2. For EACH SEMESTER (Semester 1 to {semesters}):
   SEMESTER [NUMBER]: [NAME]
   - Duration: [weeks]
   - Focus Areas: [main topics]

   COURSES:
   Course 1: [Course Name]
   - Credits: [number]
   - Description: [brief description]
   - Topics Covered:
     \u{2022} [Topic 1]
     \u{2022} [Topic 2]
     \u{2022} [Topic 3]
   - Skills Developed: [skills from the input list]
   - Assessment Methods: [how students are evaluated]{resources_line}

   Course 2: [Course Name]
   [Same structure as above]

   [Continue for 3-4 courses per semester]

3. SKILL PROGRESSION MAP
- Show how skills build across semesters

4. CAREER PATHWAYS
- Potential career outcomes
- Job roles and opportunities

Please provide a comprehensive, well-structured response.",
        program_name = p.program_name,
        program_type = p.program_type.label(),
        semesters = p.semester_count,
        detail = p.detail_level.instruction(),
    )
}

fn course_detail_prompt(p: &CourseDetailParams) -> String {
    format!(
        "You are a curriculum specialist. Create detailed course content for:

Course: {course}
Related Skills: {skills}

Provide:
1. COURSE DESCRIPTION (2-3 paragraphs)
2. LEARNING OUTCOMES (5-7 specific outcomes)
3. WEEKLY BREAKDOWN (12-15 weeks):
   Week 1: [Topic] - [What students will learn]
   Week 2: [Topic] - [What students will learn]
   [Continue...]
4. ASSESSMENT STRUCTURE:
   - Assignment types
   - Project details
   - Exam format
5. REQUIRED RESOURCES:
   - Textbooks/materials
   - Software/tools
   - Online resources

Be specific and detailed.",
        course = p.course_name,
        skills = p.related_skills.join(", "),
    )
}

fn skill_gap_prompt(p: &SkillGapParams) -> String {
    format!(
        "You are a career advisor and skill gap analyst.

Current Skills: {skills}
Target Program: {target}

Analyze:
1. SKILL GAP ANALYSIS
   - Skills the person already has
   - Skills they need to acquire
   - Priority level for each missing skill

2. LEARNING PATHWAY
   - Recommended learning sequence
   - Estimated time to acquire each skill
   - Resources and courses

3. CAREER READINESS SCORE
   - Rate current readiness (0-100%)
   - Key areas to focus on
   - Timeline to become job-ready

Be specific and actionable.",
        skills = p.current_skills.join(", "),
        target = p.target_program,
    )
}

fn schedule_prompt(p: &ScheduleParams) -> String {
    format!(
        "You are a study planner expert. Create a detailed study schedule.

Program Duration: {semesters} semesters
Courses per Semester: {courses}
Available Hours per Week: {hours}

Create:
1. WEEKLY TIME ALLOCATION
   - Hours per course
   - Study sessions breakdown
   - Break times

2. SEMESTER MILESTONES
   - Week-by-week goals
   - Assignment deadlines
   - Exam preparation schedule

3. PRODUCTIVITY TIPS
   - Best practices for time management
   - Study techniques
   - Work-life balance strategies

Be practical and specific.",
        semesters = p.semester_count,
        courses = p.courses_per_semester,
        hours = p.hours_per_week,
    )
}

fn comparison_prompt(p: &ComparisonParams) -> String {
    format!(
        "You are an education consultant. Compare these two programs:

Program 1: {a}
Program 2: {b}

Provide:
1. CURRICULUM COMPARISON
   - Core subjects
   - Specialization areas
   - Hands-on vs theory

2. CAREER OUTCOMES
   - Job roles for each
   - Salary expectations
   - Industry demand

3. RECOMMENDATION
   - Who should choose Program 1
   - Who should choose Program 2
   - Key decision factors

Be objective and detailed.",
        a = p.program_a,
        b = p.program_b,
    )
}

fn roadmap_prompt(p: &RoadmapParams) -> String {
    format!(
        "You are a learning path designer. Create a roadmap to master these skills:

Skills: {skills}
Timeline: {weeks} weeks

Create:
1. PHASE-BY-PHASE BREAKDOWN
   - What to learn each phase
   - Projects to build
   - Milestones to achieve

2. RESOURCE RECOMMENDATIONS
   - Online courses
   - Books and tutorials
   - Practice platforms

3. PROGRESS TRACKING
   - How to measure progress
   - Portfolio projects
   - Certification goals

Be practical and motivating.",
        skills = p.skills.join(", "),
        weeks = p.timeline_weeks,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syllabus_params() -> SyllabusParams {
        SyllabusParams {
            skills: vec!["Python".to_string(), "SQL".to_string()],
            semester_count: 4,
            program_name: "Data Science Bootcamp".to_string(),
            program_type: ProgramType::Bootcamp,
            additional_info: None,
            detail_level: DetailLevel::Standard,
            include_prerequisites: true,
            include_resources: true,
        }
    }

    #[test]
    fn test_syllabus_prompt_contains_inputs() {
        let prompt = syllabus_prompt(&syllabus_params());
        assert!(prompt.contains("Data Science Bootcamp"));
        assert!(prompt.contains("Program Type: Bootcamp"));
        assert!(prompt.contains("Number of Semesters: 4"));
        assert!(prompt.contains("Python, SQL"));
        assert!(prompt.contains("- Prerequisites and recommended background"));
        assert!(prompt.contains("- Required Resources: textbooks, software, tools"));
    }

    #[test]
    fn test_syllabus_temperature() {
        assert_eq!(TaskKind::Syllabus.temperature(), 0.7);
    }

    #[test]
    fn test_non_syllabus_temperature() {
        for kind in [
            TaskKind::CourseDetail,
            TaskKind::SkillGap,
            TaskKind::Schedule,
            TaskKind::Comparison,
            TaskKind::Roadmap,
        ] {
            assert_eq!(kind.temperature(), 0.6);
        }
    }

    #[test]
    fn test_syllabus_prompt_deterministic() {
        let params = syllabus_params();
        assert_eq!(syllabus_prompt(&params), syllabus_prompt(&params));
    }

    #[test]
    fn test_omitting_prerequisites_drops_exactly_one_line() {
        let with = syllabus_prompt(&syllabus_params());
        let without = syllabus_prompt(&SyllabusParams {
            include_prerequisites: false,
            ..syllabus_params()
        });

        assert!(!without.contains("- Prerequisites and recommended background"));

        let with_lines: Vec<&str> = with.lines().collect();
        let without_lines: Vec<&str> = without.lines().collect();
        assert_eq!(with_lines.len(), without_lines.len() + 1);

        // Every remaining line is unchanged.
        let kept: Vec<&str> = with_lines
            .iter()
            .copied()
            .filter(|l| *l != "- Prerequisites and recommended background")
            .collect();
        assert_eq!(kept, without_lines);
    }

    #[test]
    fn test_omitting_resources_drops_exactly_one_line() {
        let with = syllabus_prompt(&syllabus_params());
        let without = syllabus_prompt(&SyllabusParams {
            include_resources: false,
            ..syllabus_params()
        });

        let with_lines: Vec<&str> = with.lines().collect();
        let without_lines: Vec<&str> = without.lines().collect();
        assert_eq!(with_lines.len(), without_lines.len() + 1);

        let kept: Vec<&str> = with_lines
            .iter()
            .copied()
            .filter(|l| *l != "   - Required Resources: textbooks, software, tools")
            .collect();
        assert_eq!(kept, without_lines);
    }

    #[test]
    fn test_empty_additional_info_falls_back_to_none() {
        let mut params = syllabus_params();
        params.additional_info = Some(String::new());
        let prompt = syllabus_prompt(&params);
        assert!(prompt.contains("Additional Requirements: None"));

        params.additional_info = Some("Focus on hands-on projects".to_string());
        let prompt = syllabus_prompt(&params);
        assert!(prompt.contains("Additional Requirements: Focus on hands-on projects"));
    }

    #[test]
    fn test_course_detail_prompt() {
        let params = CourseDetailParams {
            course_name: "Intro to ML".to_string(),
            related_skills: vec!["ML".to_string(), "Stats".to_string()],
        };
        let prompt = course_detail_prompt(&params);
        assert!(prompt.contains("Course: Intro to ML"));
        assert!(prompt.contains("Related Skills: ML, Stats"));
        assert_eq!(TaskKind::CourseDetail.temperature(), 0.6);
    }

    #[test]
    fn test_skill_gap_prompt() {
        let params = SkillGapParams {
            current_skills: vec!["Python".to_string()],
            target_program: "ML Engineer".to_string(),
        };
        let prompt = skill_gap_prompt(&params);
        assert!(prompt.contains("Current Skills: Python"));
        assert!(prompt.contains("Target Program: ML Engineer"));
    }

    #[test]
    fn test_schedule_prompt() {
        let params = ScheduleParams {
            semester_count: 4,
            courses_per_semester: 3,
            hours_per_week: 30,
        };
        let prompt = schedule_prompt(&params);
        assert!(prompt.contains("Program Duration: 4 semesters"));
        assert!(prompt.contains("Courses per Semester: 3"));
        assert!(prompt.contains("Available Hours per Week: 30"));
    }

    #[test]
    fn test_comparison_prompt() {
        let params = ComparisonParams {
            program_a: "CS Degree".to_string(),
            program_b: "DS Bootcamp".to_string(),
        };
        let prompt = comparison_prompt(&params);
        assert!(prompt.contains("Program 1: CS Degree"));
        assert!(prompt.contains("Program 2: DS Bootcamp"));
    }

    #[test]
    fn test_roadmap_prompt() {
        let params = RoadmapParams {
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            timeline_weeks: 12,
        };
        let prompt = roadmap_prompt(&params);
        assert!(prompt.contains("Skills: Rust, SQL"));
        assert!(prompt.contains("Timeline: 12 weeks"));
    }

    #[test]
    fn test_task_params_label() {
        let label = TaskParams::Comparison(ComparisonParams {
            program_a: "A".to_string(),
            program_b: "B".to_string(),
        })
        .label();
        assert_eq!(label, "A vs B");

        let label = TaskParams::Roadmap(RoadmapParams {
            skills: vec![],
            timeline_weeks: 12,
        })
        .label();
        assert_eq!(label, "12 weeks");
    }

    #[test]
    fn test_program_type_cycle_wraps() {
        assert_eq!(ProgramType::OnlineCourse.next(), ProgramType::DegreeProgram);
        assert_eq!(ProgramType::DegreeProgram.prev(), ProgramType::OnlineCourse);
        for pt in ProgramType::ALL {
            assert_eq!(pt.next().prev(), pt);
        }
    }

    #[test]
    fn test_detail_level_cycle_wraps() {
        assert_eq!(DetailLevel::Comprehensive.next(), DetailLevel::Brief);
        assert_eq!(DetailLevel::Brief.prev(), DetailLevel::Comprehensive);
    }
}
