use std::fmt;

use serde::Serialize;

/// A skill from the fixed catalog offered as checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Skill {
    JavaScript,
    #[serde(rename = "CSS")]
    Css,
    Python,
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "SQL")]
    Sql,
    Rust,
}

static ALL_SKILLS: &[Skill] = &[
    Skill::JavaScript,
    Skill::Css,
    Skill::Python,
    Skill::Html,
    Skill::Sql,
    Skill::Rust,
];

impl Skill {
    /// Returns the display name of this skill.
    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::JavaScript => "JavaScript",
            Skill::Css => "CSS",
            Skill::Python => "Python",
            Skill::Html => "HTML",
            Skill::Sql => "SQL",
            Skill::Rust => "Rust",
        }
    }

    /// Returns the whole catalog in display order.
    pub fn all() -> &'static [Skill] {
        ALL_SKILLS
    }
}

#[mutants::skip]
impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
