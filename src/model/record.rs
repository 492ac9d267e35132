use std::fmt;

use serde::Serialize;

use super::position::Position;
use super::skill::Skill;

/// Every field of the application form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Email,
    PhoneNumber,
    PositionApplyingFor,
    RelevantExperience,
    PortfolioUrl,
    ManagementExperience,
    AdditionalSkills,
    PreferredInterviewTime,
}

impl Field {
    /// Number of form fields.
    pub const COUNT: usize = 9;

    /// All fields in display order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::FullName,
        Field::Email,
        Field::PhoneNumber,
        Field::PositionApplyingFor,
        Field::RelevantExperience,
        Field::PortfolioUrl,
        Field::ManagementExperience,
        Field::AdditionalSkills,
        Field::PreferredInterviewTime,
    ];

    /// Position of this field in [`Field::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short name used in validation messages.
    pub fn name(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email",
            Field::PhoneNumber => "Phone Number",
            Field::PositionApplyingFor => "Position Applying For",
            Field::RelevantExperience => "Relevant Experience",
            Field::PortfolioUrl => "Portfolio URL",
            Field::ManagementExperience => "Management Experience",
            Field::AdditionalSkills => "Additional Skills",
            Field::PreferredInterviewTime => "Preferred Interview Time",
        }
    }

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email address",
            Field::PhoneNumber => "Phone Number",
            Field::PositionApplyingFor => "Applying for Position",
            Field::RelevantExperience => "Relevant Experience (Years)",
            Field::PortfolioUrl => "Portfolio URL",
            Field::ManagementExperience => "Management Experience",
            Field::AdditionalSkills => "Additional Skills",
            Field::PreferredInterviewTime => "Preferred Interview Time (YYYY-MM-DDTHH:MM)",
        }
    }

    /// Returns `true` for the fields whose presence depends on the position.
    pub fn is_position_dependent(self) -> bool {
        matches!(
            self,
            Field::RelevantExperience | Field::PortfolioUrl | Field::ManagementExperience
        )
    }

    /// Whether the field is shown (and required) for the given position.
    pub fn is_active_for(self, position: Option<Position>) -> bool {
        match self {
            Field::RelevantExperience => position.is_some_and(|p| p.requires_experience()),
            Field::PortfolioUrl => position.is_some_and(|p| p.requires_portfolio()),
            Field::ManagementExperience => {
                position.is_some_and(|p| p.requires_management_experience())
            }
            _ => true,
        }
    }

    /// Returns the free-text identity of this field, if it has one.
    pub fn as_text(self) -> Option<TextField> {
        match self {
            Field::FullName => Some(TextField::FullName),
            Field::Email => Some(TextField::Email),
            Field::PhoneNumber => Some(TextField::PhoneNumber),
            Field::RelevantExperience => Some(TextField::RelevantExperience),
            Field::PortfolioUrl => Some(TextField::PortfolioUrl),
            Field::ManagementExperience => Some(TextField::ManagementExperience),
            Field::PreferredInterviewTime => Some(TextField::PreferredInterviewTime),
            Field::PositionApplyingFor | Field::AdditionalSkills => None,
        }
    }
}

#[mutants::skip]
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The subset of [`Field`] edited as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    FullName,
    Email,
    PhoneNumber,
    RelevantExperience,
    PortfolioUrl,
    ManagementExperience,
    PreferredInterviewTime,
}

impl From<TextField> for Field {
    fn from(field: TextField) -> Self {
        match field {
            TextField::FullName => Field::FullName,
            TextField::Email => Field::Email,
            TextField::PhoneNumber => Field::PhoneNumber,
            TextField::RelevantExperience => Field::RelevantExperience,
            TextField::PortfolioUrl => Field::PortfolioUrl,
            TextField::ManagementExperience => Field::ManagementExperience,
            TextField::PreferredInterviewTime => Field::PreferredInterviewTime,
        }
    }
}

#[mutants::skip]
impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Field::from(*self).fmt(f)
    }
}

/// A job application, either the working copy or a submitted snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub position_applying_for: Option<Position>,
    pub relevant_experience: String,
    pub portfolio_url: String,
    pub management_experience: String,
    /// Selected skills without duplicates, in the order they were ticked.
    pub additional_skills: Vec<Skill>,
    pub preferred_interview_time: String,
}

impl ApplicationRecord {
    /// Returns the value of a text field.
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::FullName => &self.full_name,
            TextField::Email => &self.email,
            TextField::PhoneNumber => &self.phone_number,
            TextField::RelevantExperience => &self.relevant_experience,
            TextField::PortfolioUrl => &self.portfolio_url,
            TextField::ManagementExperience => &self.management_experience,
            TextField::PreferredInterviewTime => &self.preferred_interview_time,
        }
    }

    pub(crate) fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::FullName => &mut self.full_name,
            TextField::Email => &mut self.email,
            TextField::PhoneNumber => &mut self.phone_number,
            TextField::RelevantExperience => &mut self.relevant_experience,
            TextField::PortfolioUrl => &mut self.portfolio_url,
            TextField::ManagementExperience => &mut self.management_experience,
            TextField::PreferredInterviewTime => &mut self.preferred_interview_time,
        }
    }

    /// Returns `true` if the skill is ticked.
    pub fn has_skill(&self, skill: Skill) -> bool {
        self.additional_skills.contains(&skill)
    }

    /// Adds or removes a skill. Adding a skill that is already present is a no-op.
    pub(crate) fn set_skill(&mut self, skill: Skill, included: bool) {
        if included {
            if !self.has_skill(skill) {
                self.additional_skills.push(skill);
            }
        } else {
            self.additional_skills.retain(|s| *s != skill);
        }
    }

    /// Clears the fields whose relevance depends on the position.
    pub(crate) fn clear_position_fields(&mut self) {
        self.relevant_experience.clear();
        self.portfolio_url.clear();
        self.management_experience.clear();
    }
}
