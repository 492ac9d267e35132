mod form;
mod position;
mod record;
mod skill;
mod validation;

pub use form::{Clock, FieldChange, FormError, FormMode, FormState, Transition};
pub use position::Position;
pub use record::{ApplicationRecord, Field, TextField};
pub use skill::Skill;
pub use validation::{
    ErrorMap, INTERVIEW_TIME_FORMAT, PHONE_NUMBER_LEN, ValidationError, parse_interview_time,
    validate, validate_email, validate_full_name, validate_interview_time,
    validate_management_experience, validate_phone_number, validate_portfolio_url,
    validate_position, validate_relevant_experience, validate_skills,
};
