use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PREFERRED_INTAKE: &str = "2025-26";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GradeLevel {
    #[default]
    #[serde(rename = "11")]
    Eleven,
    #[serde(rename = "12")]
    Twelve,
    #[serde(rename = "Gap Year")]
    GapYear,
    Other,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 4] = [Self::Eleven, Self::Twelve, Self::GapYear, Self::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eleven => "11",
            Self::Twelve => "12",
            Self::GapYear => "Gap Year",
            Self::Other => "Other",
        }
    }

    /// Label shown next to the option, e.g. "Class 11".
    pub fn label(self) -> &'static str {
        match self {
            Self::Eleven => "Class 11",
            Self::Twelve => "Class 12",
            Self::GapYear => "Gap Year",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeLevel {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == raw)
            .ok_or_else(|| UnknownOption::new("grade_level", raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Stream {
    #[default]
    #[serde(rename = "PCM")]
    Pcm,
    #[serde(rename = "PCMB")]
    Pcmb,
    Science,
    Commerce,
    Arts,
    Other,
}

impl Stream {
    pub const ALL: [Stream; 6] = [
        Self::Pcm,
        Self::Pcmb,
        Self::Science,
        Self::Commerce,
        Self::Arts,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pcm => "PCM",
            Self::Pcmb => "PCMB",
            Self::Science => "Science",
            Self::Commerce => "Commerce",
            Self::Arts => "Arts",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stream {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stream| stream.as_str() == raw)
            .ok_or_else(|| UnknownOption::new("stream", raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} option: {value:?}")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

impl UnknownOption {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// One prospective applicant's input. Serializes to the exact body the
/// applications endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub parent_name: String,
    pub city: String,
    pub state: String,
    pub grade_level: GradeLevel,
    pub stream: Stream,
    pub program_interest: String,
    pub preferred_intake: String,
    pub how_heard: String,
    pub consent: bool,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            parent_name: String::new(),
            city: String::new(),
            state: String::new(),
            grade_level: GradeLevel::default(),
            stream: Stream::default(),
            program_interest: String::new(),
            preferred_intake: DEFAULT_PREFERRED_INTAKE.to_string(),
            how_heard: String::new(),
            consent: false,
        }
    }
}

impl ApplicationForm {
    /// Replaces a single field. Option fields take their exact wire value,
    /// so whatever was accepted reads back unchanged through [`Self::value`].
    /// Returns `false` when the value has the wrong kind for the field or
    /// names an option that doesn't exist; the form is left untouched then.
    pub fn apply(&mut self, field: FormField, value: FieldValue) -> bool {
        match (field, value) {
            (FormField::Consent, FieldValue::Flag(flag)) => {
                self.consent = flag;
                true
            }
            (FormField::GradeLevel, FieldValue::Text(raw)) => raw
                .parse::<GradeLevel>()
                .map(|level| self.grade_level = level)
                .is_ok(),
            (FormField::Stream, FieldValue::Text(raw)) => raw
                .parse::<Stream>()
                .map(|stream| self.stream = stream)
                .is_ok(),
            (field, FieldValue::Text(text)) => match self.text_slot(field) {
                Some(slot) => {
                    *slot = text;
                    true
                }
                None => false,
            },
            (_, FieldValue::Flag(_)) => false,
        }
    }

    /// Current value of a field in its wire representation.
    pub fn value(&self, field: FormField) -> FieldValue {
        match field {
            FormField::FullName => FieldValue::Text(self.full_name.clone()),
            FormField::Email => FieldValue::Text(self.email.clone()),
            FormField::Phone => FieldValue::Text(self.phone.clone()),
            FormField::ParentName => FieldValue::Text(self.parent_name.clone()),
            FormField::City => FieldValue::Text(self.city.clone()),
            FormField::State => FieldValue::Text(self.state.clone()),
            FormField::GradeLevel => FieldValue::Text(self.grade_level.as_str().to_string()),
            FormField::Stream => FieldValue::Text(self.stream.as_str().to_string()),
            FormField::ProgramInterest => FieldValue::Text(self.program_interest.clone()),
            FormField::PreferredIntake => FieldValue::Text(self.preferred_intake.clone()),
            FormField::HowHeard => FieldValue::Text(self.how_heard.clone()),
            FormField::Consent => FieldValue::Flag(self.consent),
        }
    }

    fn text_slot(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::FullName => Some(&mut self.full_name),
            FormField::Email => Some(&mut self.email),
            FormField::Phone => Some(&mut self.phone),
            FormField::ParentName => Some(&mut self.parent_name),
            FormField::City => Some(&mut self.city),
            FormField::State => Some(&mut self.state),
            FormField::ProgramInterest => Some(&mut self.program_interest),
            FormField::PreferredIntake => Some(&mut self.preferred_intake),
            FormField::HowHeard => Some(&mut self.how_heard),
            FormField::GradeLevel | FormField::Stream | FormField::Consent => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FullName,
    Email,
    Phone,
    ParentName,
    City,
    State,
    GradeLevel,
    Stream,
    ProgramInterest,
    PreferredIntake,
    HowHeard,
    Consent,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::ParentName,
        Self::City,
        Self::State,
        Self::GradeLevel,
        Self::Stream,
        Self::ProgramInterest,
        Self::PreferredIntake,
        Self::HowHeard,
        Self::Consent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::ParentName => "parent_name",
            Self::City => "city",
            Self::State => "state",
            Self::GradeLevel => "grade_level",
            Self::Stream => "stream",
            Self::ProgramInterest => "program_interest",
            Self::PreferredIntake => "preferred_intake",
            Self::HowHeard => "how_heard",
            Self::Consent => "consent",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Self::FullName | Self::Email | Self::Phone | Self::Consent
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}
