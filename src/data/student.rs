use crate::{
    data::{RecordId, image::{ImageUpload, ProfileImage}},
    error::{DashboardResult, EmailSnafu, MissingFieldsSnafu},
};
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};
use snafu::ResultExt;
use std::{fmt::Display, str::FromStr};

///records with gaps still get listed, missing or `null` text just shows as empty
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub course: String,
    #[serde(rename = "profileImage", default)]
    pub profile_image: ProfileImage,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StudentField {
    Name,
    Email,
    Course,
}

impl StudentField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Course];

    ///the form input name, which is also the multipart part name the api expects
    pub const fn input_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Course => "course",
        }
    }
}

impl FromStr for StudentField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.input_name() == s)
            .ok_or(())
    }
}

impl Display for StudentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.input_name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    pub course: String,
    pub profile_image: Option<ImageUpload>,
}

impl StudentDraft {
    ///the image is never carried over - editing starts with no new upload
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
            course: student.course.clone(),
            profile_image: None,
        }
    }

    pub fn set(&mut self, field: StudentField, value: String) {
        match field {
            StudentField::Name => self.name = value,
            StudentField::Email => self.email = value,
            StudentField::Course => self.course = value,
        }
    }

    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.name,
            StudentField::Email => &self.email,
            StudentField::Course => &self.course,
        }
    }

    pub fn missing_fields(&self) -> Vec<StudentField> {
        StudentField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn validate(&self) -> DashboardResult<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            let missing = missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return MissingFieldsSnafu { missing }.fail();
        }

        EmailAddress::from_str(self.email.trim()).context(EmailSnafu)?;
        Ok(())
    }
}
