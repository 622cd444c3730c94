use crate::{
    data::RecordId,
    error::{DashboardResult, MissingFieldsSnafu},
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
}

///sent as-is as the json body for `addCourse`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub name: String,
}

impl CourseDraft {
    pub fn validate(&self) -> DashboardResult<()> {
        snafu::ensure!(
            !self.name.trim().is_empty(),
            MissingFieldsSnafu { missing: "name" }
        );
        Ok(())
    }
}
