use crate::error::{BadEnvVarSnafu, DashboardResult, ParseByteCountSnafu, ParseFlagSnafu};
use dotenvy::var;
use snafu::ResultExt;
use std::{env::VarError, sync::Arc};

pub const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
pub const DEFAULT_STUDENT_API: &str =
    "https://student-dash-project-backend.vercel.app/api/students";
pub const DEFAULT_COURSE_API: &str = "https://student-dash-project-backend.vercel.app/api/course";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://images.pexels.com/photos/614810/pexels-photo-614810.jpeg?auto=compress&cs=tinysrgb&w=150";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_ip: Arc<str>,
    api_config: Arc<ApiConfig>,
    display_config: Arc<DisplayConfig>,
    max_upload_bytes: usize,
}

impl RuntimeConfiguration {
    pub fn new() -> DashboardResult<Self> {
        Self::from_lookup(|name| match var(name) {
            Ok(value) => Ok(Some(value)),
            Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
            Err(source) => Err(source).context(BadEnvVarSnafu { name }),
        })
    }

    ///anything the lookup doesn't have falls back to the defaults
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> DashboardResult<Option<String>>,
    ) -> DashboardResult<Self> {
        let get_or = |name, default: &str| -> DashboardResult<String> {
            Ok(lookup(name)?.unwrap_or_else(|| default.to_string()))
        };

        let with_courses = match lookup("DASHBOARD_WITH_COURSES")? {
            Some(flag) => flag
                .trim()
                .parse()
                .context(ParseFlagSnafu { name: "DASHBOARD_WITH_COURSES" })?,
            None => true,
        };
        let max_upload_bytes = match lookup("DASHBOARD_MAX_UPLOAD_BYTES")? {
            Some(bytes) => bytes.trim().parse().context(ParseByteCountSnafu {
                name: "DASHBOARD_MAX_UPLOAD_BYTES",
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            server_ip: get_or("DASHBOARD_SERVER_IP", DEFAULT_SERVER_IP)?.into(),
            api_config: Arc::new(ApiConfig::new(
                get_or("DASHBOARD_STUDENT_API", DEFAULT_STUDENT_API)?,
                get_or("DASHBOARD_COURSE_API", DEFAULT_COURSE_API)?,
            )),
            display_config: Arc::new(DisplayConfig {
                with_courses,
                placeholder_image: get_or(
                    "DASHBOARD_PLACEHOLDER_IMAGE",
                    DEFAULT_PLACEHOLDER_IMAGE,
                )?,
            }),
            max_upload_bytes,
        })
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub fn api_config(&self) -> Arc<ApiConfig> {
        self.api_config.clone()
    }

    pub fn display_config(&self) -> Arc<DisplayConfig> {
        self.display_config.clone()
    }

    pub const fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

#[derive(Debug)]
pub struct ApiConfig {
    student_api: String,
    course_api: String,
}

impl ApiConfig {
    pub fn new(student_api: impl AsRef<str>, course_api: impl AsRef<str>) -> Self {
        Self {
            student_api: student_api.as_ref().trim_end_matches('/').to_string(),
            course_api: course_api.as_ref().trim_end_matches('/').to_string(),
        }
    }

    pub fn student_api(&self) -> &str {
        &self.student_api
    }

    pub fn course_api(&self) -> &str {
        &self.course_api
    }
}

///everything the renderer needs that isn't in the store
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub with_courses: bool,
    pub placeholder_image: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            with_courses: true,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}
