//! The engineering-center prescreening tracks and their backing tables.

use std::str::FromStr;

use crate::errors::AppError;

/// One prescreening track. Application-EC tracks record the full screening
/// sheet; cloud-EC tracks record experience and feedback only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Java,
    Dotnet,
    React,
    Angular,
    Mendix,
    Devops,
    Cloudops,
    Platform,
    Sre,
}

impl Track {
    pub fn questionnaire_table(self) -> &'static str {
        match self {
            Track::Java => "app_ec_java_questionnaire",
            Track::Dotnet => "app_ec_dotnet_questionnaire",
            Track::React => "app_ec_react_questionnaire",
            Track::Angular => "app_ec_angular_questionnaire",
            Track::Mendix => "app_ec_mendix_questionnaire",
            Track::Devops => "cloud_ec_devops_questionnaire",
            Track::Cloudops => "cloud_ec_cloudops_questionnaire",
            Track::Platform => "cloud_ec_platform_questionnaire",
            Track::Sre => "cloud_ec_sre_questionnaire",
        }
    }

    pub fn response_table(self) -> &'static str {
        match self {
            Track::Java => "app_ec_java_feedback_response",
            Track::Dotnet => "app_ec_dotnet_feedback_response",
            Track::React => "app_ec_react_feedback_response",
            Track::Angular => "app_ec_angular_feedback_response",
            Track::Mendix => "app_ec_mendix_feedback_response",
            Track::Devops => "cloud_ec_devops_feedback_response",
            Track::Cloudops => "cloud_ec_cloudops_feedback_response",
            Track::Platform => "cloud_ec_platform_feedback_response",
            Track::Sre => "cloud_ec_sre_feedback_response",
        }
    }

    /// Whether the response table carries the extended screening columns
    /// (introductions, CTC, notice period, offer status).
    pub fn has_extended_columns(self) -> bool {
        matches!(
            self,
            Track::Java | Track::Dotnet | Track::React | Track::Angular | Track::Mendix
        )
    }
}

impl FromStr for Track {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java" => Ok(Track::Java),
            "dotnet" => Ok(Track::Dotnet),
            "react" => Ok(Track::React),
            "angular" => Ok(Track::Angular),
            "mendix" => Ok(Track::Mendix),
            "devops" => Ok(Track::Devops),
            "cloudops" => Ok(Track::Cloudops),
            "platform" => Ok(Track::Platform),
            "sre" => Ok(Track::Sre),
            other => Err(AppError::NotFound(format!(
                "Unknown prescreening track: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_parses_from_route_param() {
        assert_eq!("java".parse::<Track>().unwrap(), Track::Java);
        assert_eq!("sre".parse::<Track>().unwrap(), Track::Sre);
        assert!(matches!(
            "golang".parse::<Track>(),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_app_tracks_use_app_tables() {
        assert_eq!(Track::Mendix.questionnaire_table(), "app_ec_mendix_questionnaire");
        assert_eq!(Track::Mendix.response_table(), "app_ec_mendix_feedback_response");
    }

    #[test]
    fn test_cloud_tracks_use_cloud_tables() {
        assert_eq!(Track::Cloudops.questionnaire_table(), "cloud_ec_cloudops_questionnaire");
        assert_eq!(Track::Sre.response_table(), "cloud_ec_sre_feedback_response");
    }

    #[test]
    fn test_extended_columns_split_follows_center() {
        for track in [Track::Java, Track::Dotnet, Track::React, Track::Angular, Track::Mendix] {
            assert!(track.has_extended_columns());
        }
        for track in [Track::Devops, Track::Cloudops, Track::Platform, Track::Sre] {
            assert!(!track.has_extended_columns());
        }
    }
}
