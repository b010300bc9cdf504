//! Maps a candidate's position onto the question and response tables for
//! their technical track. All table names are compile-time constants; no
//! request text ever reaches the SQL.

use std::str::FromStr;

use crate::errors::AppError;

/// One technical track and its backing table pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechTable {
    Dotnet,
    Java,
    React,
    Angular,
    FullstackJavaAngular,
    FullstackJavaReact,
    FullstackDotnetAngular,
    FullstackDotnetReact,
    Generic,
}

impl TechTable {
    /// Resolves the track for a free-text position. Matching is
    /// case-insensitive and ordered: a combined position such as
    /// "java_angular_fullstack" lands on the Java tables because the
    /// earlier substring wins. Consumers that want the combined tables go
    /// through the dedicated fullstack endpoints instead.
    pub fn for_position(position: &str) -> TechTable {
        let pos = position.to_lowercase();
        if pos.contains("dotnet") || pos.contains(".net") {
            TechTable::Dotnet
        } else if pos.contains("java") {
            TechTable::Java
        } else if pos.contains("react") {
            TechTable::React
        } else if pos.contains("angular") {
            TechTable::Angular
        } else if pos.contains("fullstack") {
            if pos.contains("java_angular") {
                TechTable::FullstackJavaAngular
            } else if pos.contains("java_react") {
                TechTable::FullstackJavaReact
            } else if pos.contains("dotnet_angular") {
                TechTable::FullstackDotnetAngular
            } else if pos.contains("dotnet_react") {
                TechTable::FullstackDotnetReact
            } else {
                TechTable::Generic
            }
        } else {
            TechTable::Generic
        }
    }

    pub fn questions_table(self) -> &'static str {
        match self {
            TechTable::Dotnet => "app_dotnet_l2_feedback_questions",
            TechTable::Java => "app_java_l2_feedback_questions",
            TechTable::React => "app_react_l2_feedback_questions",
            TechTable::Angular => "app_angular_l2_feedback_questions",
            TechTable::FullstackJavaAngular => "app_java_angular_fullstack_feedback_questions",
            TechTable::FullstackJavaReact => "app_java_react_fullstack_feedback_questions",
            TechTable::FullstackDotnetAngular => "app_dotnet_angular_fullstack_feedback_questions",
            TechTable::FullstackDotnetReact => "app_dotnet_react_fullstack_feedback_questions",
            TechTable::Generic => "app_generic_feedback_questions",
        }
    }

    pub fn response_table(self) -> &'static str {
        match self {
            TechTable::Dotnet => "app_dotnet_l2_feedback_response",
            TechTable::Java => "app_java_l2_feedback_response",
            TechTable::React => "app_react_l2_feedback_response",
            TechTable::Angular => "app_angular_l2_feedback_response",
            TechTable::FullstackJavaAngular => "app_java_angular_fullstack_feedback_response",
            TechTable::FullstackJavaReact => "app_java_react_fullstack_feedback_response",
            TechTable::FullstackDotnetAngular => "app_dotnet_angular_fullstack_feedback_response",
            TechTable::FullstackDotnetReact => "app_dotnet_react_fullstack_feedback_response",
            TechTable::Generic => "app_generic_feedback_response",
        }
    }
}

/// A combined full-stack track with its own question and response tables.
/// These are reached only through explicit combo routes, never through
/// position matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullstackCombo {
    JavaAngular,
    JavaReact,
    DotnetAngular,
    DotnetReact,
}

impl FullstackCombo {
    pub fn questions_table(self) -> &'static str {
        match self {
            FullstackCombo::JavaAngular => "app_java_angular_l2_feedback_questions",
            FullstackCombo::JavaReact => "app_java_react_l2_feedback_questions",
            FullstackCombo::DotnetAngular => "app_dotnet_angular_l2_feedback_questions",
            FullstackCombo::DotnetReact => "app_dotnet_react_l2_feedback_questions",
        }
    }

    pub fn response_table(self) -> &'static str {
        match self {
            FullstackCombo::JavaAngular => "app_java_angular_l2_feedback_response",
            FullstackCombo::JavaReact => "app_java_react_l2_feedback_response",
            FullstackCombo::DotnetAngular => "app_dotnet_angular_l2_feedback_response",
            FullstackCombo::DotnetReact => "app_dotnet_react_l2_feedback_response",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FullstackCombo::JavaAngular => "Java Angular",
            FullstackCombo::JavaReact => "Java React",
            FullstackCombo::DotnetAngular => ".NET Angular",
            FullstackCombo::DotnetReact => ".NET React",
        }
    }
}

impl FromStr for FullstackCombo {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java_angular" => Ok(FullstackCombo::JavaAngular),
            "java_react" => Ok(FullstackCombo::JavaReact),
            "dotnet_angular" => Ok(FullstackCombo::DotnetAngular),
            "dotnet_react" => Ok(FullstackCombo::DotnetReact),
            other => Err(AppError::NotFound(format!(
                "Unknown fullstack track: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_resolution_order() {
        assert_eq!(TechTable::for_position("dotnet developer"), TechTable::Dotnet);
        assert_eq!(TechTable::for_position(".NET Engineer"), TechTable::Dotnet);
        assert_eq!(TechTable::for_position("Senior Java Engineer"), TechTable::Java);
        assert_eq!(TechTable::for_position("react dev"), TechTable::React);
        assert_eq!(TechTable::for_position("Angular Developer"), TechTable::Angular);
        assert_eq!(TechTable::for_position("Platform Engineer"), TechTable::Generic);
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        assert_eq!(TechTable::for_position("JAVA Architect"), TechTable::Java);
        assert_eq!(TechTable::for_position("DotNet Lead"), TechTable::Dotnet);
    }

    #[test]
    fn test_combined_positions_collapse_to_first_substring() {
        // The ordered match means a combined position is stored under its
        // first matching track, not under the fullstack tables.
        assert_eq!(TechTable::for_position("java_angular_fullstack"), TechTable::Java);
        assert_eq!(TechTable::for_position("java_react_fullstack"), TechTable::Java);
        assert_eq!(
            TechTable::for_position("dotnet_react_fullstack"),
            TechTable::Dotnet
        );
    }

    #[test]
    fn test_fullstack_without_known_stack_is_generic() {
        assert_eq!(TechTable::for_position("mendix fullstack"), TechTable::Generic);
    }

    #[test]
    fn test_track_table_names() {
        assert_eq!(
            TechTable::Generic.response_table(),
            "app_generic_feedback_response"
        );
        assert_eq!(
            TechTable::Java.questions_table(),
            "app_java_l2_feedback_questions"
        );
    }

    #[test]
    fn test_fullstack_combo_parses_from_route_param() {
        assert_eq!(
            "java_angular".parse::<FullstackCombo>().unwrap(),
            FullstackCombo::JavaAngular
        );
        assert_eq!(
            "dotnet_react".parse::<FullstackCombo>().unwrap(),
            FullstackCombo::DotnetReact
        );
        assert!(matches!(
            "python_django".parse::<FullstackCombo>(),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_fullstack_combo_tables_are_distinct_from_position_matching() {
        // The combo surface writes to its own table even though position
        // matching would send the same candidate to the Java tables.
        assert_eq!(
            FullstackCombo::JavaAngular.response_table(),
            "app_java_angular_l2_feedback_response"
        );
        assert_ne!(
            FullstackCombo::JavaAngular.response_table(),
            TechTable::for_position("java_angular_fullstack").response_table()
        );
    }
}
