use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Config(String),
    Selection(String),
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Selection(msg) => write!(f, "Selection error: {msg}"),
            Self::General(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<waypoint_core::config::ConfigError> for CliError {
    fn from(error: waypoint_core::config::ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}

impl From<waypoint_core::selection::SelectionError> for CliError {
    fn from(error: waypoint_core::selection::SelectionError) -> Self {
        Self::Selection(error.to_string())
    }
}

impl From<waypoint_core::rpc::ProbeError> for CliError {
    fn from(error: waypoint_core::rpc::ProbeError) -> Self {
        Self::General(error.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;

pub fn print_success(message: &str) {
    println!("[SUCCESS] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn print_info(message: &str) {
    println!("[INFO] {message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display_config() {
        let error = CliError::Config("invalid config".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid config");
    }

    #[test]
    fn test_cli_error_display_selection() {
        let error = CliError::Selection("no healthy endpoint available".to_string());
        assert_eq!(error.to_string(), "Selection error: no healthy endpoint available");
    }

    #[test]
    fn test_cli_error_display_general() {
        let error = CliError::General("something went wrong".to_string());
        assert_eq!(error.to_string(), "Error: something went wrong");
    }

    #[test]
    fn test_cli_error_from_selection_error() {
        let cli_error: CliError =
            waypoint_core::selection::SelectionError::NoHealthyEndpoint.into();
        match cli_error {
            CliError::Selection(msg) => assert!(msg.contains("no healthy endpoint")),
            other => panic!("Expected Selection variant, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_error_implements_error_trait() {
        let error = CliError::General("test".to_string());
        let _: &dyn std::error::Error = &error;
    }
}
