use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Collaborator '{program}' failed with {}", describe_exit(.code))]
    CollaboratorFailure {
        program: String,
        args: Vec<String>,
        code: Option<i32>,
    },

    #[error("Failed to launch '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Collaborator,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ProvisionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CollaboratorFailure { .. } | Self::SpawnError { .. } => {
                ErrorCategory::Collaborator
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::Medium,
            Self::CollaboratorFailure { .. } | Self::SpawnError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::CollaboratorFailure { program, .. } => format!(
                "Check the output of {} above; networks and containers created so far were left in place",
                program
            ),
            Self::SpawnError { program, .. } => format!(
                "Make sure {} exists and is executable, or pass --scripts-dir",
                program
            ),
            Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the profile", field)
            }
            Self::MissingConfigError { field } => format!("Add '{}' to the profile", field),
            Self::ConfigError { .. } => "Check the profile file syntax".to_string(),
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
            Self::SerializationError(_) => "Report this as a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Collaborator => format!("Provisioning aborted: {}", self),
            ErrorCategory::Configuration => format!("Invalid profile: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// A failing collaborator hands its own exit code back to the caller.
    pub fn exit_code(&self) -> i32 {
        if let Self::CollaboratorFailure {
            code: Some(code), ..
        } = self
        {
            if *code != 0 {
                return *code;
            }
        }

        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
