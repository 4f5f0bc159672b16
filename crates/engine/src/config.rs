use crate::core::RotationPolicy;
use crate::types::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub grid_size: u8,
    /// JSON palette catalog; the builtin catalog when unset.
    pub pieces_path: Option<String>,
    pub rotation_policy: RotationPolicy,
    /// Log file; logging is disabled when unset.
    pub log_path: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            pieces_path: None,
            rotation_policy: RotationPolicy::default(),
            log_path: None,
        }
    }
}

impl EditorConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment, in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let grid_size = non_empty("GRID_SANDBOX_SIZE")
            .and_then(|s| s.parse::<u8>().ok())
            .map(|n| n.clamp(1, MAX_GRID_SIZE))
            .unwrap_or(DEFAULT_GRID_SIZE);

        let rotation_policy = non_empty("GRID_SANDBOX_ROTATION")
            .and_then(|s| RotationPolicy::from_str(&s))
            .unwrap_or_default();

        Self {
            grid_size,
            pieces_path: non_empty("GRID_SANDBOX_PIECES"),
            rotation_policy,
            log_path: non_empty("GRID_SANDBOX_LOG_PATH"),
        }
    }
}
