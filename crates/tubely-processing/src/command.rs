use crate::error::ProcessingError;
use std::path::Path;

const DANGEROUS_CHARS: [char; 11] = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];

/// Reject paths with shell metacharacters or directory traversal.
pub(crate) fn validate_path(path: &Path) -> Result<(), ProcessingError> {
    let path_str = path.to_string_lossy();

    if path_str.chars().any(|c| DANGEROUS_CHARS.contains(&c)) {
        return Err(ProcessingError::InvalidPath(format!(
            "Path contains dangerous characters: {}",
            path_str
        )));
    }

    if path_str.contains("..") {
        return Err(ProcessingError::InvalidPath(format!(
            "Path contains directory traversal: {}",
            path_str
        )));
    }

    Ok(())
}

/// Tool paths may be bare names resolved through PATH or absolute paths.
pub(crate) fn validate_executable(executable: &str) -> Result<(), ProcessingError> {
    let safe = !executable.is_empty()
        && executable.chars().all(|c| {
            c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
        });
    if !safe {
        return Err(ProcessingError::InvalidPath(format!(
            "Executable path contains unsafe characters: {}",
            executable
        )));
    }
    validate_path(Path::new(executable))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path(Path::new("/tmp/tubely-upload123.mp4")).is_ok());
        assert!(validate_path(Path::new("/tmp/a;rm -rf.mp4")).is_err());
        assert!(validate_path(Path::new("/tmp/../etc/passwd")).is_err());
    }

    #[test]
    fn test_validate_executable() {
        assert!(validate_executable("ffprobe").is_ok());
        assert!(validate_executable("/usr/local/bin/ffmpeg").is_ok());
        assert!(validate_executable("ffmpeg --help").is_err());
        assert!(validate_executable("").is_err());
    }
}
