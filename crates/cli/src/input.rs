use anyhow::{Context, Result};
use safeher_common::SafetyError;
use std::io::Read;
use std::path::Path;

/// Read a whole reply from `path`, or from stdin when no path is given
pub fn read_reply(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read reply from stdin")?;
            if buffer.trim().is_empty() {
                return Err(SafetyError::InvalidInput("no reply text on stdin".to_string()).into());
            }
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_reply_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Stay where it's bright. [RISK: MEDIUM - 45%]").unwrap();

        let reply = read_reply(Some(file.path())).unwrap();
        assert_eq!(reply, "Stay where it's bright. [RISK: MEDIUM - 45%]");
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_reply(Some(Path::new("/nonexistent/reply.txt"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/reply.txt"));
    }
}
