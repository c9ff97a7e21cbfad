use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::PortfolioContent;
use super::parse::parse_content;

const EMBEDDED_CONTENT: &str = include_str!("../../assets/content.json");

pub const RESUME_TEXT: &str = include_str!("../../assets/resume.txt");
pub const RESUME_FILE_NAME: &str = "resume.txt";

pub fn load_content(override_path: Option<&Path>) -> Result<PortfolioContent> {
    match override_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read content file {}", path.display()))?;
            parse_content(&raw)
                .with_context(|| format!("failed to parse content file {}", path.display()))
        }
        None => parse_content(EMBEDDED_CONTENT).context("embedded content is invalid"),
    }
}

pub fn export_resume(dir: &Path) -> Result<(PathBuf, u64)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create download directory {}", dir.display()))?;
    let path = dir.join(RESUME_FILE_NAME);
    fs::write(&path, RESUME_TEXT)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok((path, RESUME_TEXT.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses() {
        let content = load_content(None).unwrap();
        assert!(!content.skill_groups.is_empty());
        assert!(!content.career.is_empty());
        assert!(!content.methodology.is_empty());
    }

    #[test]
    fn missing_override_reports_path() {
        let error = load_content(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(format!("{error:#}").contains("/definitely/not/here.json"));
    }

    #[test]
    fn resume_is_not_empty() {
        assert!(RESUME_TEXT.lines().count() > 3);
    }

    #[test]
    fn export_writes_resume_into_new_directory() {
        let dir = std::env::temp_dir().join(format!("silicon-folio-export-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let (path, bytes) = export_resume(&dir.join("nested")).unwrap();
        assert_eq!(path.file_name().and_then(|name| name.to_str()), Some(RESUME_FILE_NAME));
        assert_eq!(bytes, RESUME_TEXT.len() as u64);
        assert_eq!(fs::read_to_string(&path).unwrap(), RESUME_TEXT);

        let _ = fs::remove_dir_all(&dir);
    }
}
