// src/input.rs
// =============================================================================
// Loads the list of root domains to crawl.
//
// Format: one URL per line. Surrounding whitespace is trimmed, blank lines
// and lines starting with '#' are skipped, order is kept.
//
// Entries are not validated here. A malformed line only fails its own
// domain later on; an unreadable or empty file stops the whole run.
// =============================================================================

use anyhow::{bail, Context, Result};
use std::path::Path;

pub fn load_root_domains(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read root domain list {}", path.display()))?;

    let roots = parse_root_domains(&content);
    if roots.is_empty() {
        bail!("root domain list {} is empty", path.display());
    }

    Ok(roots)
}

fn parse_root_domains(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_blanks_and_comments() {
        let content = "# targets\nhttp://a.test\n\n  http://b.test  \r\n# done\n";
        assert_eq!(
            parse_root_domains(content),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_parse_keeps_malformed_entries() {
        assert_eq!(parse_root_domains("not a url\n"), vec!["not a url"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http://a.test").unwrap();
        writeln!(file, "http://b.test").unwrap();

        let roots = load_root_domains(file.path()).unwrap();
        assert_eq!(roots, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_root_domains(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read root domain list"));
    }

    #[test]
    fn test_empty_list_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();

        assert!(load_root_domains(file.path()).is_err());
    }
}
