//! Input document resolution.
//!
//! Each command-line argument names one or more documents:
//!
//! | Argument | Documents |
//! |----------|-----------|
//! | `-` | standard input |
//! | directory | non-hidden regular files directly inside it, sorted |
//! | glob pattern (`*`, `?`, `[`) | matching files, sorted |
//! | anything else | that path, read as-is |
//!
//! Documents whose name ends in [`GUI_SUFFIX`] only run when a graphical
//! display is available.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// File-name suffix marking a document as GUI-only.
pub const GUI_SUFFIX: &str = ".gui";

/// Argument naming standard input.
pub const STDIN_ARG: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn name(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    pub fn is_gui_only(&self) -> bool {
        match self {
            Source::Stdin => false,
            Source::File(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(GUI_SUFFIX)),
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            Source::Stdin => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read stdin")?;
                Ok(text)
            }
            Source::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }
}

/// A document loaded into memory.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: Source,
    pub text: String,
}

/// Expand command-line arguments into document sources, in argument order.
pub fn resolve(args: &[String]) -> Result<Vec<Source>> {
    let mut sources = Vec::new();
    for arg in args {
        if arg == STDIN_ARG {
            sources.push(Source::Stdin);
            continue;
        }
        let path = Path::new(arg);
        if path.is_dir() {
            sources.extend(scan_dir(path)?.into_iter().map(Source::File));
            continue;
        }
        if is_glob(arg) && !path.exists() {
            let mut matches: Vec<PathBuf> = glob::glob(arg)
                .with_context(|| format!("invalid glob pattern: {arg}"))?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .collect();
            if matches.is_empty() {
                tracing::warn!("no files matched: {arg}");
            }
            matches.sort();
            sources.extend(matches.into_iter().map(Source::File));
            continue;
        }
        sources.push(Source::File(path.to_path_buf()));
    }
    Ok(sources)
}

/// Drop GUI-only documents when no display is available.
pub fn filter_gui(sources: Vec<Source>, display: bool) -> Vec<Source> {
    sources
        .into_iter()
        .filter(|source| {
            let keep = display || !source.is_gui_only();
            if !keep {
                tracing::info!("skipping {}: no graphical display", source.name());
            }
            keep
        })
        .collect()
}

/// Read every source, failing on the first unreadable one.
pub fn load(sources: Vec<Source>) -> Result<Vec<Document>> {
    sources
        .into_iter()
        .map(|source| {
            let text = source.read()?;
            Ok(Document { source, text })
        })
        .collect()
}

/// True when `DISPLAY` or `WAYLAND_DISPLAY` is set to something non-empty.
pub fn display_available() -> bool {
    display_from(|key| std::env::var(key).ok())
}

fn display_from(lookup: impl Fn(&str) -> Option<String>) -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|key| lookup(key).is_some_and(|v| !v.is_empty()))
}

fn is_glob(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !n.starts_with('.'))
        })
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(path: &str) -> Source {
        Source::File(PathBuf::from(path))
    }

    #[test]
    fn gui_suffix_detection() {
        assert!(file("foo.gui").is_gui_only());
        assert!(file("dir/setup.gui").is_gui_only());
        assert!(!file("foo.gui.bak").is_gui_only());
        assert!(!file("gui").is_gui_only());
        assert!(!Source::Stdin.is_gui_only());
    }

    #[test]
    fn filter_gui_without_display() {
        let sources = vec![file("a"), file("b.gui"), Source::Stdin];
        assert_eq!(filter_gui(sources, false), vec![file("a"), Source::Stdin]);
    }

    #[test]
    fn filter_gui_with_display() {
        let sources = vec![file("a"), file("b.gui")];
        assert_eq!(filter_gui(sources.clone(), true), sources);
    }

    #[test]
    fn display_detection() {
        assert!(display_from(|k| (k == "DISPLAY").then(|| ":0".to_string())));
        assert!(display_from(|k| (k == "WAYLAND_DISPLAY").then(|| "wayland-0".to_string())));
        assert!(!display_from(|_| Some(String::new())));
        assert!(!display_from(|_| None));
    }

    #[test]
    fn resolves_stdin_and_plain_paths() {
        let args = vec!["-".to_string(), "/nonexistent/doc".to_string()];
        assert_eq!(
            resolve(&args).unwrap(),
            vec![Source::Stdin, file("/nonexistent/doc")]
        );
    }

    #[test]
    fn resolves_directory_sorted_without_hidden() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b"), "").unwrap();
        fs::write(dir.path().join("a.gui"), "").unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let args = vec![dir.path().to_string_lossy().to_string()];
        let sources = resolve(&args).unwrap();
        assert_eq!(
            sources,
            vec![
                Source::File(dir.path().join("a.gui")),
                Source::File(dir.path().join("b")),
            ]
        );
    }

    #[test]
    fn resolves_glob_patterns() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("x.tree"), "").unwrap();
        fs::write(dir.path().join("y.tree"), "").unwrap();
        fs::write(dir.path().join("z.txt"), "").unwrap();

        let pattern = format!("{}/*.tree", dir.path().display());
        let sources = resolve(&[pattern]).unwrap();
        assert_eq!(
            sources,
            vec![
                Source::File(dir.path().join("x.tree")),
                Source::File(dir.path().join("y.tree")),
            ]
        );
    }

    #[test]
    fn unmatched_glob_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.none", dir.path().display());
        assert!(resolve(&[pattern]).unwrap().is_empty());
    }

    #[test]
    fn load_reports_unreadable_path() {
        let err = load(vec![file("/nonexistent/cmdtree/doc")]).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read /nonexistent/cmdtree/doc"));
    }

    #[test]
    fn load_reads_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc");
        fs::write(&path, "ls\n").unwrap();
        let docs = load(vec![Source::File(path)]).unwrap();
        assert_eq!(docs[0].text, "ls\n");
    }
}
