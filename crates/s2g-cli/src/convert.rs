//! Implementation of the conversion command.
//!
//! Reads every input session log, converts the tool invocations to Gource
//! custom log lines and writes them, time-ordered, to stdout or a file.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use s2g_core::{BUFFER_SIZE, ConfigError, convert, write_log};

use crate::{Cli, Config};

/// Run the conversion.
///
/// Configuration and input problems are reported before anything is read or
/// written. Returns the number of lines written.
pub fn run(cli: &Cli, config: &Config) -> Result<usize> {
    let options = config
        .pipeline_options(cli)
        .context("invalid configuration")?;
    tracing::debug!(?options, "resolved pipeline options");

    let paths = expand_inputs(&cli.inputs)?;
    if paths.is_empty() {
        return Err(ConfigError::NoSources.into());
    }

    let mut readers = Vec::with_capacity(paths.len());
    for path in &paths {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        readers.push(BufReader::with_capacity(BUFFER_SIZE, file));
    }

    let conversion = convert(readers, &options)?;
    for (path, stats) in paths.iter().zip(&conversion.stats) {
        tracing::debug!(path = %path.display(), ?stats, "source summary");
    }

    let written = match &cli.output {
        Some(output) => {
            let file = File::create(output)
                .with_context(|| format!("failed to create {}", output.display()))?;
            let mut writer = BufWriter::new(file);
            write_log(&mut writer, &conversion.stream)
                .with_context(|| format!("failed to write {}", output.display()))?
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_log(&mut writer, &conversion.stream).context("failed to write to stdout")?
        }
    };

    tracing::debug!(events = written, "wrote gource log");
    Ok(written)
}

/// Resolve the input arguments to session files, keeping argument order.
///
/// A directory stands for the `*.jsonl` files directly inside it, sorted by
/// name so the result doesn't depend on directory listing order.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        let metadata = fs::metadata(input)
            .with_context(|| format!("cannot access input {}", input.display()))?;

        if metadata.is_dir() {
            paths.extend(session_files_in(input)?);
        } else {
            paths.push(input.clone());
        }
    }

    Ok(paths)
}

fn session_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "jsonl") {
            files.push(path);
        }
    }

    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), "no .jsonl files found in directory");
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_inputs_keeps_file_order() {
        let temp = TempDir::new().unwrap();
        let b = temp.path().join("b.jsonl");
        let a = temp.path().join("a.jsonl");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();

        let paths = expand_inputs(&[b.clone(), a.clone()]).unwrap();

        assert_eq!(paths, vec![b, a]);
    }

    #[test]
    fn test_expand_directory_sorted_jsonl_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("z-session.jsonl"), "").unwrap();
        fs::write(temp.path().join("a-session.jsonl"), "").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp.path().join("subagents")).unwrap();
        fs::write(temp.path().join("subagents").join("agent-a1.jsonl"), "").unwrap();

        let paths = expand_inputs(&[temp.path().to_path_buf()]).unwrap();

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a-session.jsonl", "z-session.jsonl"]);
    }

    #[test]
    fn test_expand_missing_input_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.jsonl");

        let err = expand_inputs(&[missing]).unwrap_err();

        assert!(err.to_string().contains("missing.jsonl"), "{err}");
    }

    #[test]
    fn test_expand_empty_directory() {
        let temp = TempDir::new().unwrap();
        let paths = expand_inputs(&[temp.path().to_path_buf()]).unwrap();
        assert!(paths.is_empty());
    }
}
