//! Writing artifact sets to disk.
//!
//! A set is written all-or-nothing: every file is staged next to its target
//! first, and targets are only replaced once all of them are staged. If a
//! replacement fails midway, the targets already replaced get their previous
//! contents back.

use derive_more::Display;
use std::{
    collections::HashSet,
    fs,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};
use tempfile::{Builder, NamedTempFile};
use thiserror::Error as ThisError;

const STAGING_PREFIX: &str = ".tablegen-";

///
/// OutputError
///

#[derive(Debug, ThisError)]
pub enum OutputError {
    #[error("more than one artifact targets '{name}'")]
    DuplicateTarget { name: String },

    #[error("cannot create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot stage {}: {source}", .path.display())]
    Stage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot replace {}: {source}", .path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{source}; restoring {} also failed: {restore}", .restore_path.display())]
    Restore {
        #[source]
        source: Box<Self>,
        restore_path: PathBuf,
        restore: io::Error,
    },
}

///
/// OutputFile
/// One artifact: file name inside the output directory and its contents.
///

#[derive(Clone, Copy, Debug)]
pub struct OutputFile<'a> {
    pub name: &'a str,
    pub contents: &'a str,
}

///
/// Staleness
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Staleness {
    #[display("missing")]
    Missing,
    #[display("out of date")]
    Differs,
}

///
/// StaleFile
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{} is {staleness}", path.display())]
pub struct StaleFile {
    pub path: PathBuf,
    pub staleness: Staleness,
}

// a replaced target and what to put back if a later replacement fails
struct Replaced {
    path: PathBuf,
    previous: Option<Vec<u8>>,
}

/// Write every file into `dir`, or none of them.
pub fn write_all(dir: &Path, files: &[OutputFile<'_>]) -> Result<Vec<PathBuf>, OutputError> {
    ensure_distinct(files)?;
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    // stage: nothing visible changes yet
    let mut staged = Vec::with_capacity(files.len());
    for file in files {
        let target = dir.join(file.name);
        let temp = stage(dir, file.contents).map_err(|source| OutputError::Stage {
            path: target.clone(),
            source,
        })?;
        staged.push((target, temp));
    }

    // commit; returning early drops the remaining staged files, which deletes them
    let mut replaced: Vec<Replaced> = Vec::with_capacity(staged.len());
    for (target, temp) in staged {
        match replace(&target, temp) {
            Ok(previous) => {
                tracing::debug!(path = %target.display(), "replaced");
                replaced.push(Replaced {
                    path: target,
                    previous,
                });
            }
            Err(err) => {
                return Err(match restore(replaced) {
                    Ok(()) => err,
                    Err((restore_path, restore)) => OutputError::Restore {
                        source: Box::new(err),
                        restore_path,
                        restore,
                    },
                });
            }
        }
    }

    Ok(replaced.into_iter().map(|r| r.path).collect())
}

/// Compare every file in `dir` with the expected contents.
pub fn check_all(dir: &Path, files: &[OutputFile<'_>]) -> Result<Vec<StaleFile>, OutputError> {
    ensure_distinct(files)?;
    let mut stale = Vec::new();

    for file in files {
        let path = dir.join(file.name);
        let staleness = match read_existing(&path)? {
            None => Some(Staleness::Missing),
            Some(bytes) if bytes != file.contents.as_bytes() => Some(Staleness::Differs),
            Some(_) => None,
        };
        if let Some(staleness) = staleness {
            stale.push(StaleFile { path, staleness });
        }
    }

    Ok(stale)
}

// Two files with one target would leave only the later one on disk.
fn ensure_distinct(files: &[OutputFile<'_>]) -> Result<(), OutputError> {
    let mut seen = HashSet::with_capacity(files.len());
    for file in files {
        let key = Path::new(file.name)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect::<PathBuf>();
        if !seen.insert(key) {
            return Err(OutputError::DuplicateTarget {
                name: file.name.to_string(),
            });
        }
    }

    Ok(())
}

fn stage(dir: &Path, contents: &str) -> io::Result<NamedTempFile> {
    let mut temp = Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;

    Ok(temp)
}

// Swap one staged file into place, returning what it replaced.
fn replace(target: &Path, temp: NamedTempFile) -> Result<Option<Vec<u8>>, OutputError> {
    let previous = read_existing(target)?;
    temp.persist(target).map_err(|err| OutputError::Replace {
        path: target.to_path_buf(),
        source: err.error,
    })?;

    Ok(previous)
}

fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, OutputError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(OutputError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// Undo replacements newest first; stops at the first failure.
fn restore(replaced: Vec<Replaced>) -> Result<(), (PathBuf, io::Error)> {
    for Replaced { path, previous } in replaced.into_iter().rev() {
        let res = match previous {
            Some(bytes) => fs::write(&path, bytes),
            None => fs::remove_file(&path),
        };
        res.map_err(|err| (path.clone(), err))?;
        tracing::debug!(path = %path.display(), "restored");
    }

    Ok(())
}

///
/// TESTS
///
