//! Bundled page assets.
//!
//! Generated pages reference a stylesheet and `jquery.js` sitting next to
//! them. Both are copied into the output directory once per run, sourced
//! from the directory of the running executable — where a deployment ships
//! them — and skipped when source and destination are the same file. When
//! no stylesheet is installed, the compile-time default takes its place;
//! a user stylesheet passed with `-s` overrides both and is referenced by
//! its own basename.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fallback written when no style.css is installed next to the binary.
const DEFAULT_STYLESHEET: &str = include_str!("../static/style.css");

const STYLESHEET_NAME: &str = "style.css";
const SCRIPT_NAME: &str = "jquery.js";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("can not copy {src} to {dest}: {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        source: std::io::Error,
    },
    #[error("can not write {dest}: {source}")]
    Write {
        dest: PathBuf,
        source: std::io::Error,
    },
}

/// The filename pages reference for their stylesheet: the basename of the
/// `-s` override, or `style.css`.
pub fn stylesheet_name(style: Option<&Path>) -> String {
    style
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| STYLESHEET_NAME.to_string())
}

/// Copy the stylesheet and `jquery.js` into the output directory.
///
/// The first failure is returned; the caller reports it and proceeds — a
/// missing stylesheet degrades the pages, it does not invalidate them.
pub fn install(output_dir: &Path, style: Option<&Path>) -> Result<(), AssetError> {
    let exe_dir = install_dir();

    match style {
        // explicit -s: the user's file, under its own basename
        Some(src) => {
            let dest = output_dir.join(stylesheet_name(Some(src)));
            copy_unless_same(src, &dest)?;
        }
        // installed style.css, or the bundled default
        None => {
            let dest = output_dir.join(STYLESHEET_NAME);
            let installed = exe_dir.as_deref().map(|dir| dir.join(STYLESHEET_NAME));
            match installed.filter(|src| src.is_file()) {
                Some(src) => copy_unless_same(&src, &dest)?,
                None => {
                    if !dest.is_file() {
                        fs::write(&dest, DEFAULT_STYLESHEET).map_err(|source| {
                            AssetError::Write {
                                dest: dest.clone(),
                                source,
                            }
                        })?;
                    }
                }
            }
        }
    }

    let script = exe_dir.as_deref().map(|dir| dir.join(SCRIPT_NAME));
    match script.filter(|src| src.is_file()) {
        Some(src) => copy_unless_same(&src, &output_dir.join(SCRIPT_NAME))?,
        None => eprintln!("warning: no {SCRIPT_NAME} alongside the executable; entries will not collapse"),
    }
    Ok(())
}

/// Directory of the running executable, when it can be resolved.
fn install_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn copy_unless_same(src: &Path, dest: &Path) -> Result<(), AssetError> {
    if same_file(src, dest) {
        return Ok(());
    }
    fs::copy(src, dest).map_err(|source| AssetError::Copy {
        src: src.to_path_buf(),
        dest: dest.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// True only when both paths resolve to the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
