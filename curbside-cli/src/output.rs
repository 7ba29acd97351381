//! Writing command results to stdout and GeoJSON files.

use std::io::{self, Write};
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use serde::Serialize;

use crate::CliError;

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

/// Write a GeoJSON document to `path`, creating parent directories.
pub(crate) fn write_geojson(path: &Utf8Path, document: &serde_json::Value) -> Result<(), CliError> {
    let wrap = |source| CliError::WriteGeoJson {
        path: path.to_path_buf(),
        source,
    };
    let payload = serde_json::to_vec_pretty(document).map_err(CliError::SerializeOutput)?;
    let (dir, file_name) = open_parent_dir(path).map_err(wrap)?;
    dir.write(file_name.as_str(), payload).map_err(wrap)
}

/// Open the parent of `path` (creating it when missing) and return it with
/// the file name.
fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let (base, relative) = split_base(parent);
    let base_dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    if relative.as_str().is_empty() || relative.as_str() == "." {
        return Ok((base_dir, file_name));
    }
    base_dir.create_dir_all(&relative)?;
    Ok((base_dir.open_dir(&relative)?, file_name))
}

/// Split `parent` into an ambient base directory and a relative suffix.
fn split_base(parent: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    match parent.as_std_path().components().next() {
        Some(Component::RootDir) => {
            let root = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = parent
                .strip_prefix(&root)
                .map_or_else(|_| parent.to_path_buf(), Utf8Path::to_path_buf);
            (root, relative)
        }
        _ => (Utf8PathBuf::from("."), parent.to_path_buf()),
    }
}
