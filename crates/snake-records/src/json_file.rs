use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;

use crate::PersistenceError;

/// Reads a JSON array, treating a missing file as empty.
pub(crate) fn read_array<T>(path: &Path) -> Result<Vec<T>, PersistenceError>
where
    T: DeserializeOwned,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
        Err(source) => {
            return Err(PersistenceError::Read {
                path: path.to_owned(),
                source,
            });
        }
    };
    serde_json::from_reader(BufReader::new(file)).map_err(|source| PersistenceError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Replaces the file at `path` with pretty-printed JSON.
///
/// The data is written to a temporary file in the same directory and renamed
/// into place, so readers see either the old or the new content.
pub(crate) fn write_atomic<T>(path: &Path, value: &T) -> Result<(), PersistenceError>
where
    T: Serialize + ?Sized,
{
    let write_err = |source| PersistenceError::Write {
        path: path.to_owned(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, value).map_err(|source| {
            if source.is_io() {
                write_err(source.into())
            } else {
                PersistenceError::Serialize {
                    path: path.to_owned(),
                    source,
                }
            }
        })?;
        writeln!(writer).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
