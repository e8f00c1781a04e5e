use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::synthesize::Program;

pub trait Output: Default {
    fn write(&self, program: &Program, out_path: impl AsRef<Path>) -> io::Result<()>;
}

/// Writes nothing. Used in tests.
#[derive(Default)]
pub struct Discard;

impl Output for Discard {
    fn write(&self, _program: &Program, _out_path: impl AsRef<Path>) -> io::Result<()> {
        Ok(())
    }
}

/// Text `.hack` file, one 16-digit binary word per line.
///
/// The file is written next to its destination under a `.tmp` suffix and renamed into place once
/// complete, so a failed run never leaves a truncated output behind.
#[derive(Default)]
pub struct HackFile;

impl Output for HackFile {
    fn write(&self, program: &Program, out_path: impl AsRef<Path>) -> io::Result<()> {
        let out_path = out_path.as_ref();
        let tmp_path = tmp_path(out_path);

        let result = File::create(&tmp_path)
            .and_then(|file| program.write_to(BufWriter::new(file)))
            .and_then(|()| fs::rename(&tmp_path, out_path));

        if result.is_err() {
            // the rename never happened, only the temporary file can exist
            let _ = fs::remove_file(&tmp_path);
        } else {
            debug!(path = %out_path.display(), words = program.len(), "wrote output");
        }

        result
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
