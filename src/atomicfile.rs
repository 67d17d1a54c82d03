//! Write a results file so that readers never see it half-written.

use tempfile::NamedTempFile;

use std::io::{Error, ErrorKind, Result, Write};
use std::path::{Path, PathBuf};

/// A file that is written to a temporary sibling and only moved into
/// place by [`AtomicFile::commit`].  Dropping it without committing
/// leaves any existing file at the destination untouched.
pub struct AtomicFile {
    path: PathBuf,
    temp: NamedTempFile,
}

impl AtomicFile {
    /// Start writing `p`.  The temporary file lives in the same
    /// directory so that the final rename cannot cross filesystems.
    pub fn create<P: AsRef<Path>>(p: P) -> Result<AtomicFile> {
        let path = p.as_ref();
        let dir = match path.parent() {
            None => {
                return Err(Error::new(ErrorKind::Other,
                                      format!("Cannot create a file named {:?}", path)));
            }
            Some(d) if d.as_os_str().is_empty() => Path::new("."),
            Some(d) => d,
        };
        Ok(AtomicFile {
            path: PathBuf::from(path),
            temp: NamedTempFile::new_in(dir)?,
        })
    }

    /// Flush everything to disk and move the file into place.
    pub fn commit(mut self) -> Result<()> {
        self.temp.flush()?;
        self.temp.as_file().sync_data()?;
        self.temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.temp.write(buf)
    }
    fn flush(&mut self) -> Result<()> {
        self.temp.flush()
    }
}

#[test]
fn nothing_appears_until_commit() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.yaml");
    let mut f = AtomicFile::create(&target).unwrap();
    f.write_all(b"sweeps: 1\n").unwrap();
    assert!(!target.exists());
    f.commit().unwrap();
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "sweeps: 1\n");
}

#[test]
fn dropping_keeps_the_old_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.yaml");
    std::fs::write(&target, "old").unwrap();
    {
        let mut f = AtomicFile::create(&target).unwrap();
        f.write_all(b"new").unwrap();
    }
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "old");
}
