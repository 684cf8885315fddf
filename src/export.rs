//! CSV export for gathered member lists
//!
//! Files are written as `users_<chat_name>.csv`, UTF-16 with a byte order
//! mark, one file per channel.

use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::members::Member;

/// Fixed column order of the exported files.
pub const CSV_HEADER: [&str; 4] = ["first_name", "last_name", "username", "phone"];

/// Serialize members to CSV text. The header row is always present;
/// absent fields become empty cells.
pub fn members_to_csv(members: &[Member]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for member in members {
        writer.serialize(member)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::SerializationError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::SerializationError(e.to_string()))
}

/// Encode text as little-endian UTF-16 with a byte order mark.
fn encode_utf16(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&[0xFF, 0xFE]);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Write members to `users_<chat_name>.csv` in the working directory,
/// creating or truncating the file.
pub fn write_members_csv(chat_name: &str, members: &[Member]) -> Result<PathBuf> {
    let path = PathBuf::from(format!("users_{}.csv", chat_name));
    let csv = members_to_csv(members)?;
    fs::write(&path, encode_utf16(&csv))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::{Path, PathBuf};
    use std::sync::{LazyLock, Mutex};
    use tempfile::TempDir;

    static WORKDIR_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

    struct DirGuard {
        original: PathBuf,
    }

    impl DirGuard {
        fn enter(temp: &TempDir) -> Self {
            let original = env::current_dir().expect("current dir");
            env::set_current_dir(temp.path()).expect("set current dir");
            Self { original }
        }
    }

    impl Drop for DirGuard {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.original);
        }
    }

    fn decode_utf16(path: &Path) -> String {
        let bytes = std::fs::read(path).expect("read export");
        assert_eq!(&bytes[..2], &[0xFF, 0xFE], "missing UTF-16LE BOM");

        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).expect("valid UTF-16")
    }

    fn sample_member() -> Member {
        Member {
            first_name: Some("A".to_string()),
            last_name: Some("B".to_string()),
            username: Some("@c".to_string()),
            phone: None,
        }
    }

    #[test]
    fn header_is_written_even_without_members() {
        let csv = members_to_csv(&[]).unwrap();
        assert_eq!(csv, "first_name,last_name,username,phone\n");
    }

    #[test]
    fn absent_fields_become_empty_cells() {
        let csv = members_to_csv(&[sample_member()]).unwrap();
        assert_eq!(csv, "first_name,last_name,username,phone\nA,B,@c,\n");
    }

    #[test]
    fn written_file_is_utf16_with_bom() {
        let _lock = WORKDIR_LOCK.lock().unwrap();
        let temp = tempfile::tempdir().expect("tempdir");
        let _guard = DirGuard::enter(&temp);

        let path = write_members_csv("testchan", &[sample_member()]).unwrap();
        assert_eq!(path, PathBuf::from("users_testchan.csv"));

        let text = decode_utf16(&path);
        assert!(text.starts_with("first_name,last_name,username,phone\n"));
        assert!(text.contains("A,B,@c,"));
    }

    #[test]
    fn csv_round_trips_through_the_file() {
        let _lock = WORKDIR_LOCK.lock().unwrap();
        let temp = tempfile::tempdir().expect("tempdir");
        let _guard = DirGuard::enter(&temp);

        let original = vec![sample_member()];
        let path = write_members_csv("roundtrip", &original).unwrap();

        let text = decode_utf16(&path);
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let restored: Vec<Member> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .expect("parse exported CSV");

        assert_eq!(restored, original);
        assert_eq!(restored[0].phone, None);
    }

    #[test]
    fn existing_file_is_truncated() {
        let _lock = WORKDIR_LOCK.lock().unwrap();
        let temp = tempfile::tempdir().expect("tempdir");
        let _guard = DirGuard::enter(&temp);

        std::fs::write("users_stale.csv", b"old contents that should vanish").unwrap();
        write_members_csv("stale", &[]).unwrap();

        let text = decode_utf16(Path::new("users_stale.csv"));
        assert_eq!(text, "first_name,last_name,username,phone\n");
    }
}
