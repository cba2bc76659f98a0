use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use crate::sizer::DirEntry;

const KILOBYTE: u64 = 1024;

/// Whole kilobytes, truncated: 1023 bytes is 0KB.
pub fn to_kilobytes(bytes: u64) -> u64 {
    bytes / KILOBYTE
}

/// Stable sort on size alone; equal sizes keep their enumeration order.
pub fn sort_entries(entries: &mut [DirEntry], ascending: bool) {
    if ascending {
        entries.sort_by_key(|entry| entry.size_bytes);
    } else {
        entries.sort_by_key(|entry| Reverse(entry.size_bytes));
    }
}

/// Format one entry as `<KIND> <PATH> <N>KB`, optionally followed by its modification time.
pub fn render_line(entry: &DirEntry, show_time: bool) -> String {
    let path = entry.path.to_string_lossy().to_uppercase();
    let line = format!("{} {} {}KB", entry.kind, path, to_kilobytes(entry.size_bytes));

    if show_time {
        let date_time: DateTime<Utc> = entry.modified.into();
        format!("{}  {}", line, date_time.format("%Y %b %d %H:%M:%S"))
    } else {
        line
    }
}

/// Sort largest first and render every entry.
pub fn render(mut entries: Vec<DirEntry>) -> Vec<String> {
    sort_entries(&mut entries, false);
    entries
        .iter()
        .map(|entry| render_line(entry, false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizer::EntryKind;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn entry(path: &str, kind: EntryKind, size_bytes: u64) -> DirEntry {
        DirEntry {
            path: PathBuf::from(path),
            kind,
            size_bytes,
            modified: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn kilobytes_truncate() {
        assert_eq!(to_kilobytes(0), 0);
        assert_eq!(to_kilobytes(1023), 0);
        assert_eq!(to_kilobytes(1024), 1);
        assert_eq!(to_kilobytes(2047), 1);
        assert_eq!(to_kilobytes(4100), 4);
    }

    #[test]
    fn path_is_upper_cased() {
        let line = render_line(&entry("/tmp/data/file.txt", EntryKind::File, 10), false);
        assert_eq!(line, "FILE /TMP/DATA/FILE.TXT 0KB");
    }

    #[test]
    fn renders_largest_first() {
        let lines = render(vec![
            entry("/root/a.txt", EntryKind::File, 2048),
            entry("/root/sub", EntryKind::Dir, 4100),
        ]);
        assert_eq!(lines, vec!["DIR /ROOT/SUB 4KB", "FILE /ROOT/A.TXT 2KB"]);
    }

    #[test]
    fn sizes_never_increase_down_the_list() {
        let mut entries = vec![
            entry("/a", EntryKind::File, 5),
            entry("/b", EntryKind::File, 50_000),
            entry("/c", EntryKind::Dir, 0),
            entry("/d", EntryKind::Dir, 3_000),
            entry("/e", EntryKind::File, 3_000),
        ];
        sort_entries(&mut entries, false);
        assert!(entries
            .windows(2)
            .all(|pair| pair[0].size_bytes >= pair[1].size_bytes));
    }

    #[test]
    fn ties_keep_input_order() {
        let mut entries = vec![
            entry("/first", EntryKind::File, 7),
            entry("/big", EntryKind::File, 9),
            entry("/second", EntryKind::Dir, 7),
        ];
        sort_entries(&mut entries, false);
        let paths: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/big"),
                PathBuf::from("/first"),
                PathBuf::from("/second")
            ]
        );
    }

    #[test]
    fn ascending_puts_smallest_first() {
        let mut entries = vec![
            entry("/big", EntryKind::File, 9000),
            entry("/small", EntryKind::File, 1),
        ];
        sort_entries(&mut entries, true);
        assert_eq!(entries[0].path, PathBuf::from("/small"));
    }

    #[test]
    fn time_column_is_appended() {
        let mut e = entry("/x", EntryKind::Dir, 2048);
        e.modified = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400);
        assert_eq!(render_line(&e, true), "DIR /X 2KB  1970 Jan 02 00:00:00");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render(Vec::new()).is_empty());
    }
}
