/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use std::{
    fs,
    path::{Path, PathBuf},
};

/// Returns `target` itself if it is a file, otherwise every `*.vb` file below it, sorted.
///
/// A missing `target` yields no ROMs. Symlinked directories are not followed, and a directory
/// that can't be listed is logged and skipped.
pub fn find_roms(target: &Path) -> Vec<PathBuf> {
    if target.is_file() {
        return vec![target.to_path_buf()];
    }

    let mut roms = Vec::new();
    if target.is_dir() {
        collect_roms(target, &mut roms);
    }
    roms.sort();

    roms
}

fn collect_roms(dir: &Path, roms: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Skipping {:?}: {}", dir, e);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping entry of {:?}: {}", dir, e);
                continue;
            }
        };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();

        if file_type.is_dir() {
            collect_roms(&path, roms);
        } else if path.is_file() && path.extension().is_some_and(|ext| ext == "vb") {
            roms.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn finds_nested_roms_sorted() {
        let root = std::env::temp_dir().join(format!("vb-disasm-rom-search-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("b/nested")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/nested/z.vb"), [0u8; 4]).unwrap();
        fs::write(root.join("a/y.vb"), [0u8; 4]).unwrap();
        fs::write(root.join("a/notes.txt"), "x").unwrap();
        fs::write(root.join("c.VB"), [0u8; 4]).unwrap();

        let roms = find_roms(&root);

        assert_eq!(roms, [root.join("a/y.vb"), root.join("b/nested/z.vb")]);
        assert_eq!(
            find_roms(&root.join("a/y.vb")),
            [root.join("a/y.vb")]
        );
        assert_eq!(find_roms(&root.join("missing")), Vec::<PathBuf>::new());

        fs::remove_dir_all(&root).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let root = std::env::temp_dir().join(format!("vb-disasm-rom-loop-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/a.vb"), [0u8; 4]).unwrap();
        std::os::unix::fs::symlink(&root, root.join("sub/loop")).unwrap();
        std::os::unix::fs::symlink(root.join("sub/a.vb"), root.join("linked.vb")).unwrap();

        let roms = find_roms(&root);

        assert_eq!(roms, [root.join("linked.vb"), root.join("sub/a.vb")]);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn unlistable_directory_is_skipped() {
        let mut roms = vec![PathBuf::from("kept.vb")];

        collect_roms(Path::new("/nonexistent/vb-disasm/roms"), &mut roms);

        assert_eq!(roms, [PathBuf::from("kept.vb")]);
    }
}
