//! Work discovery: enumerating files directly under the input root.

use std::path::Path;

use walkdir::WalkDir;

use crate::types::WorkItem;

/// Discover all regular files directly under `input_root` (non-recursive).
///
/// Every file entry becomes a work item regardless of extension; files
/// that turn out not to be images surface later as item-level decode
/// failures, not as discovery errors. Results are sorted by path so runs
/// are deterministic even though filesystem order is not.
pub fn discover(input_root: &Path) -> Vec<WorkItem> {
    let mut items: Vec<WorkItem> = WalkDir::new(input_root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| WorkItem::new(e.path()))
        .collect();

    items.sort();
    items
}

/// Deterministic partition for multi-producer discovery: producer
/// `producer_id` of `producers` keeps every `producers`-th item, so no
/// two producers ever push the same path.
pub fn stripe(items: Vec<WorkItem>, producer_id: usize, producers: usize) -> Vec<WorkItem> {
    items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % producers == producer_id)
        .map(|(_, item)| item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_only_top_level_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"x").unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("deep.png"), b"x").unwrap();

        let items = discover(dir.path());

        // Sorted, top-level files only; the subdirectory and its contents
        // are excluded, non-images are not.
        let names: Vec<_> = items
            .iter()
            .map(|i| i.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "notes.txt"]);
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).is_empty());
    }

    #[test]
    fn test_stripes_partition_without_overlap() {
        let items: Vec<WorkItem> = (0..10)
            .map(|i| WorkItem::new(format!("{i}.png")))
            .collect();

        let a = stripe(items.clone(), 0, 3);
        let b = stripe(items.clone(), 1, 3);
        let c = stripe(items.clone(), 2, 3);

        assert_eq!(a.len() + b.len() + c.len(), items.len());
        let mut merged = [a, b, c].concat();
        merged.sort();
        let mut expected = items;
        expected.sort();
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_single_producer_stripe_is_identity() {
        let items: Vec<WorkItem> = (0..4)
            .map(|i| WorkItem::new(format!("{i}.png")))
            .collect();
        assert_eq!(stripe(items.clone(), 0, 1), items);
    }
}
