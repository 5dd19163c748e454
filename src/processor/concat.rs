//! GSOY concatenation module
//!
//! Stacks every per-station CSV found under the GSOY root into one table.
//! Files may disagree on their columns: the result carries the union of all
//! columns, with nulls where a file lacked one (diagonal concatenation).
//! A file that cannot be read is skipped with a warning.

use crate::error::Result;
use crate::models::ConcatStats;
use crate::processor::discovery::{CsvDiscovery, GroupedCsvFile};
use crate::processor::frames::read_text_frame;
use crate::processor::writer::CsvTableWriter;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::{DataFrame, IntoLazy, UnionArgs, concat_lf_diagonal};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of a concatenation run
#[derive(Debug)]
pub enum ConcatOutcome {
    /// Tables were stacked and written
    Written(ConcatStats),
    /// Nothing to concatenate; no file was written
    NoInput { root: PathBuf },
}

/// Tables read from a set of files
#[derive(Debug, Default)]
pub struct TableBatch {
    pub tables: Vec<DataFrame>,
    /// Groups that contributed at least one file, in visiting order
    pub groups_read: Vec<String>,
    pub files_failed: usize,
}

/// Read every file as a text table, skipping the ones that fail
pub fn read_tables(
    files: impl IntoIterator<Item = GroupedCsvFile>,
    progress: &ProgressBar,
) -> TableBatch {
    let mut batch = TableBatch::default();

    for file in files {
        if batch.groups_read.last() != Some(&file.group) {
            info!("Processing group directory: {}", file.group);
            batch.groups_read.push(file.group.clone());
        }

        if let Some(name) = file.path.file_name() {
            progress.set_message(format!("{}/{}", file.group, name.to_string_lossy()));
        }

        match read_text_frame(&file.path) {
            Ok(df) => batch.tables.push(df),
            Err(e) => {
                warn!("Could not read file '{}': {}", file.path.display(), e);
                batch.files_failed += 1;
            }
        }
        progress.inc(1);
    }

    batch
}

/// Stack tables row-wise over the union of their columns
///
/// Column order follows first appearance. Returns `None` for no tables.
pub fn concat_tables(tables: Vec<DataFrame>) -> Result<Option<DataFrame>> {
    match tables.len() {
        0 => Ok(None),
        1 => Ok(tables.into_iter().next()),
        n => {
            debug!("Diagonally concatenating {} tables", n);
            let frames: Vec<_> = tables.into_iter().map(|df| df.lazy()).collect();
            let combined = concat_lf_diagonal(frames, UnionArgs::default())?.collect()?;
            Ok(Some(combined))
        }
    }
}

/// Concatenate every `<root>/<group>/*.csv` into a single CSV
pub fn combine_grouped_csvs(
    root: &Path,
    writer: &CsvTableWriter,
    show_progress: bool,
) -> Result<ConcatOutcome> {
    let discovery = CsvDiscovery::new(root)?;
    println!(
        "{} {}",
        "Combining CSV files from".bright_yellow(),
        root.display()
    );

    let groups = discovery.groups();
    let progress = spinner(show_progress);
    let batch = read_tables(discovery.iter(), &progress);
    progress.finish_and_clear();

    for group in groups.iter().filter(|g| !batch.groups_read.contains(*g)) {
        info!("Group directory {} holds no CSV files", group);
    }

    let files_read = batch.tables.len();
    if batch.files_failed > 0 {
        warn!("{} files could not be read and were skipped", batch.files_failed);
    }

    let Some(mut combined) = concat_tables(batch.tables)? else {
        return Ok(ConcatOutcome::NoInput {
            root: root.to_path_buf(),
        });
    };

    println!(
        "  {} {} station files from {} groups",
        "Read".bright_green(),
        files_read.to_string().bright_white().bold(),
        groups.len()
    );

    let total_rows = writer.write(&mut combined)?;

    Ok(ConcatOutcome::Written(ConcatStats {
        groups_visited: groups.len(),
        files_read,
        files_failed: batch.files_failed,
        total_rows,
        total_columns: combined.width(),
        output_path: writer.output_path().to_path_buf(),
    }))
}

fn spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn text_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_concat_union_of_columns() {
        let first = df!("A" => ["1"], "B" => ["b1"]).unwrap();
        let second = df!("A" => ["2"], "C" => ["c2"]).unwrap();

        let combined = concat_tables(vec![first, second]).unwrap().unwrap();

        assert_eq!(column_names(&combined), vec!["A", "B", "C"]);
        assert_eq!(combined.height(), 2);
        assert_eq!(
            text_values(&combined, "B"),
            vec![Some("b1".to_string()), None]
        );
        assert_eq!(
            text_values(&combined, "C"),
            vec![None, Some("c2".to_string())]
        );
    }

    #[test]
    fn test_concat_same_schema_stacks_rows() {
        let first = df!("STATION" => ["GM000001474", "GM000001474"], "DATE" => ["1990", "1991"]).unwrap();
        let second = df!("STATION" => ["KE000063612"], "DATE" => ["1990"]).unwrap();

        let combined = concat_tables(vec![first, second]).unwrap().unwrap();

        assert_eq!(combined.shape(), (3, 2));
        assert_eq!(
            text_values(&combined, "STATION"),
            vec![
                Some("GM000001474".to_string()),
                Some("GM000001474".to_string()),
                Some("KE000063612".to_string()),
            ]
        );
    }

    #[test]
    fn test_concat_nothing() {
        assert!(concat_tables(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn test_read_tables_skips_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.csv");
        let empty = temp_dir.path().join("empty.csv");
        fs::write(&good, "STATION,DATE\nGM000001474,1990\n").unwrap();
        fs::write(&empty, "").unwrap();

        let files = vec![
            GroupedCsvFile {
                group: "Germany".to_string(),
                path: good,
            },
            GroupedCsvFile {
                group: "Germany".to_string(),
                path: empty,
            },
            GroupedCsvFile {
                group: "Kenya".to_string(),
                path: temp_dir.path().join("missing.csv"),
            },
        ];

        let batch = read_tables(files, &ProgressBar::hidden());

        assert_eq!(batch.tables.len(), 1);
        assert_eq!(batch.files_failed, 2);
        assert_eq!(batch.groups_read, vec!["Germany", "Kenya"]);
    }

    #[test]
    fn test_combine_directory_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("gsoy_data");
        fs::create_dir_all(root.join("Germany")).unwrap();
        fs::create_dir_all(root.join("Kenya")).unwrap();
        fs::create_dir_all(root.join("Tuvalu")).unwrap();
        fs::write(root.join("Germany").join("GM1.csv"), "A,B\n1,2\n").unwrap();
        fs::write(root.join("Kenya").join("KE1.csv"), "A,C\n3,4\n").unwrap();
        let output = temp_dir.path().join("processed").join("unified.csv");

        let outcome =
            combine_grouped_csvs(&root, &CsvTableWriter::new(&output), false).unwrap();

        match outcome {
            ConcatOutcome::Written(stats) => {
                assert_eq!(stats.files_read, 2);
                assert_eq!(stats.groups_visited, 3);
                assert_eq!(stats.total_rows, 2);
                assert_eq!(stats.total_columns, 3);
            }
            other => panic!("Expected Written, got {:?}", other),
        }

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content, "A,B,C\n1,2,\n3,,4\n");
    }

    #[test]
    fn test_no_files_is_not_written() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("gsoy_data");
        fs::create_dir_all(root.join("Germany")).unwrap();
        let output = temp_dir.path().join("unified.csv");

        let outcome =
            combine_grouped_csvs(&root, &CsvTableWriter::new(&output), false).unwrap();

        assert!(matches!(outcome, ConcatOutcome::NoInput { .. }));
        assert!(!output.exists());
    }
}
