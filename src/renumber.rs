//! Renumbering existing photo pairs and rebuilding the manifest.
//!
//! ```text
//! before                         after (--start 1, --sort name)
//! 002.jpg  002-thumb.jpg    →    001.jpg  001-thumb.jpg
//! 005.jpg  005-thumb.jpg    →    002.jpg  002-thumb.jpg
//! 009.jpg  009-thumb.jpg    →    003.jpg  003-thumb.jpg
//! 011.jpg                        011.jpg                (no thumbnail: untouched)
//! ```
//!
//! ## Two-phase rename
//!
//! Sources and targets can overlap (`001 ↔ 003`), so renaming directly could
//! clobber a file that is itself still waiting to move. Every source is first
//! moved to `<name>.renaming.<unix-seconds>`, and only then is each
//! temporary name moved to its target.
//!
//! A journal (`.renumber-journal.json`) holding the plan is written before
//! the first rename and removed after the last. There is no rollback: if a
//! run dies in between, the journal is left behind and the next run warns
//! about it, so the directory can be inspected and fixed by hand.
//!
//! ## Manifest rebuild
//!
//! After renaming, pairs are re-read from disk (not from the plan) and one
//! record is emitted per pair. Captions and tones are carried over by content
//! hash from the previous manifest (see [`crate::fingerprint`]); anything not
//! found gets a caption synthesized from its new stem and the default tone.
//! The previous manifest is copied to `manifest.json.bak` first.

use crate::config::GalleryConfig;
use crate::discovery::{self, ImagePair};
use crate::fingerprint::{self, MetadataIndex};
use crate::manifest::{self, ImageRecord, MANIFEST_FILENAME, Manifest, ManifestError};
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Plan file present only while a rename batch is in flight.
pub const JOURNAL_FILENAME: &str = ".renumber-journal.json";

/// Marker inserted between a file name and the run timestamp for temp names.
pub const TEMP_MARKER: &str = ".renaming.";

#[derive(Error, Debug)]
pub enum RenumberError {
    #[error("photos/ not found at: {0}")]
    PhotosDirNotFound(PathBuf),
    #[error("Cannot number {count} pair(s) starting at {start}: index exceeds {}", u32::MAX)]
    IndexOverflow { start: u32, count: usize },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Order pairs are numbered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Full-size file name, ignoring case.
    #[default]
    Name,
    /// Full-size file modification time, oldest first.
    Mtime,
}

#[derive(Debug, Clone)]
pub struct RenumberOptions {
    /// Site root, or the photos directory itself.
    pub project: PathBuf,
    pub sort: SortOrder,
    pub start: u32,
    pub dry_run: bool,
    pub config: GalleryConfig,
}

/// Moves for one pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameStep {
    pub from_full: PathBuf,
    pub from_thumb: PathBuf,
    pub to_full: PathBuf,
    pub to_thumb: PathBuf,
    /// Content hash of `from_full`, taken before anything moves.
    #[serde(skip)]
    pub content_hash: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Journal {
    temp_suffix: String,
    steps: Vec<RenameStep>,
}

/// Outcome of one renumber run.
#[derive(Debug, Clone)]
pub struct RenumberReport {
    pub photos_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub dry_run: bool,
    pub plan: Vec<RenameStep>,
    /// The manifest written (or, in a dry run, the one that would be).
    pub manifest: Manifest,
    /// Records whose alt/tone came from the previous manifest.
    pub recovered: usize,
    pub backup: Option<PathBuf>,
    /// Journal left behind by an earlier interrupted run.
    pub stale_journal: Option<PathBuf>,
    /// A target name held by a file the plan does not move. When set,
    /// nothing was renamed or written.
    pub conflict: Option<PathBuf>,
}

impl RenumberReport {
    /// Whether any pairs were found at all.
    pub fn has_pairs(&self) -> bool {
        !self.plan.is_empty()
    }
}

/// Resolve the photos directory from a site root or the directory itself.
pub fn locate_photos_dir(project: &Path) -> Result<PathBuf, RenumberError> {
    let is_photos_dir = project
        .file_name()
        .is_some_and(|n| n == crate::ingest::PHOTOS_DIR)
        && project.is_dir();
    let photos_dir = if is_photos_dir {
        project.to_path_buf()
    } else {
        project.join(crate::ingest::PHOTOS_DIR)
    };
    if !photos_dir.is_dir() {
        return Err(RenumberError::PhotosDirNotFound(photos_dir));
    }
    Ok(photos_dir)
}

/// Site root that site-absolute manifest URLs resolve against.
pub fn site_root_of(photos_dir: &Path) -> PathBuf {
    photos_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| photos_dir.to_path_buf())
}

/// Sort pairs in place.
pub fn sort_pairs(pairs: &mut Vec<ImagePair>, order: SortOrder) -> io::Result<()> {
    match order {
        SortOrder::Name => pairs.sort_by_cached_key(|p| p.full_name().to_lowercase()),
        SortOrder::Mtime => {
            let mut keyed = pairs
                .drain(..)
                .map(|p| -> io::Result<(SystemTime, ImagePair)> {
                    Ok((std::fs::metadata(&p.full)?.modified()?, p))
                })
                .collect::<io::Result<Vec<_>>>()?;
            // Stable sort keeps name order for equal timestamps.
            keyed.sort_by_key(|(mtime, _)| *mtime);
            pairs.extend(keyed.into_iter().map(|(_, p)| p));
        }
    }
    Ok(())
}

/// Assign contiguous ids from `start` to already-sorted pairs.
pub fn plan_renames(
    pairs: &[ImagePair],
    photos_dir: &Path,
    start: u32,
) -> Result<Vec<RenameStep>, RenumberError> {
    let overflow = || RenumberError::IndexOverflow {
        start,
        count: pairs.len(),
    };
    let extra = u32::try_from(pairs.len().saturating_sub(1)).map_err(|_| overflow())?;
    let last = start.checked_add(extra).ok_or_else(overflow)?;

    Ok(pairs
        .iter()
        .zip(start..=last)
        .map(|(pair, index)| {
            let id = naming::format_id(index);
            RenameStep {
                from_full: pair.full.clone(),
                from_thumb: pair.thumb.clone(),
                to_full: photos_dir.join(naming::full_filename(&id)),
                to_thumb: photos_dir.join(naming::thumb_filename(&id)),
                content_hash: fingerprint::hash_file(&pair.full).ok(),
            }
        })
        .collect())
}

/// First target name held by a file the plan does not move, such as an
/// unpaired `NNN.jpg`.
pub fn occupied_target(plan: &[RenameStep]) -> Option<PathBuf> {
    let sources: HashSet<&Path> = plan
        .iter()
        .flat_map(|s| [s.from_full.as_path(), s.from_thumb.as_path()])
        .collect();
    plan.iter()
        .flat_map(|s| [&s.to_full, &s.to_thumb])
        .find(|target| target.exists() && !sources.contains(target.as_path()))
        .cloned()
}

/// Suffix for this run's temporary names: `.renaming.<unix-seconds>`.
pub fn temp_suffix() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}{}", TEMP_MARKER, secs)
}

fn temp_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Execute a plan in two passes: every source to a temp name, then every
/// temp name to its target.
///
/// A failure part-way leaves the directory partially renamed.
pub fn two_phase_rename(plan: &[RenameStep], suffix: &str) -> io::Result<()> {
    let mut staged = Vec::with_capacity(plan.len());
    for step in plan {
        let full_tmp = temp_path(&step.from_full, suffix);
        let thumb_tmp = temp_path(&step.from_thumb, suffix);
        std::fs::rename(&step.from_full, &full_tmp)?;
        std::fs::rename(&step.from_thumb, &thumb_tmp)?;
        staged.push((full_tmp, thumb_tmp, step));
    }
    for (full_tmp, thumb_tmp, step) in staged {
        std::fs::rename(&full_tmp, &step.to_full)?;
        std::fs::rename(&thumb_tmp, &step.to_thumb)?;
    }
    Ok(())
}

fn write_journal(path: &Path, plan: &[RenameStep], suffix: &str) -> Result<(), RenumberError> {
    let journal = Journal {
        temp_suffix: suffix.to_string(),
        steps: plan.to_vec(),
    };
    std::fs::write(path, serde_json::to_string_pretty(&journal)?)?;
    Ok(())
}

/// Builds manifest records, recovering metadata by content hash.
struct RecordBuilder<'a> {
    index: &'a MetadataIndex,
    config: &'a GalleryConfig,
    recovered: usize,
}

impl RecordBuilder<'_> {
    fn record(&mut self, full: &Path, thumb: &Path, hash: Option<&str>) -> ImageRecord {
        let stem = full
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = |p: &Path| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        let prior = hash.and_then(|h| self.index.get(h));
        if prior.is_some() {
            self.recovered += 1;
        }
        let alt = prior
            .map(|p| p.alt.clone())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| naming::synthesize_caption(&stem));
        let tone = prior
            .map(|p| p.tone.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.config.manifest.default_tone.clone());

        let prefix = &self.config.manifest.url_prefix;
        ImageRecord {
            id: stem,
            thumb: manifest::site_url(prefix, &file_name(thumb)),
            full: manifest::site_url(prefix, &file_name(full)),
            alt,
            tone,
            extra: Default::default(),
        }
    }
}

/// Records for the pairs currently on disk, sorted by full name.
fn records_from_disk(
    photos_dir: &Path,
    builder: &mut RecordBuilder<'_>,
) -> io::Result<Vec<ImageRecord>> {
    let pairs = discovery::find_pairs(photos_dir)?;
    Ok(pairs
        .iter()
        .map(|pair| {
            let hash = match fingerprint::hash_file(&pair.full) {
                Ok(h) => Some(h),
                Err(e) => {
                    log::debug!("Could not hash {}: {}", pair.full.display(), e);
                    None
                }
            };
            builder.record(&pair.full, &pair.thumb, hash.as_deref())
        })
        .collect())
}

/// Records the plan would produce, sorted by target full name.
fn records_from_plan(plan: &[RenameStep], builder: &mut RecordBuilder<'_>) -> Vec<ImageRecord> {
    let mut steps: Vec<&RenameStep> = plan.iter().collect();
    steps.sort_by_cached_key(|s| s.to_full.to_string_lossy().to_lowercase());
    steps
        .into_iter()
        .map(|s| builder.record(&s.to_full, &s.to_thumb, s.content_hash.as_deref()))
        .collect()
}

/// Renumber every pair in the photos directory and rebuild the manifest.
pub fn renumber(options: &RenumberOptions) -> Result<RenumberReport, RenumberError> {
    let photos_dir = locate_photos_dir(&options.project)?;
    let site_root = site_root_of(&photos_dir);
    let manifest_path = photos_dir.join(MANIFEST_FILENAME);
    let journal_path = photos_dir.join(JOURNAL_FILENAME);

    let stale_journal = journal_path.is_file().then(|| journal_path.clone());
    if let Some(path) = &stale_journal {
        log::warn!(
            "Found {} from an interrupted run; check for *{}* files",
            path.display(),
            TEMP_MARKER
        );
    }

    let mut report = RenumberReport {
        photos_dir: photos_dir.clone(),
        manifest_path: manifest_path.clone(),
        dry_run: options.dry_run,
        plan: Vec::new(),
        manifest: Manifest::default(),
        recovered: 0,
        backup: None,
        stale_journal,
        conflict: None,
    };

    let mut pairs = discovery::find_pairs(&photos_dir)?;
    if pairs.is_empty() {
        return Ok(report);
    }
    sort_pairs(&mut pairs, options.sort)?;

    // Hash everything the old manifest points at before any file moves.
    let previous = Manifest::load(&manifest_path);
    let index = MetadataIndex::from_manifest(&previous, &photos_dir, &site_root);
    log::info!("Recovered metadata for {} previous record(s)", index.len());

    let plan = plan_renames(&pairs, &photos_dir, options.start)?;
    if let Some(target) = occupied_target(&plan) {
        log::warn!("{} would be overwritten; nothing renamed", target.display());
        report.conflict = Some(target);
        report.plan = plan;
        return Ok(report);
    }
    let mut builder = RecordBuilder {
        index: &index,
        config: &options.config,
        recovered: 0,
    };

    let images = if options.dry_run {
        records_from_plan(&plan, &mut builder)
    } else {
        let suffix = temp_suffix();
        write_journal(&journal_path, &plan, &suffix)?;
        two_phase_rename(&plan, &suffix)?;
        std::fs::remove_file(&journal_path)?;
        records_from_disk(&photos_dir, &mut builder)?
    };

    report.manifest = Manifest {
        images,
        extra: previous.extra,
    };
    report.recovered = builder.recovered;
    report.plan = plan;

    if !options.dry_run {
        report.backup = match manifest::backup(&manifest_path) {
            Ok(backup) => backup,
            Err(e) => {
                log::warn!("Could not back up {}: {}", manifest_path.display(), e);
                None
            }
        };
        report.manifest.save(&manifest_path)?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::BACKUP_FILENAME;
    use tempfile::TempDir;

    /// Site root with a `photos/` dir holding pairs whose full-size files
    /// contain `content-<stem>` so each has a distinct hash.
    fn site_with_pairs(stems: &[&str]) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let photos = tmp.path().join("photos");
        std::fs::create_dir_all(&photos).unwrap();
        for stem in stems {
            write_pair(&photos, stem);
        }
        (tmp, photos)
    }

    fn write_pair(photos: &Path, stem: &str) {
        std::fs::write(photos.join(format!("{stem}.jpg")), format!("content-{stem}")).unwrap();
        std::fs::write(photos.join(format!("{stem}-thumb.jpg")), format!("thumb-{stem}")).unwrap();
    }

    fn options(project: &Path) -> RenumberOptions {
        RenumberOptions {
            project: project.to_path_buf(),
            sort: SortOrder::Name,
            start: 1,
            dry_run: false,
            config: GalleryConfig::default(),
        }
    }

    fn dir_listing(dir: &Path) -> Vec<String> {
        let mut names = discovery::list_file_names(dir).unwrap();
        names.sort();
        names
    }

    fn read(path: PathBuf) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn locate_from_site_root() {
        let (tmp, photos) = site_with_pairs(&[]);
        assert_eq!(locate_photos_dir(tmp.path()).unwrap(), photos);
    }

    #[test]
    fn locate_from_photos_dir_itself() {
        let (_tmp, photos) = site_with_pairs(&[]);
        assert_eq!(locate_photos_dir(&photos).unwrap(), photos);
    }

    #[test]
    fn locate_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            locate_photos_dir(tmp.path()),
            Err(RenumberError::PhotosDirNotFound(_))
        ));
    }

    #[test]
    fn plan_maps_in_ascending_name_order() {
        let (_tmp, photos) = site_with_pairs(&["005", "002", "009"]);
        let mut pairs = discovery::find_pairs(&photos).unwrap();
        sort_pairs(&mut pairs, SortOrder::Name).unwrap();
        let plan = plan_renames(&pairs, &photos, 1).unwrap();

        let moves: Vec<(String, String)> = plan
            .iter()
            .map(|s| {
                (
                    s.from_full.file_name().unwrap().to_string_lossy().into_owned(),
                    s.to_full.file_name().unwrap().to_string_lossy().into_owned(),
                )
            })
            .collect();
        assert_eq!(
            moves,
            vec![
                ("002.jpg".to_string(), "001.jpg".to_string()),
                ("005.jpg".to_string(), "002.jpg".to_string()),
                ("009.jpg".to_string(), "003.jpg".to_string()),
            ]
        );
        assert_eq!(plan[2].to_thumb, photos.join("003-thumb.jpg"));
        assert!(plan.iter().all(|s| s.content_hash.is_some()));
    }

    #[test]
    fn plan_honours_start_offset() {
        let (_tmp, photos) = site_with_pairs(&["001", "002"]);
        let pairs = discovery::find_pairs(&photos).unwrap();
        let plan = plan_renames(&pairs, &photos, 10).unwrap();
        assert_eq!(plan[0].to_full, photos.join("010.jpg"));
        assert_eq!(plan[1].to_full, photos.join("011.jpg"));
    }

    #[test]
    fn plan_rejects_index_past_u32_max() {
        let (_tmp, photos) = site_with_pairs(&["001", "002"]);
        let pairs = discovery::find_pairs(&photos).unwrap();
        assert!(matches!(
            plan_renames(&pairs, &photos, u32::MAX),
            Err(RenumberError::IndexOverflow { start: u32::MAX, count: 2 })
        ));
    }

    #[test]
    fn plan_single_pair_at_u32_max() {
        let (_tmp, photos) = site_with_pairs(&["001"]);
        let pairs = discovery::find_pairs(&photos).unwrap();
        let plan = plan_renames(&pairs, &photos, u32::MAX).unwrap();
        assert_eq!(plan[0].to_full, photos.join(format!("{}.jpg", u32::MAX)));
    }

    #[test]
    fn renumber_with_overflowing_start_changes_nothing() {
        let (tmp, photos) = site_with_pairs(&["001", "002"]);
        let before = dir_listing(&photos);

        let result = renumber(&RenumberOptions {
            start: u32::MAX,
            ..options(tmp.path())
        });
        assert!(matches!(result, Err(RenumberError::IndexOverflow { .. })));
        assert_eq!(dir_listing(&photos), before);
        assert!(!photos.join(JOURNAL_FILENAME).exists());
    }

    #[test]
    fn sort_by_mtime_oldest_first() {
        let (_tmp, photos) = site_with_pairs(&["001", "002", "003"]);
        let base = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_600_000_000);
        for (stem, offset) in [("001", 300), ("002", 100), ("003", 200)] {
            std::fs::File::options()
                .write(true)
                .open(photos.join(format!("{stem}.jpg")))
                .unwrap()
                .set_modified(base + std::time::Duration::from_secs(offset))
                .unwrap();
        }

        let mut pairs = discovery::find_pairs(&photos).unwrap();
        sort_pairs(&mut pairs, SortOrder::Mtime).unwrap();
        let stems: Vec<String> = pairs.iter().map(ImagePair::stem).collect();
        assert_eq!(stems, vec!["002", "003", "001"]);
    }

    #[test]
    fn two_phase_rename_swaps_overlapping_names() {
        let (_tmp, photos) = site_with_pairs(&["001", "003"]);
        let plan = vec![
            RenameStep {
                from_full: photos.join("003.jpg"),
                from_thumb: photos.join("003-thumb.jpg"),
                to_full: photos.join("001.jpg"),
                to_thumb: photos.join("001-thumb.jpg"),
                content_hash: None,
            },
            RenameStep {
                from_full: photos.join("001.jpg"),
                from_thumb: photos.join("001-thumb.jpg"),
                to_full: photos.join("003.jpg"),
                to_thumb: photos.join("003-thumb.jpg"),
                content_hash: None,
            },
        ];

        two_phase_rename(&plan, ".renaming.42").unwrap();

        assert_eq!(read(photos.join("001.jpg")), "content-003");
        assert_eq!(read(photos.join("001-thumb.jpg")), "thumb-003");
        assert_eq!(read(photos.join("003.jpg")), "content-001");
        assert_eq!(
            dir_listing(&photos),
            vec!["001-thumb.jpg", "001.jpg", "003-thumb.jpg", "003.jpg"]
        );
    }

    #[test]
    fn temp_suffix_has_timestamp() {
        let suffix = temp_suffix();
        let secs = suffix.strip_prefix(".renaming.").unwrap();
        assert!(secs.parse::<u64>().unwrap() > 0);
    }

    #[test]
    fn renumber_compacts_and_rebuilds_manifest() {
        let (tmp, photos) = site_with_pairs(&["005", "002", "009"]);
        let report = renumber(&options(tmp.path())).unwrap();

        assert_eq!(report.plan.len(), 3);
        assert_eq!(read(photos.join("001.jpg")), "content-002");
        assert_eq!(read(photos.join("002.jpg")), "content-005");
        assert_eq!(read(photos.join("003.jpg")), "content-009");
        assert!(!photos.join("009.jpg").exists());

        let manifest = Manifest::read(&photos.join(MANIFEST_FILENAME)).unwrap().unwrap();
        let ids: Vec<&str> = manifest.images.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["001", "002", "003"]);
        assert_eq!(manifest.images[0].full, "/photos/001.jpg");
        assert_eq!(manifest.images[0].thumb, "/photos/001-thumb.jpg");
        assert_eq!(manifest.images[0].alt, "001");
        assert_eq!(manifest.images[0].tone, "neutral");
    }

    #[test]
    fn renumber_recovers_metadata_by_content() {
        let (tmp, photos) = site_with_pairs(&["003", "007"]);
        std::fs::write(
            photos.join(MANIFEST_FILENAME),
            r#"{"images": [
                {"id": "007", "thumb": "/photos/007-thumb.jpg", "full": "/photos/007.jpg", "alt": "Harbor at dawn", "tone": "cool"},
                {"id": "003", "thumb": "/photos/003-thumb.jpg", "full": "003.jpg", "alt": "Old pier", "tone": "warm"}
            ]}"#,
        )
        .unwrap();

        let report = renumber(&options(tmp.path())).unwrap();
        assert_eq!(report.recovered, 2);

        let manifest = Manifest::read(&photos.join(MANIFEST_FILENAME)).unwrap().unwrap();
        // 003 → 001, 007 → 002
        assert_eq!(manifest.images[0].alt, "Old pier");
        assert_eq!(manifest.images[0].tone, "warm");
        assert_eq!(manifest.images[1].alt, "Harbor at dawn");
        assert_eq!(manifest.images[1].tone, "cool");
    }

    #[test]
    fn renumber_uses_default_tone_for_unknown_content() {
        let (tmp, photos) = site_with_pairs(&["sunny_day"]);
        let mut opts = options(tmp.path());
        opts.config.manifest.default_tone = "bright".into();
        renumber(&opts).unwrap();

        let manifest = Manifest::read(&photos.join(MANIFEST_FILENAME)).unwrap().unwrap();
        assert_eq!(manifest.images[0].id, "001");
        assert_eq!(manifest.images[0].alt, "001");
        assert_eq!(manifest.images[0].tone, "bright");
    }

    #[test]
    fn renumber_backs_up_previous_manifest() {
        let (tmp, photos) = site_with_pairs(&["004"]);
        let previous = r#"{"images": []}"#;
        std::fs::write(photos.join(MANIFEST_FILENAME), previous).unwrap();

        let report = renumber(&options(tmp.path())).unwrap();
        assert_eq!(report.backup, Some(photos.join(BACKUP_FILENAME)));
        assert_eq!(read(photos.join(BACKUP_FILENAME)), previous);
    }

    #[test]
    fn renumber_without_previous_manifest_makes_no_backup() {
        let (tmp, photos) = site_with_pairs(&["004"]);
        let report = renumber(&options(tmp.path())).unwrap();
        assert!(report.backup.is_none());
        assert!(!photos.join(BACKUP_FILENAME).exists());
    }

    #[test]
    fn renumber_removes_journal_on_success() {
        let (tmp, photos) = site_with_pairs(&["002", "001"]);
        let report = renumber(&options(tmp.path())).unwrap();
        assert!(report.stale_journal.is_none());
        assert!(!photos.join(JOURNAL_FILENAME).exists());
        assert!(dir_listing(&photos).iter().all(|n| !n.contains(TEMP_MARKER)));
    }

    #[test]
    fn renumber_reports_stale_journal() {
        let (tmp, photos) = site_with_pairs(&["001"]);
        std::fs::write(photos.join(JOURNAL_FILENAME), "{}").unwrap();
        let report = renumber(&options(tmp.path())).unwrap();
        assert_eq!(report.stale_journal, Some(photos.join(JOURNAL_FILENAME)));
    }

    #[test]
    fn renumber_leaves_orphans_alone() {
        let (tmp, photos) = site_with_pairs(&["002"]);
        std::fs::write(photos.join("007.jpg"), "orphan-full").unwrap();
        std::fs::write(photos.join("005-thumb.jpg"), "orphan-thumb").unwrap();

        let report = renumber(&options(tmp.path())).unwrap();
        assert_eq!(report.plan.len(), 1);
        assert_eq!(report.manifest.images.len(), 1);
        assert_eq!(read(photos.join("007.jpg")), "orphan-full");
        assert_eq!(read(photos.join("005-thumb.jpg")), "orphan-thumb");
    }

    #[test]
    fn renumber_refuses_to_overwrite_orphan() {
        let (tmp, photos) = site_with_pairs(&["002"]);
        std::fs::write(photos.join("001.jpg"), "orphan-full").unwrap();
        let before = dir_listing(&photos);

        let report = renumber(&options(tmp.path())).unwrap();
        assert_eq!(report.conflict, Some(photos.join("001.jpg")));
        assert_eq!(report.plan.len(), 1);
        assert_eq!(dir_listing(&photos), before);
        assert_eq!(read(photos.join("001.jpg")), "orphan-full");
    }

    #[test]
    fn renumber_with_no_pairs_is_noop() {
        let (tmp, photos) = site_with_pairs(&[]);
        std::fs::write(photos.join("001.jpg"), "orphan").unwrap();

        let report = renumber(&options(tmp.path())).unwrap();
        assert!(!report.has_pairs());
        assert!(!photos.join(MANIFEST_FILENAME).exists());
        assert_eq!(dir_listing(&photos), vec!["001.jpg"]);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let (tmp, photos) = site_with_pairs(&["009", "005", "002"]);
        let previous = r#"{"images": [{"id": "009", "full": "/photos/009.jpg", "alt": "Kept", "tone": "warm"}]}"#;
        std::fs::write(photos.join(MANIFEST_FILENAME), previous).unwrap();
        let before = dir_listing(&photos);

        let report = renumber(&RenumberOptions {
            dry_run: true,
            ..options(tmp.path())
        })
        .unwrap();

        assert_eq!(dir_listing(&photos), before);
        assert_eq!(read(photos.join(MANIFEST_FILENAME)), previous);
        assert!(report.backup.is_none());

        // The prospective manifest reflects the plan's target names.
        let ids: Vec<&str> = report.manifest.images.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["001", "002", "003"]);
        assert_eq!(report.manifest.images[2].alt, "Kept");
        assert_eq!(report.manifest.images[2].tone, "warm");
    }

    #[test]
    fn renumber_keeps_top_level_manifest_keys() {
        let (tmp, photos) = site_with_pairs(&["001"]);
        std::fs::write(
            photos.join(MANIFEST_FILENAME),
            r#"{"title": "Portfolio", "images": []}"#,
        )
        .unwrap();
        renumber(&options(tmp.path())).unwrap();

        let manifest = Manifest::read(&photos.join(MANIFEST_FILENAME)).unwrap().unwrap();
        assert_eq!(manifest.extra["title"], "Portfolio");
    }
}
