//! The `NNN.jpg` / `NNN-thumb.jpg` filename convention.
//!
//! Every published photo is a pair of JPEGs sharing a zero-padded numeric
//! stem:
//!
//! ```text
//! photos/
//! ├── 001.jpg           # full-size (web) image
//! ├── 001-thumb.jpg     # thumbnail
//! ├── 002.jpg
//! └── 002-thumb.jpg
//! ```
//!
//! ## Index range
//!
//! Ids are formatted with at least [`ID_WIDTH`] digits, but the strict
//! recognizer ([`parse_numbered_full`]) only accepts exactly three. Indices
//! past [`MAX_INDEX`] are still written (`1000.jpg`) but will not be seen by
//! the next ingest run, so 0–999 is the supported range. Widening it is a
//! format change, not something to infer from existing names.
//!
//! ## Captions
//!
//! New records get an `alt` text synthesized from the source filename stem,
//! see [`synthesize_caption`].

/// Suffix added to the stem of a full-size image to name its thumbnail.
pub const THUMB_SUFFIX: &str = "-thumb";

/// Extension shared by every published file.
pub const JPEG_EXTENSION: &str = "jpg";

/// Minimum number of digits in an id.
pub const ID_WIDTH: usize = 3;

/// Largest index the three-digit recognizer can read back.
pub const MAX_INDEX: u32 = 999;

/// Placeholder caption for stems with no readable characters.
pub const UNTITLED: &str = "Untitled";

/// Separator between a caller-supplied caption prefix and the caption.
pub const ALT_PREFIX_SEPARATOR: &str = " — ";

/// Zero-padded display id: `1` → `"001"`.
pub fn format_id(index: u32) -> String {
    format!("{:0width$}", index, width = ID_WIDTH)
}

/// `"001"` → `"001.jpg"`
pub fn full_filename(id: &str) -> String {
    format!("{}.{}", id, JPEG_EXTENSION)
}

/// `"001"` → `"001-thumb.jpg"`
pub fn thumb_filename(id: &str) -> String {
    format!("{}{}.{}", id, THUMB_SUFFIX, JPEG_EXTENSION)
}

/// Parse a strictly numbered full-size filename.
///
/// - `"001.jpg"` → `Some(1)`
/// - `"042.jpg"` → `Some(42)`
/// - `"001-thumb.jpg"` → `None`
/// - `"1000.jpg"` → `None` (outside the three-digit convention)
/// - `"001.JPG"` → `None`
pub fn parse_numbered_full(name: &str) -> Option<u32> {
    let stem = name.strip_suffix(".jpg")?;
    if stem.len() != ID_WIDTH || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

/// Compute the next free index from a directory listing.
///
/// One past the highest strictly numbered full-size file, or 1 when there is
/// none. Thumbnails and manifest contents play no part.
pub fn next_index<I, S>(names: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| parse_numbered_full(name.as_ref()))
        .max()
        .map_or(1, |max| max + 1)
}

/// Whether a filename has the `.jpg` extension, ignoring case.
pub fn is_jpeg_name(name: &str) -> bool {
    name.len() > 4 && name.to_ascii_lowercase().ends_with(".jpg")
}

/// Whether a filename names a thumbnail (`*-thumb.jpg`, ignoring case).
pub fn is_thumb_name(name: &str) -> bool {
    name.to_ascii_lowercase()
        .ends_with(&format!("{}.{}", THUMB_SUFFIX, JPEG_EXTENSION))
}

/// Thumbnail filename expected next to a full-size file: `"005.jpg"` → `"005-thumb.jpg"`.
pub fn thumb_name_for(full_name: &str) -> String {
    let stem = full_name
        .rsplit_once('.')
        .map_or(full_name, |(stem, _)| stem);
    format!("{}{}.{}", stem, THUMB_SUFFIX, JPEG_EXTENSION)
}

/// Turn a filename stem into a readable caption.
///
/// Runs of underscores and hyphens become single spaces, whitespace is
/// collapsed and trimmed, and the first character is upper-cased.
///
/// - `"sunset_over-the_bay"` → `"Sunset over the bay"`
/// - `"__--__"` → `"Untitled"`
pub fn synthesize_caption(stem: &str) -> String {
    let spaced: String = stem
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => UNTITLED.to_string(),
    }
}

/// Caption with an optional prefix: `Some("Iceland")` + `"black_sand"` →
/// `"Iceland — Black sand"`. Blank prefixes are ignored.
pub fn caption_with_prefix(stem: &str, prefix: Option<&str>) -> String {
    let caption = synthesize_caption(stem);
    match prefix.map(str::trim).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}{}{}", prefix, ALT_PREFIX_SEPARATOR, caption),
        None => caption,
    }
}
