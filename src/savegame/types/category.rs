//! Coarse content classification of a save by its file extension.

/// Content category of an uploaded save, derived from the file name alone.
///
/// Consumed by the UI layer and by the round-trip encoder's extension
/// policy. [`SaveCategory::Rpg`] is the compressed-save container family:
/// those files keep their original extension when re-encoded under a
/// compressed format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveCategory {
    Rpg,
    VisualNovel,
    Unknown,
}

const RPG_EXTENSIONS: &[&str] = &[
    ".rpgsave", ".rvdata2", ".rvdata", ".rxdata", ".lsd", ".sav", ".save", ".rsv",
];
const VN_EXTENSIONS: &[&str] = &[".dat", ".sol"];

impl SaveCategory {
    /// Classify a file by its final extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = extension_of(file_name).to_ascii_lowercase();
        if RPG_EXTENSIONS.contains(&extension.as_str()) {
            SaveCategory::Rpg
        } else if VN_EXTENSIONS.contains(&extension.as_str()) {
            SaveCategory::VisualNovel
        } else {
            SaveCategory::Unknown
        }
    }
}

/// The final extension of `file_name`, dot included, or "" if there is none.
pub(crate) fn extension_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) => &file_name[index..],
        None => "",
    }
}
