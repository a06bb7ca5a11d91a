//! Folder listing structures for the grouped "files and folders" view.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A file reference inside a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File ID.
    pub file_id: Uuid,
    /// File name.
    pub filename: String,
}

/// One folder with the files directly inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderWithFiles {
    /// Folder ID.
    pub folder_id: Uuid,
    /// Folder name.
    pub folder_name: String,
    /// Parent folder ID, if any.
    pub parent_folder_id: Option<Uuid>,
    /// Files whose `folder_id` is this folder.
    pub files: Vec<FileEntry>,
}

/// Every folder of an owner plus the files that sit at the root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderListing {
    /// Folders in name order.
    pub folders: Vec<FolderWithFiles>,
    /// Files with no folder.
    pub independent_files: Vec<FileEntry>,
}

impl FolderListing {
    /// Total number of files across all buckets.
    pub fn file_count(&self) -> usize {
        self.independent_files.len() + self.folders.iter().map(|f| f.files.len()).sum::<usize>()
    }
}
