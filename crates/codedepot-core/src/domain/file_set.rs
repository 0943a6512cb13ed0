//! In-memory file set with an active-file pointer
//!
//! The set is a cache of one namespace's remote contents, keyed by name so
//! that "at most one entry per name" holds by construction. The active
//! pointer is a name, and every operation that removes entries also drops
//! the pointer when it would dangle.

use std::collections::BTreeMap;

use super::errors::DomainError;
use super::newtypes::FileName;
use super::remote_file::RemoteFile;

/// Name-keyed, name-ordered collection of files plus the active file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: BTreeMap<FileName, RemoteFile>,
    active: Option<FileName>,
}

impl FileSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry with the same name, returning the old one
    pub fn insert(&mut self, file: RemoteFile) -> Option<RemoteFile> {
        self.files.insert(file.name().clone(), file)
    }

    /// Remove an entry; clears the active pointer if it pointed at it
    pub fn remove(&mut self, name: &FileName) -> Option<RemoteFile> {
        if self.active.as_ref() == Some(name) {
            self.active = None;
        }
        self.files.remove(name)
    }

    #[must_use]
    pub fn get(&self, name: &FileName) -> Option<&RemoteFile> {
        self.files.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &FileName) -> bool {
        self.files.contains_key(name)
    }

    /// Replace the content of an existing entry, keeping its descriptor
    ///
    /// # Errors
    /// Returns [`DomainError::UnknownFile`] if the name is not in the set
    pub fn update_content(
        &mut self,
        name: &FileName,
        content: impl Into<String>,
    ) -> Result<&RemoteFile, DomainError> {
        let file = self
            .files
            .get_mut(name)
            .ok_or_else(|| DomainError::UnknownFile(name.to_string()))?;
        file.set_content(content);
        Ok(file)
    }

    /// Point the active file at an existing entry
    ///
    /// # Errors
    /// Returns [`DomainError::UnknownFile`] if the name is not in the set
    pub fn set_active(&mut self, name: &FileName) -> Result<(), DomainError> {
        if !self.files.contains_key(name) {
            return Err(DomainError::UnknownFile(name.to_string()));
        }
        self.active = Some(name.clone());
        Ok(())
    }

    /// The active file, if any
    #[must_use]
    pub fn active(&self) -> Option<&RemoteFile> {
        self.active.as_ref().and_then(|name| self.files.get(name))
    }

    #[must_use]
    pub fn active_name(&self) -> Option<&FileName> {
        self.active.as_ref()
    }

    /// Files in name order
    pub fn iter(&self) -> impl Iterator<Item = &RemoteFile> {
        self.files.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &FileName> {
        self.files.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Drop every entry and the active pointer
    pub fn clear(&mut self) {
        self.files.clear();
        self.active = None;
    }
}

impl FromIterator<RemoteFile> for FileSet {
    fn from_iter<I: IntoIterator<Item = RemoteFile>>(iter: I) -> Self {
        let mut set = FileSet::new();
        for file in iter {
            set.insert(file);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::newtypes::ContentSha;

    fn name(s: &str) -> FileName {
        FileName::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_insert_replaces_by_name() {
        let mut set = FileSet::new();
        assert!(set.insert(RemoteFile::new(name("a.md"), "one")).is_none());
        let old = set.insert(RemoteFile::new(name("a.md"), "two"));
        assert_eq!(old.unwrap().content(), "one");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&name("a.md")).unwrap().content(), "two");
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let set: FileSet = ["c.txt", "a.txt", "b.txt"]
            .into_iter()
            .map(|n| RemoteFile::new(name(n), ""))
            .collect();
        let names: Vec<_> = set.names().map(FileName::as_str).collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_set_active_requires_entry() {
        let mut set = FileSet::new();
        assert_eq!(
            set.set_active(&name("missing.py")),
            Err(DomainError::UnknownFile("missing.py".to_string()))
        );
        set.insert(RemoteFile::new(name("app.py"), ""));
        set.set_active(&name("app.py")).unwrap();
        assert_eq!(set.active().unwrap().name().as_str(), "app.py");
    }

    #[test]
    fn test_remove_clears_matching_active() {
        let mut set = FileSet::new();
        set.insert(RemoteFile::new(name("a.py"), ""));
        set.insert(RemoteFile::new(name("b.py"), ""));
        set.set_active(&name("a.py")).unwrap();

        set.remove(&name("b.py"));
        assert_eq!(set.active_name(), Some(&name("a.py")));

        set.remove(&name("a.py"));
        assert!(set.active().is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_update_content_keeps_sha() {
        let mut set = FileSet::new();
        let sha = ContentSha::new("s1".to_string()).unwrap();
        set.insert(RemoteFile::from_remote(name("a.md"), "old", sha.clone()));

        let updated = set.update_content(&name("a.md"), "new").unwrap();
        assert_eq!(updated.content(), "new");
        assert_eq!(updated.sha(), Some(&sha));

        assert!(set.update_content(&name("b.md"), "x").is_err());
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut set = FileSet::new();
        set.insert(RemoteFile::new(name("a.md"), ""));
        set.set_active(&name("a.md")).unwrap();
        set.clear();
        assert!(set.is_empty());
        assert!(set.active_name().is_none());
    }
}
