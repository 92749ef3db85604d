//! JSON-file identity persistence.

use crate::paths::FacultyHubPaths;
use crate::storage::AtomicJsonFile;
use facultyhub_core::Result;
use facultyhub_core::model::User;
use facultyhub_core::session::IdentityRepository;

/// Stores the logged-in identity as `<root>/<identity_key>.json`.
///
/// An unreadable document is reported as a storage error; the session
/// store decides to treat that as "logged out".
pub struct FileIdentityRepository {
    file: AtomicJsonFile<User>,
}

impl FileIdentityRepository {
    pub fn new(paths: &FacultyHubPaths, identity_key: &str) -> Self {
        Self {
            file: AtomicJsonFile::new(paths.identity_file(identity_key)),
        }
    }
}

impl IdentityRepository for FileIdentityRepository {
    fn load(&self) -> Result<Option<User>> {
        self.file.load()
    }

    fn save(&self, identity: &User) -> Result<()> {
        self.file.save(identity)?;
        tracing::debug!(path = %self.file.path().display(), "Identity persisted");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.file.remove()
    }
}
