use crate::error::Result;
use crate::model::User;
use std::sync::{Mutex, PoisonError};

/// Durable client-side storage for the serialized identity.
///
/// Calls are synchronous: the store reads identity once at startup and
/// must be able to do so before anything else runs.
pub trait IdentityRepository: Send + Sync {
    /// Returns the persisted identity, or `None` if nobody is stored.
    fn load(&self) -> Result<Option<User>>;

    fn save(&self, identity: &User) -> Result<()>;

    /// Removes the persisted identity. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

/// Identity repository that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryIdentityRepository {
    identity: Mutex<Option<User>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated as if a previous run had logged in.
    pub fn with_identity(identity: User) -> Self {
        Self {
            identity: Mutex::new(Some(identity)),
        }
    }
}

impl IdentityRepository for InMemoryIdentityRepository {
    fn load(&self) -> Result<Option<User>> {
        Ok(self
            .identity
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, identity: &User) -> Result<()> {
        *self.identity.lock().unwrap_or_else(PoisonError::into_inner) = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.identity.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
