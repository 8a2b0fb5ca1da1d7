//! User system abstraction: the source of directory users handed to the host.
mod error;
pub use error::UserSystemError;

mod catalog;
pub use catalog::UserSystemCatalog;

use tas_model::User;

/// Directory of users available for task assignment.
///
/// Implementations are blocking and must be safe to call from several threads at once;
/// each call acquires and releases its own backing-store resources.
pub trait UserSystemService: Send + Sync {
    /// Name the service is selected by.
    fn name(&self) -> &str;

    /// Acquire the backing store and run one-time initialization.
    fn start(&mut self) -> Result<(), UserSystemError>;

    /// Run a trivial read against the backing store.
    fn health_check(&self) -> Result<(), UserSystemError>;

    /// All enabled users, one entry per identifier, in discovery order.
    fn find_all_users(&self) -> Result<Vec<User>, UserSystemError>;

    /// A single enabled user; `Ok(None)` when the identifier is blank, unknown or disabled.
    fn find_user(&self, user_id: &str) -> Result<Option<User>, UserSystemError>;
}
