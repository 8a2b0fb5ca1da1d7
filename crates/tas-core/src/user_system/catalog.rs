use std::collections::BTreeMap;

use tracing::info;

use crate::user_system::{UserSystemError, UserSystemService};

/// Set of available user systems, selected by declared name.
#[derive(Default)]
pub struct UserSystemCatalog {
    services: BTreeMap<String, Box<dyn UserSystemService>>,
}

impl UserSystemCatalog {
    /// Build the catalog; two services declaring the same name are rejected.
    pub fn new<I>(services: I) -> Result<Self, UserSystemError>
    where
        I: IntoIterator<Item = Box<dyn UserSystemService>>,
    {
        let mut out = BTreeMap::new();
        for svc in services {
            let name = svc.name().to_string();
            if out.contains_key(&name) {
                return Err(UserSystemError::DuplicateService { name });
            }
            out.insert(name, svc);
        }
        Ok(Self { services: out })
    }

    /// Names of all registered services.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Take the service with the given name out of the catalog and start it.
    ///
    /// Returns `Ok(None)` when no service has that name.
    pub fn start(&mut self, name: &str) -> Result<Option<Box<dyn UserSystemService>>, UserSystemError> {
        let Some(mut svc) = self.services.remove(name) else {
            info!(name, "user system was not found");
            return Ok(None);
        };
        svc.start()?;
        info!(name, "user system started");
        Ok(Some(svc))
    }
}
