//! API registrar — exposes an [`ApiObject`] to guest code as a table.
//!
//! ```lua
//! net.set_color(1, 2)   -- host member `$setColor`, captured at registration
//! net.frame_count()     -- host member `$frameCount`, resolved via __index
//! ```
//!
//! Registration problems are defects in the embedding application, not
//! script conditions: they are logged and returned to the caller, never
//! written to the console.

use spritebox_application::{ApiMember, ApiObject};
use spritebox_domain::{HostCallable, HostMap, HostValue, RegistrationError, guest_name, host_name};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error};

use super::guest_env::GuestEnvironment;

/// Guest-visible name → bound host callable. Immutable once built.
#[derive(Debug, Clone)]
pub struct CapabilityTable {
    entries: BTreeMap<String, HostCallable>,
}

impl CapabilityTable {
    /// Build the table from a registration list.
    ///
    /// Members without the sentinel prefix are skipped. Prefixed members
    /// must be callable, must have a name after the prefix, and must not
    /// collide on their guest name.
    pub fn from_members(api: &str, members: Vec<ApiMember>) -> Result<Self, RegistrationError> {
        let mut entries: BTreeMap<String, (String, HostCallable)> = BTreeMap::new();

        for member in members {
            let Some(guest) = guest_name(&member.name) else {
                continue;
            };
            if guest.is_empty() {
                return Err(RegistrationError::InvalidName {
                    api: api.to_string(),
                    member: member.name,
                });
            }
            let HostValue::Callable(callable) = member.value else {
                return Err(RegistrationError::NotCallable {
                    api: api.to_string(),
                    member: member.name,
                });
            };
            if let Some((first, _)) = entries.get(&guest) {
                return Err(RegistrationError::DuplicateMember {
                    api: api.to_string(),
                    first: first.clone(),
                    second: member.name,
                    guest_name: guest,
                });
            }
            entries.insert(guest, (member.name, callable));
        }

        Ok(Self {
            entries: entries
                .into_iter()
                .map(|(guest, (_, callable))| (guest, callable))
                .collect(),
        })
    }

    pub fn get(&self, guest_name: &str) -> Option<&HostCallable> {
        self.entries.get(guest_name)
    }

    /// Guest-visible names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The table as a host map of callables, ready to push to the guest.
    pub fn to_host_value(&self) -> HostValue {
        let map: HostMap = self
            .entries
            .iter()
            .map(|(name, callable)| (name.clone(), HostValue::Callable(callable.clone())))
            .collect();
        HostValue::Map(map)
    }
}

/// Binds API objects into a guest environment.
pub struct ApiRegistrar;

impl ApiRegistrar {
    /// Expose `api` under the global `global_name`.
    ///
    /// 1. Capture the `$`-prefixed members as a [`CapabilityTable`]
    /// 2. Bind it to `global_name` as a guest table
    /// 3. Attach an `__index` fallback that maps guest names back to host
    ///    names and asks [`ApiObject::lookup`] for late-bound members
    pub fn register<A: ApiObject>(
        global_name: &str,
        env: &GuestEnvironment,
        api: Arc<A>,
    ) -> Result<CapabilityTable, RegistrationError> {
        Self::bind(global_name, env, api).inspect_err(|e| {
            error!(global = global_name, "API registration failed: {}", e);
        })
    }

    fn bind<A: ApiObject>(
        global_name: &str,
        env: &GuestEnvironment,
        api: Arc<A>,
    ) -> Result<CapabilityTable, RegistrationError> {
        let api_name = api.api_name().to_string();
        let table = CapabilityTable::from_members(&api_name, Arc::clone(&api).members())?;

        let guest_error = |source| RegistrationError::Guest {
            api: api_name.clone(),
            source,
        };

        env.set_global(global_name, &table.to_host_value())
            .map_err(guest_error)?;

        let fallback = Arc::clone(&api);
        env.set_metatable(global_name, move |guest| {
            Arc::clone(&fallback).lookup(&host_name(guest))
        })
        .map_err(guest_error)?;

        debug!(
            global = global_name,
            api = %api_name,
            members = table.len(),
            "API registered"
        );
        Ok(table)
    }
}
