//! API object port — host objects that expose capabilities to guest code.
//!
//! An API object publishes an explicit registration list of `{name, value}`
//! members, built once per registration. Members whose name starts with the
//! sentinel prefix (`$setColor`) are exposed to guest code under their
//! lower_snake_case name (`set_color`); every other member is host-only
//! unless the object resolves it through [`ApiObject::lookup`].
//!
//! ```ignore
//! impl ApiObject for NetApi {
//!     fn api_name(&self) -> &str { "net" }
//!
//!     fn members(self: Arc<Self>) -> Vec<ApiMember> {
//!         vec![ApiMember::bind(&self, "$setColor", |api, args| api.set_color(args))]
//!     }
//! }
//! ```

use spritebox_domain::{HostCallable, HostValue, ScriptError};
use std::sync::Arc;

/// One entry of an API object's registration list.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiMember {
    /// Host member name, including the sentinel prefix when exposed.
    pub name: String,
    pub value: HostValue,
}

impl ApiMember {
    /// A plain value member (never valid for exposed names).
    pub fn value(name: impl Into<String>, value: impl Into<HostValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// A free-standing callable member.
    pub fn method<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Vec<HostValue>) -> Result<HostValue, ScriptError> + Send + Sync + 'static,
    {
        let name = name.into();
        Self {
            value: HostValue::Callable(HostCallable::new(name.clone(), func)),
            name,
        }
    }

    /// A callable member bound to `receiver`.
    pub fn bind<T, F>(receiver: &Arc<T>, name: impl Into<String>, func: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T, Vec<HostValue>) -> Result<HostValue, ScriptError> + Send + Sync + 'static,
    {
        let receiver = Arc::clone(receiver);
        Self::method(name, move |args| func(&receiver, args))
    }
}

/// A host object exposing a capability table to guest code.
pub trait ApiObject: Send + Sync + 'static {
    /// Name used in diagnostics.
    fn api_name(&self) -> &str;

    /// The registration list, with callables bound to this instance.
    fn members(self: Arc<Self>) -> Vec<ApiMember>;

    /// Resolve a host member name at access time.
    ///
    /// Called by the guest-side `__index` fallback for names missing from
    /// the capability table. The default searches [`ApiObject::members`].
    fn lookup(self: Arc<Self>, host_name: &str) -> Option<HostValue> {
        self.members()
            .into_iter()
            .find(|member| member.name == host_name)
            .map(|member| member.value)
    }
}
