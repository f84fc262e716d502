//! Domain error types
//!
//! Three families of failure cross the scripting boundary:
//!
//! - [`ScriptError`] — load, runtime and boundary-conversion faults raised by
//!   guest code. The script driver contains these and renders them as one
//!   console line each.
//! - [`RegistrationError`] — an API object violates the registration
//!   contract. This is a defect in the embedding application and is never
//!   contained by the per-frame driver.
//! - [`RenderError`] — a render collaborator rejected a request (bounds).

use thiserror::Error;

/// Which way a value was travelling when conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Guest value → host value
    ToHost,
    /// Host value → guest value
    ToGuest,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToHost => write!(f, "host"),
            Self::ToGuest => write!(f, "guest"),
        }
    }
}

/// Faults raised while loading or running guest code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("load error: {0}")]
    Load(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("unsupported type: cannot convert {type_name} to {direction}")]
    UnsupportedType {
        type_name: String,
        direction: Direction,
    },

    #[error("unsupported type: cyclic table cannot be converted to host")]
    CyclicTable,

    #[error("unsupported type: table nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ScriptError {
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime(message.into())
    }

    pub fn unsupported(type_name: impl Into<String>, direction: Direction) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
            direction,
        }
    }

    /// Whether this error was raised by the compiler rather than at run time
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }
}

/// An API object violated the registration contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    #[error("api '{api}': member '{member}' is exposed but not callable")]
    NotCallable { api: String, member: String },

    #[error("api '{api}': members '{first}' and '{second}' both map to '{guest_name}'")]
    DuplicateMember {
        api: String,
        first: String,
        second: String,
        guest_name: String,
    },

    #[error("api '{api}': member '{member}' has no name after the prefix")]
    InvalidName { api: String, member: String },

    #[error("api '{api}': failed to bind capability table: {source}")]
    Guest {
        api: String,
        #[source]
        source: ScriptError,
    },
}

/// A render collaborator rejected a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("sprite index {index} out of range (0..{limit})")]
    SpriteOutOfRange { index: i64, limit: u32 },

    #[error("palette index {index} out of range (0..{limit})")]
    PaletteOutOfRange { index: i64, limit: u32 },
}
