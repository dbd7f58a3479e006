pub mod case;
pub mod engine;
pub mod matcher;
pub mod methods;
pub mod registry;
pub mod rules;
pub mod settings;
pub mod tmx;
pub mod unicode;
pub mod validate;

pub use engine::{transliterate, Engine, TransliterationError, TransliterationRequest, MAX_INPUT_CHARS};
pub use registry::{CaseMode, Method, MethodDescriptor, MethodRegistry, RegistryError};
