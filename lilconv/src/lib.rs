//! Converts Unity-Chan Toon Shader materials into lilToon materials.

pub mod ao;
pub mod apply;
pub mod bake;
pub mod batch;
pub mod classify;
pub mod codegen;
pub mod config;
pub mod destination;
pub mod lookups;
pub mod messages;
pub mod slots;
pub mod translate;

pub use batch::{BatchReport, Confirm, Converter};
pub use classify::{classify, ClassificationFlags, SourceFamily};
pub use config::{AoPolicy, Config, Settings};
pub use messages::{Language, Text};
pub use slots::{ShaderVariant, TargetPropertySet};
pub use translate::{translate, Translation};
