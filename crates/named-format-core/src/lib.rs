//! named-format core
//!
//! Build-time compiler for named string templates. A body-less stub such as
//!
//! ```ignore
//! #[template("/forum/{boardId}/{boardNameSlug}")]
//! pub fn board(board_id: u32, slug: &str) -> String;
//! ```
//!
//! is validated against its parameter list and replaced by a generated
//! function that assembles the string.
//!
//! ## Pipeline
//!
//! 1. **Discovery**: impl items -> [`Candidate`]s
//! 2. **Binding**: candidate + template validation -> [`BoundMethod`] or [`Diagnostic`]
//! 3. **Driver**: partition, group by owning type, emit
//! 4. **Emission**: one [`GeneratedUnit`] per owning type, via a [`Strategy`]
//!
//! ## Modules
//!
//! - [`template`]: bracket validation and segment re-scan
//! - [`model`]: capability flags, parameter and method descriptors
//! - [`discovery`]: candidate extraction and type classification
//! - [`binding`]: template/signature checks
//! - [`emit`]: default and optimizing strategies
//! - [`driver`]: the generation pass
//! - [`config`]: options and configuration sources
//! - [`diagnostics`]: `NFGxxxx` diagnostics
//! - [`scan`]: whole-file generation

pub mod binding;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod driver;
pub mod emit;
pub mod model;
pub mod scan;
pub mod template;

pub use binding::bind;
pub use config::{ConfigSource, EmitterOptions, EnvSource};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticKind};
pub use discovery::{Candidate, Discovered, classify, discover, owning_type};
pub use driver::{GenerationOutput, Generator};
pub use emit::{GeneratedUnit, Strategy};
pub use model::{BoundMethod, Capabilities, CapabilityTag, OwningType, ParameterDescriptor, TypeKind};
pub use scan::generate_file;
pub use template::{Segment, SegmentError, Template, Validation, validate};
