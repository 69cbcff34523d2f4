//! Editing state and persistence for Lexfolio profile pages.
//!
//! Builds on the pure data in `lexfolio-types`:
//!
//! - [`Canvas`]: ordered blocks plus a single selection, with dirty tracking
//! - [`EditPanel`]: size, style, title and content edits for the selected block,
//!   and the two-press delete confirmation
//! - [`editors`]: one editor per content kind, borrowed from a block
//! - [`render`]: layout plans for the editor and public views
//! - [`templates`]: applying and creating templates, and the [`TemplateCatalog`]
//! - [`store`] and [`profile`]: async repositories for templates and profiles
//! - [`ProfileSession`]: one lawyer's canvas tied to a profile repository
//! - [`BuilderConfig`]: RON configuration
//!
//! No tracing subscriber is installed here; binaries choose their own.

pub mod canvas;
pub mod config;
pub mod editors;
pub mod error;
pub mod panel;
pub mod profile;
pub mod render;
pub mod session;
pub mod store;
pub mod templates;

pub use canvas::{Canvas, DockSection, dock};
pub use config::{BuilderConfig, TemplateStoreKind};
pub use editors::ContentEditor;
pub use error::{BuilderError, Result};
pub use panel::{DeleteConfirm, DeleteOutcome, DeletePress, EditPanel};
pub use profile::{FsProfileStore, MemoryProfileStore, ProfileRepository};
pub use render::{Cell, LayoutPlan, plan, plan_stored};
pub use session::{ProfileSession, starter_blocks};
pub use store::TemplateRepository;
pub use templates::{TemplateCatalog, apply_template, create_from_current};
