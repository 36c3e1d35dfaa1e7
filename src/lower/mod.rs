//! Lowering of concrete macro syntax into the engine's message trees.
//!
//! The boundary between host and engine is the `MessageNode` variant set:
//! this module turns SWC syntax (tagged templates, options-object calls, JSX
//! elements) into that set, resolving import aliases and nested macro
//! invocations along the way, then hands each tree to the engine.

pub mod bindings;
pub mod context;
pub mod js;
pub mod jsx;
pub mod nested;
pub mod visitor;

pub use bindings::{MacroBindings, MacroKind};
pub use context::{CompiledSite, LowerCtx, SiteDiagnostic, SiteKind};
pub use visitor::{ModuleCompiler, ModuleOutput};
