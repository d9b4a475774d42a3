//! Render dispatcher for Vitrina documents.
//!
//! Turns a [`Document`](vitrina_types::Document) into an ordered sequence of
//! [`RenderedBlock`]s. Rendering a document never fails as a whole:
//!
//! - unknown block types render an "unsupported block" placeholder;
//! - a block whose view errors or panics renders an inline error placeholder
//!   carrying its type and index, and its siblings are untouched;
//! - referential blocks (`program-card`, `programs-grid`, `blog-card`,
//!   `blogs-grid`) show `Loading` until resolved and `NothingSelected` when
//!   nothing resolves.
//!
//! Output is a [`Node`] tree. Rich-text fields go through the allow-list
//! sanitizer ([`sanitize::sanitize`]); everything else is escaped.

mod comparison;
mod dispatch;
mod error;
mod icons;
mod node;
mod resolve;
pub mod sanitize;
mod state;
mod video;
mod views;

pub use comparison::{Cell, ComparisonMatrix};
pub use dispatch::{Dispatcher, RenderOutcome, RenderedBlock, to_html};
pub use error::{RenderError, Result};
pub use icons::{BuiltinIcons, Icon, IconLookup};
pub use node::{Element, Node, el, text};
pub use resolve::{
    InMemoryResolver, Record, RecordKind, ReferenceResolver, ReferenceSlot, SlotState,
    order_by_request, reference_request,
};
pub use state::{AccordionState, LightboxRegistry, ScrollLock, TabsState};
pub use video::{Platform, VideoSource};
