//! Core deck model, validation, and the layout engine that turns typed
//! slide descriptions into positioned drawable elements.

pub mod assemble;
pub mod dispatch;
pub mod draft;
pub mod element;
pub mod error;
pub mod geometry;
pub mod guard;
pub mod layout;
pub mod markup;
pub mod naming;
pub mod options;
pub mod payload;
pub mod types;

pub use assemble::{assemble, DeckLayout};
pub use dispatch::{dispatch, SlideKind};
pub use draft::{draft_presentation, DraftOptions};
pub use element::{DrawableElement, Role, SlideLayout};
pub use error::{Error, Result, ValidationError};
pub use options::{AgendaPredicate, LayoutOptions};
pub use payload::{presentation_from_model_output, PayloadOptions};
pub use types::{Intake, Presentation, Slide, SlideRecord};
