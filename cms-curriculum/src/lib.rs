//! # cms-curriculum
//!
//! Curriculum data for the course pages: the section/lecture model, the
//! client for the internal `/api/curriculums/{slug}` endpoint, and the
//! progressive-disclosure view state behind the curriculum widget.
//!
//! The view is a plain state machine so the rendering layer stays dumb:
//!
//! ```rust
//! use cms_curriculum::{CurriculumView, Phase};
//!
//! let mut view = CurriculumView::new();
//! let token = view.begin_fetch();
//! // ... fetch resolves elsewhere ...
//! view.resolve(token, Ok(vec![]));
//! assert_eq!(*view.phase(), Phase::Ready);
//! assert!(view.visible_sections().is_empty());
//! ```

mod client;
mod model;
mod view;

pub use client::{CurriculumClient, FetchError};
pub use model::{Curriculum, Lecture, Section, decode};
pub use view::{COLLAPSED_SECTIONS, CurriculumView, Phase, RequestToken};
