//! In-memory form for formrel.
//!
//! [`Form`] implements [`formrel_model::Container`]: it owns a flat list of
//! [`FormField`]s, notifies subscribed listeners synchronously when an input
//! value changes or when the form becomes ready, and collects the values of
//! its enabled inputs with [`Form::data`].

mod error;
mod field;
mod form;
mod snapshot;

pub use error::FormError;
pub use field::FormField;
pub use form::Form;
pub use snapshot::{FieldSnapshot, FieldState, FormSnapshot};
