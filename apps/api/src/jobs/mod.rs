// Job posting form: draft model, declarative validation, immediate-mode form
// state, candidate preview. Postings are never persisted.

pub mod form;
pub mod handlers;
pub mod models;
pub mod preview;
pub mod validation;
