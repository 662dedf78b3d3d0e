pub mod analysis;
pub mod case_form;
pub mod chat;
pub mod document;
