pub mod token;
pub mod compare;
pub mod document;
