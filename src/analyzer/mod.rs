//! Item records to corpus documents.

pub mod document;
pub mod keyword;
