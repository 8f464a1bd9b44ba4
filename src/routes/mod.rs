pub mod documents;
pub mod root;
