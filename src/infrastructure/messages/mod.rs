mod catalog;

pub use catalog::{CatalogError, MessageCatalog, ROOT_BUNDLE};
