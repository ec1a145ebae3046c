pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use errors::{ApiResult, PendingFault, TranslatedFault};
pub use extractors::{TypedPath, ValidatedJson, ValidatedPath, ValidatedQuery};
pub use router::{apply_fault_translation, apply_fault_translation_with, create_router};
