pub mod fault_translation;
pub mod request_id;
