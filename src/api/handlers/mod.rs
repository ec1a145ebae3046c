pub mod demo;
pub mod fallback;

pub use demo::{
    business_fault_handler, custom_message_handler, invalid_body_handler,
    invalid_path_variable_handler, invalid_request_param_handler, json_handler, panic_handler,
    post_only_handler, type_mismatch_handler, unclassified_handler,
    wrapped_business_fault_handler,
};
pub use fallback::no_route_fallback;
