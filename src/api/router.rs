use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::api::errors::panic_fault;
use crate::api::handlers::{
    business_fault_handler, custom_message_handler, invalid_body_handler,
    invalid_path_variable_handler, invalid_request_param_handler, json_handler, no_route_fallback,
    panic_handler, post_only_handler, type_mismatch_handler, unclassified_handler,
    wrapped_business_fault_handler,
};
use crate::api::middleware::fault_translation::{FaultTranslationConfig, FaultTranslationLayer};
use crate::api::middleware::request_id::request_id_middleware;
use crate::application::FaultDispatcher;

/// Install fault translation on `router` with the default configuration
pub fn apply_fault_translation(router: Router, dispatcher: Arc<FaultDispatcher>) -> Router {
    apply_fault_translation_with(router, dispatcher, FaultTranslationConfig::default())
}

/// Install the route-not-found fallback, panic catching, the translation
/// layer and request tracing on `router`.
///
/// Call this after every route is registered; routes added later are not
/// covered.
pub fn apply_fault_translation_with(
    router: Router,
    dispatcher: Arc<FaultDispatcher>,
    config: FaultTranslationConfig,
) -> Router {
    let mut router = router.fallback(no_route_fallback);

    if config.catch_panics {
        router = router.layer(CatchPanicLayer::custom(panic_fault));
    }

    router = router.layer(FaultTranslationLayer::new(dispatcher).with_config(config));

    if config.trace_requests {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

/// Routes raising one fault of each kind
pub fn demo_routes() -> Router {
    Router::new()
        .route("/test/app-ex", get(business_fault_handler))
        .route("/test/app-ex-custom", get(custom_message_handler))
        .route(
            "/test/app-ex-wrapped/{id}",
            get(wrapped_business_fault_handler),
        )
        .route("/test/invalid-request-body", post(invalid_body_handler))
        .route(
            "/test/invalid-path-variable/{id}",
            get(invalid_path_variable_handler),
        )
        .route(
            "/test/invalid-request-parm",
            get(invalid_request_param_handler),
        )
        .route("/test/ex", get(unclassified_handler))
        .route("/test/panic", get(panic_handler))
        .route("/test/invalid-method", post(post_only_handler))
        .route("/test/invalid-json", post(json_handler))
        .route("/test/mismatch/{id}", get(type_mismatch_handler))
}

/// Create the demo router with fault translation and request correlation
pub fn create_router(dispatcher: Arc<FaultDispatcher>) -> Router {
    apply_fault_translation(demo_routes(), dispatcher)
        .layer(axum_middleware::from_fn(request_id_middleware))
}
