use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use super::config::FaultTranslationConfig;
use super::utils::FaultUtils;
use crate::application::FaultDispatcher;
use crate::domain::fault::Fault;

/// Fault translation middleware layer
#[derive(Clone)]
pub struct FaultTranslationLayer {
    dispatcher: Arc<FaultDispatcher>,
    config: FaultTranslationConfig,
}

impl FaultTranslationLayer {
    pub fn new(dispatcher: Arc<FaultDispatcher>) -> Self {
        Self {
            dispatcher,
            config: FaultTranslationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FaultTranslationConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S> tower::Layer<S> for FaultTranslationLayer
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Service = FaultTranslationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FaultTranslationService {
            inner,
            dispatcher: Arc::clone(&self.dispatcher),
            config: self.config,
        }
    }
}

/// Fault translation service wrapper
#[derive(Clone)]
pub struct FaultTranslationService<S> {
    inner: S,
    dispatcher: Arc<FaultDispatcher>,
    config: FaultTranslationConfig,
}

impl<S> tower::Service<Request> for FaultTranslationService<S>
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let dispatcher = Arc::clone(&self.dispatcher);
        let config = self.config;

        Box::pin(async move {
            let method = req.method().clone();
            let path = req.uri().path().to_string();
            let mut response = inner.call(req).await?;

            if let Some(fault) = FaultUtils::take_pending(&mut response) {
                return Ok(dispatcher.dispatch(&fault).into_response());
            }

            if config.translate_method_not_allowed
                && FaultUtils::is_bare_method_not_allowed(&response)
            {
                let allow = response.headers().get(header::ALLOW).cloned();
                let fault = Fault::MethodNotAllowed {
                    method,
                    allowed: FaultUtils::allowed_methods(response.headers()),
                };
                return Ok(Self::with_allow(
                    dispatcher.dispatch(&fault).into_response(),
                    allow,
                ));
            }

            if config.translate_bare_errors
                && response.status() != StatusCode::METHOD_NOT_ALLOWED
                && FaultUtils::is_bare_error(&response)
            {
                let status = response.status();
                let detail = FaultUtils::body_text(response.into_body()).await;
                let fault = FaultUtils::bare_fault(status, method, path, detail);
                return Ok(dispatcher.dispatch(&fault).into_response());
            }

            Ok(response)
        })
    }
}

impl<S> FaultTranslationService<S> {
    fn with_allow(mut response: Response, allow: Option<HeaderValue>) -> Response {
        if let Some(allow) = allow {
            response.headers_mut().insert(header::ALLOW, allow);
        }
        response
    }
}
