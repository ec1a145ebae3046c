use axum::http::{Method, Uri};

use crate::domain::fault::Fault;

/// Fallback for requests no route matches
pub async fn no_route_fallback(method: Method, uri: Uri) -> Fault {
    Fault::NoRoute {
        method,
        path: uri.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fault::FaultKind;

    #[tokio::test]
    async fn test_fallback_raises_no_route() {
        let fault = no_route_fallback(Method::DELETE, Uri::from_static("/nowhere?x=1")).await;

        assert_eq!(fault.kind(), FaultKind::NoRoute);
        assert_eq!(fault.to_string(), "no route for DELETE /nowhere");
    }
}
