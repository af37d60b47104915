use std::env;
use std::future::{ready, Ready};
use std::task::{Context, Poll};

use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpResponse,
};
use futures::future::LocalBoxFuture;

/// Bearer-key gate for the chat API. The widget on the public site runs with
/// no key configured, so the API is open when API_KEY is unset; setting it
/// locks the API down for staging deployments.
pub struct ApiKey;

impl<S, B> Transform<S, ServiceRequest> for ApiKey
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Transform = ApiKeyMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddleware { service }))
    }
}

pub struct ApiKeyMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authorized = match env::var("API_KEY") {
            Err(_) => true,
            Ok(key) => bearer_token(&req).map_or(false, |token| token == key),
        };

        if authorized {
            let fut = self.service.call(req);
            Box::pin(async move {
                let res: ServiceResponse<B> = fut.await?;
                Ok(res.map_into_left_body())
            })
        } else {
            Box::pin(async move {
                let (http_req, _payload) = req.into_parts();
                let res = HttpResponse::new(StatusCode::UNAUTHORIZED);
                Ok(ServiceResponse::new(http_req, res).map_into_right_body())
            })
        }
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(String::from)
}
