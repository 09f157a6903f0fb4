//! Rate limiting middleware.
//!
//! Checks the shared [`RateLimiter`] before a request reaches any handler.
//! Denied requests get a 429 with a `Retry-After` header; a limiter
//! backend failure lets the request through (fail open).

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use chronicle_shared::ErrorResponse;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chronicle_core::ports::RateLimiter;

/// Rate limiting middleware factory.
pub struct RateLimitMiddleware {
    limiter: Arc<dyn RateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitService {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitService<S> {
    service: S,
    limiter: Arc<dyn RateLimiter>,
}

fn too_many_requests(reset_after: Duration) -> HttpResponse {
    let secs = reset_after.as_secs();
    let error = ErrorResponse::new(429, "Too Many Requests")
        .with_detail(format!("Rate limit exceeded. Try again in {} seconds.", secs));

    HttpResponse::TooManyRequests()
        .insert_header(("X-RateLimit-Remaining", "0"))
        .insert_header(("Retry-After", secs.to_string()))
        .json(error)
}

impl<S, B> Service<ServiceRequest> for RateLimitService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Client identifier: the peer address as seen through proxies.
        let key = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        // The in-memory limiter resolves immediately; block_on keeps the
        // check ahead of the inner service call.
        let verdict = futures::executor::block_on(self.limiter.check(&key));

        match verdict {
            Ok(result) if !result.allowed => {
                tracing::warn!(client = %key, "Rate limit exceeded");

                let (http_req, _payload) = req.into_parts();
                let response = ServiceResponse::new(http_req, too_many_requests(result.reset_after));

                Box::pin(async move { Ok(response.map_into_right_body()) })
            }
            other => {
                if other.is_err() {
                    tracing::error!("Rate limiter error, failing open");
                }

                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
        }
    }
}
