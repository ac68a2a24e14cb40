// src/middleware/rate_limit.rs
// DOCUMENTATION: Per-IP request rate limiting
// PURPOSE: Reject abusive clients with 429 before handlers run
//
// State lives in this process only - with multiple instances each one
// enforces its own budget.

use crate::errors::KopilkaError;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

type IpLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Rate limiting middleware factory
/// DOCUMENTATION: Wrap the App with .wrap(RateLimit::new(...))
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<IpLimiter>,
}

impl RateLimit {
    /// Sustained requests per minute with an initial burst allowance
    pub fn new(per_minute: u32, burst: u32) -> Self {
        let per_minute = NonZeroU32::new(per_minute.max(1)).unwrap();
        let burst = NonZeroU32::new(burst.max(1)).unwrap();

        let quota = Quota::per_minute(per_minute).allow_burst(burst);
        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    /// Whether a request from this client is within budget
    pub fn check(&self, key: &str) -> bool {
        self.limiter.check_key(&key.to_string()).is_ok()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RateLimitMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service,
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: S,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // First X-Forwarded-For hop when present, otherwise the peer address
        let client_ip = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        if !self.limit.check(&client_ip) {
            log::warn!("Rate limit exceeded for {}", client_ip);
            return Box::pin(ready(Err(KopilkaError::RateLimitExceeded.into())));
        }

        Box::pin(self.service.call(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_then_deny() {
        let limit = RateLimit::new(60, 3);

        assert!(limit.check("10.0.0.1"));
        assert!(limit.check("10.0.0.1"));
        assert!(limit.check("10.0.0.1"));
        // Burst of 3 is spent
        assert!(!limit.check("10.0.0.1"));
    }

    #[test]
    fn test_keys_are_independent() {
        let limit = RateLimit::new(60, 1);

        assert!(limit.check("10.0.0.1"));
        assert!(!limit.check("10.0.0.1"));

        // A different client still has budget
        assert!(limit.check("10.0.0.2"));
    }
}
