use crate::{
    api::{admin, employee, ping, request_log::request_log_middleware},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use anyhow::{Context, Result};
use std::sync::Arc;

type Limiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Per-IP limiters, built once so every worker shares the same quotas.
#[derive(Clone)]
pub struct RateLimiters {
    login: Limiter,
    protected: Limiter,
}

impl RateLimiters {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            login: Arc::new(build_limiter(config.rate_login_per_min)?),
            protected: Arc::new(build_limiter(config.rate_protected_per_min)?),
        })
    }
}

fn build_limiter(requests_per_min: u32) -> Result<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limit configuration")?;
    Ok(Governor::new(&cfg))
}

// Middleware order on the protected scopes, outermost first:
// rate limit, request log, authentication.
pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, limiters: &RateLimiters) {
    cfg.service(
        web::scope(api_prefix)
            .service(web::resource("/ping").route(web::get().to(ping::ping)))
            .service(
                web::resource("/login")
                    .wrap(from_fn(request_log_middleware))
                    .wrap(limiters.login.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::scope("/admin")
                    .wrap(from_fn(auth_middleware))
                    .wrap(from_fn(request_log_middleware))
                    .wrap(limiters.protected.clone())
                    .route(
                        "/add-attendance-period",
                        web::post().to(admin::add_attendance_period),
                    )
                    .route("/run-payroll", web::post().to(admin::run_payroll))
                    .route(
                        "/get-payslip-summary/{period_id}",
                        web::get().to(admin::get_payslip_summary),
                    ),
            )
            .service(
                web::scope("/employee")
                    .wrap(from_fn(auth_middleware))
                    .wrap(from_fn(request_log_middleware))
                    .wrap(limiters.protected.clone())
                    .route(
                        "/submit-attendance",
                        web::post().to(employee::submit_attendance),
                    )
                    .route("/submit-overtime", web::post().to(employee::submit_overtime))
                    .route(
                        "/submit-reimbursement",
                        web::post().to(employee::submit_reimbursement),
                    )
                    .route(
                        "/generate-payslips",
                        web::get().to(employee::generate_payslips),
                    ),
            ),
    );
}
