use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod pool;
pub mod registration;

use crate::middleware::admin::AdminMiddleware;
use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(auth::login)
        .service(backend_health::backend_health);

    // Pool routes (require authentication)
    cfg.service(
        web::scope("/pool")
            .wrap(AuthMiddleware)
            .service(pool::get_fixtures)
            .service(pool::get_fixture)
            .service(pool::put_prediction)
            .service(pool::get_my_predictions)
            .service(pool::create_group)
            .service(pool::join_group)
            .service(pool::get_my_groups)
            .service(pool::get_group_members)
            .service(pool::get_leaderboard)
            .service(pool::get_rules),
    );

    // Competition-data writes (require admin)
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            .service(admin::create_fixture)
            .service(admin::record_fixture_result),
    );
}
