use super::handlers::{
    add_user_warning, authenticate, fetch_user_profile, register_user_account,
    update_home_address, update_user_profile,
};
use crate::middleware::RequireAuth;
use actix_web::web;

pub fn user_route(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register_user_account)));
    cfg.service(web::resource("/authenticate").route(web::post().to(authenticate)));
    cfg.service(
        web::resource("/profile")
            .route(web::put().to(update_user_profile))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/profile/address")
            .route(web::put().to(update_home_address))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/{user_id}/warning")
            .route(web::post().to(add_user_warning))
            .wrap(RequireAuth),
    );
    cfg.service(
        web::resource("/{user_id}")
            .route(web::get().to(fetch_user_profile))
            .wrap(RequireAuth),
    );
}
