mod confirm_email;
mod edit_profile;
mod list_users;
mod login;
mod logout;
mod password_reset;
mod profile;
mod register;

pub fn account_routes_config(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(register::register)
        .service(confirm_email::confirm_email)
        .service(login::login)
        .service(logout::logout)
        .service(profile::profile)
        .service(edit_profile::edit_profile)
        .service(list_users::list_users)
        .service(password_reset::request::request_password_reset)
        .service(password_reset::done::password_reset_done)
        .service(password_reset::confirm::confirm_password_reset)
        .service(password_reset::complete::complete_password_reset);
}
