#[macro_use]
extern crate rocket;

pub mod routes;
pub mod store;

pub type DbPool = std::sync::Arc<std::sync::Mutex<rusqlite::Connection>>;

/// Extension trait for DbPool to recover from mutex poison
pub trait DbPoolExt {
    fn conn(&self) -> std::sync::MutexGuard<'_, rusqlite::Connection>;
}

impl DbPoolExt for DbPool {
    fn conn(&self) -> std::sync::MutexGuard<'_, rusqlite::Connection> {
        self.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub fn create_rocket(pool: DbPool) -> rocket::Rocket<rocket::Build> {
    let cors = rocket_cors::CorsOptions::default()
        .allowed_origins(rocket_cors::AllowedOrigins::all())
        .to_cors()
        .expect("CORS config");

    rocket::build()
        .manage(pool)
        .attach(cors)
        .mount("/", routes![
            routes::health,
            routes::list_posts,
            routes::get_post,
            routes::create_post,
            routes::delete_post,
        ])
        .register("/", catchers![
            routes::not_found,
            routes::unprocessable,
            routes::internal_error,
        ])
}
