#[macro_use]
extern crate rocket;

use std::sync::{Arc, Mutex};

#[launch]
fn rocket() -> _ {
    let db_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/posts.db".to_string());
    std::fs::create_dir_all(std::path::Path::new(&db_path).parent().unwrap_or(std::path::Path::new("."))).ok();
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open database");
    scribe::store::initialize(&conn);

    scribe::create_rocket(Arc::new(Mutex::new(conn)))
}
