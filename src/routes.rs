use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

use crate::store::{self, Author, NewPost, Post};
use crate::{DbPool, DbPoolExt};

// ─── Models ───

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

fn err(status: Status, msg: &str, code: &str) -> (Status, Json<ApiError>) {
    (status, Json(ApiError { error: msg.to_string(), code: code.to_string() }))
}

fn db_err(msg: &str) -> (Status, Json<ApiError>) {
    err(Status::InternalServerError, msg, "DB_ERROR")
}

#[derive(Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author.display(),
            created: post.created.to_rfc3339(),
        }
    }
}

// ─── Request bodies ───

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorReq {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct CreatePostReq {
    pub title: String,
    pub content: String,
    pub author: AuthorReq,
}

// ─── Routes ───

#[get("/health")]
pub fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "version": "0.1.0"}))
}

#[get("/posts")]
pub fn list_posts(db: &State<DbPool>) -> Result<Json<Vec<PostResponse>>, (Status, Json<ApiError>)> {
    let conn = db.conn();
    let posts = store::list_all(&conn).map_err(|e| db_err(&e.to_string()))?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[get("/posts/<post_id>")]
pub fn get_post(post_id: &str, db: &State<DbPool>) -> Result<Json<PostResponse>, (Status, Json<ApiError>)> {
    let conn = db.conn();
    store::find_by_id(&conn, post_id)
        .map_err(|e| db_err(&e.to_string()))?
        .map(|post| Json(PostResponse::from(post)))
        .ok_or_else(|| err(Status::NotFound, "Post not found", "NOT_FOUND"))
}

#[post("/posts", format = "json", data = "<req>")]
pub fn create_post(req: Json<CreatePostReq>, db: &State<DbPool>) -> Result<(Status, Json<PostResponse>), (Status, Json<ApiError>)> {
    let title = req.title.trim();
    let content = req.content.trim();
    let first_name = req.author.first_name.trim();
    let last_name = req.author.last_name.trim();
    if title.is_empty() || content.is_empty() || first_name.is_empty() || last_name.is_empty() {
        return Err(err(
            Status::UnprocessableEntity,
            "title, content and author names are required",
            "VALIDATION_ERROR",
        ));
    }

    let new_post = NewPost {
        title: title.to_string(),
        content: content.to_string(),
        author: Author {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        },
    };

    let conn = db.conn();
    let post = store::insert(&conn, &new_post).map_err(|e| db_err(&e.to_string()))?;
    Ok((Status::Created, Json(PostResponse::from(post))))
}

#[delete("/posts/<post_id>")]
pub fn delete_post(post_id: &str, db: &State<DbPool>) -> Result<Status, (Status, Json<ApiError>)> {
    let conn = db.conn();
    let removed = store::delete(&conn, post_id).map_err(|e| db_err(&e.to_string()))?;
    if !removed {
        return Err(err(Status::NotFound, "Post not found", "NOT_FOUND"));
    }
    Ok(Status::NoContent)
}

// ─── Catchers ───

#[catch(404)]
pub fn not_found() -> Json<ApiError> {
    Json(ApiError { error: "Not found".to_string(), code: "NOT_FOUND".to_string() })
}

#[catch(422)]
pub fn unprocessable() -> Json<ApiError> {
    Json(ApiError { error: "Request body is invalid".to_string(), code: "VALIDATION_ERROR".to_string() })
}

#[catch(500)]
pub fn internal_error() -> Json<ApiError> {
    Json(ApiError { error: "Internal server error".to_string(), code: "INTERNAL_ERROR".to_string() })
}
