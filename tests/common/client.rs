//! HTTP driver for the end-to-end suite.
//!
//! Wraps reqwest with one method per endpoint and returns raw responses for
//! the assertions. When routes or request formats change, update only this
//! file.

use std::time::Duration;

use reqwest::Response;
use scribe::store::NewPost;
use serde_json::json;

const REQUEST_TIMEOUT_SECS: u64 = 5;

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build http client");
        Self { client, base_url }
    }

    /// GET /posts
    pub async fn list_posts(&self) -> Response {
        self.client
            .get(format!("{}/posts", self.base_url))
            .send()
            .await
            .expect("list request failed")
    }

    /// GET /posts/<id>
    pub async fn get_post(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/posts/{}", self.base_url, id))
            .send()
            .await
            .expect("get request failed")
    }

    /// POST /posts
    pub async fn create_post(&self, post: &NewPost) -> Response {
        self.create_post_raw(&json!({
            "title": post.title,
            "content": post.content,
            "author": {
                "firstName": post.author.first_name,
                "lastName": post.author.last_name,
            },
        }))
        .await
    }

    /// POST /posts with an arbitrary body, for malformed-payload cases.
    pub async fn create_post_raw(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/posts", self.base_url))
            .json(body)
            .send()
            .await
            .expect("create request failed")
    }

    /// DELETE /posts/<id>
    pub async fn delete_post(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/posts/{}", self.base_url, id))
            .send()
            .await
            .expect("delete request failed")
    }
}
