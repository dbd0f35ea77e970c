//! Endpoint Catalog
//!
//! Fixed REST paths and verbs of the backend, grouped by resource. Each view
//! borrows the client and maps one call onto one request.

use crate::api::request::UploadTarget;
use crate::error::Result;
use crate::RequestClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Pagination parameters sent as `page` / `size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    pub size: u32,
}

impl Page {
    /// Default for feeds, search and discovery
    pub const FEED: Page = Page { page: 1, size: 10 };

    /// Default for follow lists, chats and notifications
    pub const LIST: Page = Page { page: 1, size: 20 };

    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

impl RequestClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi { client: self }
    }

    pub fn posts(&self) -> PostApi<'_> {
        PostApi { client: self }
    }

    pub fn comments(&self) -> CommentApi<'_> {
        CommentApi { client: self }
    }

    pub fn messages(&self) -> MessageApi<'_> {
        MessageApi { client: self }
    }

    pub fn discover(&self) -> DiscoverApi<'_> {
        DiscoverApi { client: self }
    }

    pub fn topics(&self) -> TopicApi<'_> {
        TopicApi { client: self }
    }

    pub fn uploads(&self) -> UploadApi<'_> {
        UploadApi { client: self }
    }

    pub fn system(&self) -> SystemApi<'_> {
        SystemApi { client: self }
    }
}

/// Login and verification codes
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a RequestClient,
}

impl AuthApi<'_> {
    pub async fn login_with_phone(&self, phone: &str, code: &str) -> Result<Value> {
        self.client
            .post("/auth/login/phone", &json!({ "phone": phone, "code": code }))
            .await
    }

    pub async fn login_with_wechat(&self, code: &str, user_info: &Value) -> Result<Value> {
        self.client
            .post(
                "/auth/login/wechat",
                &json!({ "code": code, "userInfo": user_info }),
            )
            .await
    }

    pub async fn send_code(&self, phone: &str) -> Result<Value> {
        self.client
            .post("/auth/send-code", &json!({ "phone": phone }))
            .await
    }
}

/// Profiles and the follow graph
#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    client: &'a RequestClient,
}

impl UserApi<'_> {
    pub async fn info(&self, user_id: &str) -> Result<Value> {
        self.client.get(&format!("/user/{}", user_id), &()).await
    }

    pub async fn update_profile<B: Serialize + ?Sized>(&self, profile: &B) -> Result<Value> {
        self.client.put("/user/profile", profile).await
    }

    pub async fn stats(&self, user_id: &str) -> Result<Value> {
        self.client
            .get(&format!("/user/{}/stats", user_id), &())
            .await
    }

    pub async fn follow(&self, user_id: &str) -> Result<Value> {
        self.client
            .post(&format!("/user/{}/follow", user_id), &())
            .await
    }

    pub async fn unfollow(&self, user_id: &str) -> Result<Value> {
        self.client
            .delete(&format!("/user/{}/follow", user_id), &())
            .await
    }

    pub async fn following(&self, user_id: &str, page: Option<Page>) -> Result<Value> {
        self.client
            .get(
                &format!("/user/{}/following", user_id),
                &page.unwrap_or(Page::LIST),
            )
            .await
    }

    pub async fn followers(&self, user_id: &str, page: Option<Page>) -> Result<Value> {
        self.client
            .get(
                &format!("/user/{}/followers", user_id),
                &page.unwrap_or(Page::LIST),
            )
            .await
    }
}

/// Posts, likes and favorites
#[derive(Debug, Clone, Copy)]
pub struct PostApi<'a> {
    client: &'a RequestClient,
}

impl PostApi<'_> {
    pub async fn list(&self, page: Option<Page>) -> Result<Value> {
        self.client
            .get("/posts", &page.unwrap_or(Page::FEED))
            .await
    }

    pub async fn detail(&self, post_id: &str) -> Result<Value> {
        self.client.get(&format!("/posts/{}", post_id), &()).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, post: &B) -> Result<Value> {
        self.client.post("/posts", post).await
    }

    pub async fn delete(&self, post_id: &str) -> Result<Value> {
        self.client
            .delete(&format!("/posts/{}", post_id), &())
            .await
    }

    pub async fn like(&self, post_id: &str) -> Result<Value> {
        self.client
            .post(&format!("/posts/{}/like", post_id), &())
            .await
    }

    pub async fn unlike(&self, post_id: &str) -> Result<Value> {
        self.client
            .delete(&format!("/posts/{}/like", post_id), &())
            .await
    }

    pub async fn favorite(&self, post_id: &str) -> Result<Value> {
        self.client
            .post(&format!("/posts/{}/favorite", post_id), &())
            .await
    }

    pub async fn unfavorite(&self, post_id: &str) -> Result<Value> {
        self.client
            .delete(&format!("/posts/{}/favorite", post_id), &())
            .await
    }

    pub async fn by_user(&self, user_id: &str, page: Option<Page>) -> Result<Value> {
        self.client
            .get(
                &format!("/user/{}/posts", user_id),
                &page.unwrap_or(Page::FEED),
            )
            .await
    }

    pub async fn favorites_of(&self, user_id: &str, page: Option<Page>) -> Result<Value> {
        self.client
            .get(
                &format!("/user/{}/favorites", user_id),
                &page.unwrap_or(Page::FEED),
            )
            .await
    }
}

/// Comments and replies
#[derive(Debug, Clone, Copy)]
pub struct CommentApi<'a> {
    client: &'a RequestClient,
}

impl CommentApi<'_> {
    /// Comments of a post; `sort` defaults to `"time"`
    pub async fn list(&self, post_id: &str, page: Option<Page>, sort: Option<&str>) -> Result<Value> {
        let page = page.unwrap_or(Page::FEED);
        self.client
            .get(
                &format!("/posts/{}/comments", post_id),
                &json!({ "page": page.page, "size": page.size, "sort": sort.unwrap_or("time") }),
            )
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, post_id: &str, comment: &B) -> Result<Value> {
        self.client
            .post(&format!("/posts/{}/comments", post_id), comment)
            .await
    }

    pub async fn delete(&self, comment_id: &str) -> Result<Value> {
        self.client
            .delete(&format!("/comments/{}", comment_id), &())
            .await
    }

    pub async fn like(&self, comment_id: &str) -> Result<Value> {
        self.client
            .post(&format!("/comments/{}/like", comment_id), &())
            .await
    }

    pub async fn unlike(&self, comment_id: &str) -> Result<Value> {
        self.client
            .delete(&format!("/comments/{}/like", comment_id), &())
            .await
    }

    pub async fn reply<B: Serialize + ?Sized>(&self, comment_id: &str, reply: &B) -> Result<Value> {
        self.client
            .post(&format!("/comments/{}/reply", comment_id), reply)
            .await
    }
}

/// Chats and notifications
#[derive(Debug, Clone, Copy)]
pub struct MessageApi<'a> {
    client: &'a RequestClient,
}

impl MessageApi<'_> {
    pub async fn chats(&self, page: Option<Page>) -> Result<Value> {
        self.client
            .get("/messages/chats", &page.unwrap_or(Page::LIST))
            .await
    }

    pub async fn history(&self, user_id: &str, page: Option<Page>) -> Result<Value> {
        self.client
            .get(
                &format!("/messages/chat/{}", user_id),
                &page.unwrap_or(Page::LIST),
            )
            .await
    }

    pub async fn send<B: Serialize + ?Sized>(&self, user_id: &str, message: &B) -> Result<Value> {
        self.client
            .post(&format!("/messages/chat/{}", user_id), message)
            .await
    }

    pub async fn notifications(&self, page: Option<Page>) -> Result<Value> {
        self.client
            .get("/messages/notifications", &page.unwrap_or(Page::LIST))
            .await
    }

    pub async fn mark_read(&self, notification_id: &str) -> Result<Value> {
        self.client
            .put(
                &format!("/messages/notifications/{}/read", notification_id),
                &(),
            )
            .await
    }

    pub async fn mark_all_read(&self) -> Result<Value> {
        self.client
            .put("/messages/notifications/read-all", &())
            .await
    }
}

/// Discovery feeds and search
#[derive(Debug, Clone, Copy)]
pub struct DiscoverApi<'a> {
    client: &'a RequestClient,
}

impl DiscoverApi<'_> {
    pub async fn hot_topics(&self, page: Option<Page>) -> Result<Value> {
        self.client
            .get("/discover/topics/hot", &page.unwrap_or(Page::FEED))
            .await
    }

    pub async fn recommended_users(&self, page: Option<Page>) -> Result<Value> {
        self.client
            .get("/discover/users/recommend", &page.unwrap_or(Page::FEED))
            .await
    }

    pub async fn featured_posts(&self, page: Option<Page>) -> Result<Value> {
        self.client
            .get("/discover/posts/featured", &page.unwrap_or(Page::FEED))
            .await
    }

    pub async fn nearby_users(
        &self,
        latitude: f64,
        longitude: f64,
        page: Option<Page>,
    ) -> Result<Value> {
        let page = page.unwrap_or(Page::FEED);
        self.client
            .get(
                "/discover/users/nearby",
                &json!({
                    "latitude": latitude,
                    "longitude": longitude,
                    "page": page.page,
                    "size": page.size,
                }),
            )
            .await
    }

    pub async fn search_users(&self, keyword: &str, page: Option<Page>) -> Result<Value> {
        self.search("/search/users", keyword, page).await
    }

    pub async fn search_posts(&self, keyword: &str, page: Option<Page>) -> Result<Value> {
        self.search("/search/posts", keyword, page).await
    }

    pub async fn search_topics(&self, keyword: &str, page: Option<Page>) -> Result<Value> {
        self.search("/search/topics", keyword, page).await
    }

    async fn search(&self, path: &str, keyword: &str, page: Option<Page>) -> Result<Value> {
        let page = page.unwrap_or(Page::FEED);
        self.client
            .get(
                path,
                &json!({ "keyword": keyword, "page": page.page, "size": page.size }),
            )
            .await
    }
}

/// Topics
#[derive(Debug, Clone, Copy)]
pub struct TopicApi<'a> {
    client: &'a RequestClient,
}

impl TopicApi<'_> {
    pub async fn detail(&self, topic_id: &str) -> Result<Value> {
        self.client.get(&format!("/topics/{}", topic_id), &()).await
    }

    pub async fn posts(&self, topic_id: &str, page: Option<Page>) -> Result<Value> {
        self.client
            .get(
                &format!("/topics/{}/posts", topic_id),
                &page.unwrap_or(Page::FEED),
            )
            .await
    }

    pub async fn follow(&self, topic_id: &str) -> Result<Value> {
        self.client
            .post(&format!("/topics/{}/follow", topic_id), &())
            .await
    }

    pub async fn unfollow(&self, topic_id: &str) -> Result<Value> {
        self.client
            .delete(&format!("/topics/{}/follow", topic_id), &())
            .await
    }
}

/// Media uploads
#[derive(Debug, Clone, Copy)]
pub struct UploadApi<'a> {
    client: &'a RequestClient,
}

impl UploadApi<'_> {
    /// Target for an image upload, for callers that need extra fields or options
    pub fn image_target(file_path: &str) -> UploadTarget {
        UploadTarget::new("/upload/image", file_path).with_field_name("image")
    }

    pub fn video_target(file_path: &str) -> UploadTarget {
        UploadTarget::new("/upload/video", file_path).with_field_name("video")
    }

    pub fn audio_target(file_path: &str) -> UploadTarget {
        UploadTarget::new("/upload/audio", file_path).with_field_name("audio")
    }

    pub async fn image(&self, file_path: &str) -> Result<Value> {
        self.client.upload(Self::image_target(file_path)).await
    }

    pub async fn video(&self, file_path: &str) -> Result<Value> {
        self.client.upload(Self::video_target(file_path)).await
    }

    pub async fn audio(&self, file_path: &str) -> Result<Value> {
        self.client.upload(Self::audio_target(file_path)).await
    }
}

/// App configuration, versioning, feedback and reports
#[derive(Debug, Clone, Copy)]
pub struct SystemApi<'a> {
    client: &'a RequestClient,
}

impl SystemApi<'_> {
    pub async fn config(&self) -> Result<Value> {
        self.client.get("/system/config", &()).await
    }

    pub async fn version(&self) -> Result<Value> {
        self.client.get("/system/version", &()).await
    }

    pub async fn feedback<B: Serialize + ?Sized>(&self, feedback: &B) -> Result<Value> {
        self.client.post("/system/feedback", feedback).await
    }

    pub async fn report<B: Serialize + ?Sized>(&self, report: &B) -> Result<Value> {
        self.client.post("/system/report", report).await
    }
}
