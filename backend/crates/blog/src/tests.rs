//! Unit tests for Blog crate
//! Drives the full router against an in-memory store shared with the auth gate

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use auth::{AuthResult, DirectoryUser, UserDirectory};
    use chrono::Utc;
    use kernel::id::{ArticleId, UserId};
    use platform::password::{ClearTextPassword, PasswordCodec};

    use crate::domain::entity::article::{Article, NewArticle};
    use crate::domain::entity::user::{NewUser, User};
    use crate::domain::repository::{ArticleRepository, UserRepository};
    use crate::error::{BlogError, BlogResult};

    #[derive(Default)]
    struct Tables {
        users: Vec<User>,
        articles: Vec<Article>,
        next_user: u64,
        next_article: u64,
    }

    /// In-memory store backing both the blog repositories and the user directory
    #[derive(Clone, Default)]
    pub struct MemoryBlog {
        tables: Arc<Mutex<Tables>>,
    }

    impl MemoryBlog {
        pub fn codec() -> PasswordCodec {
            PasswordCodec::new(auth::AuthConfig::default().encryption_salt)
        }

        pub fn seed_user(&self, name: &str, login: &str, password: &str) -> UserId {
            let mut tables = self.tables.lock().unwrap();
            tables.next_user += 1;
            let id = UserId::new(tables.next_user);
            let now = Utc::now();
            tables.users.push(User {
                id,
                name: name.to_string(),
                slug: name.to_lowercase(),
                login: login.to_string(),
                email: format!("{}@example.com", login),
                password: Self::codec().encode(&ClearTextPassword::new(password)),
                created_at: now,
                updated_at: now,
            });
            id
        }

        /// Insert an article without checking its owner
        pub fn seed_article(&self, user_id: u64, title: &str) -> ArticleId {
            let mut tables = self.tables.lock().unwrap();
            tables.next_article += 1;
            let id = ArticleId::new(tables.next_article);
            let now = Utc::now();
            tables.articles.push(Article {
                id,
                user_id: UserId::new(user_id),
                title: title.to_string(),
                slug: title.to_lowercase(),
                content: format!("{} body", title),
                created_at: now,
                updated_at: now,
            });
            id
        }

        pub fn stored_password(&self, id: UserId) -> Option<String> {
            self.tables
                .lock()
                .unwrap()
                .users
                .iter()
                .find(|u| u.id == id)
                .map(|u| u.password.as_str().to_string())
        }

        pub fn article(&self, id: ArticleId) -> Option<Article> {
            self.tables
                .lock()
                .unwrap()
                .articles
                .iter()
                .find(|a| a.id == id)
                .cloned()
        }

        fn directory_user(user: &User) -> DirectoryUser {
            DirectoryUser {
                id: user.id,
                login: user.login.clone(),
                password: user.password.clone(),
            }
        }
    }

    impl UserRepository for MemoryBlog {
        async fn list_users(&self) -> BlogResult<Vec<User>> {
            Ok(self.tables.lock().unwrap().users.clone())
        }

        async fn find_user(&self, id: UserId) -> BlogResult<Option<User>> {
            Ok(self
                .tables
                .lock()
                .unwrap()
                .users
                .iter()
                .find(|u| u.id == id)
                .cloned())
        }

        async fn find_users(&self, ids: &[UserId]) -> BlogResult<Vec<User>> {
            Ok(self
                .tables
                .lock()
                .unwrap()
                .users
                .iter()
                .filter(|u| ids.contains(&u.id))
                .cloned()
                .collect())
        }

        async fn create_user(&self, user: NewUser) -> BlogResult<User> {
            let mut tables = self.tables.lock().unwrap();
            if tables.users.iter().any(|u| u.login == user.login) {
                return Err(BlogError::Conflict("User Login"));
            }

            tables.next_user += 1;
            let now = Utc::now();
            let user = User {
                id: UserId::new(tables.next_user),
                name: user.name,
                slug: user.slug,
                login: user.login,
                email: user.email,
                password: user.password,
                created_at: now,
                updated_at: now,
            };
            tables.users.push(user.clone());
            Ok(user)
        }

        async fn update_user(&self, user: &User) -> BlogResult<User> {
            let mut tables = self.tables.lock().unwrap();
            let stored = tables
                .users
                .iter_mut()
                .find(|u| u.id == user.id)
                .ok_or(BlogError::UserNotFound(user.id))?;
            *stored = User {
                updated_at: Utc::now(),
                ..user.clone()
            };
            Ok(stored.clone())
        }

        async fn delete_user(&self, id: UserId) -> BlogResult<bool> {
            let mut tables = self.tables.lock().unwrap();
            let before = tables.users.len();
            tables.users.retain(|u| u.id != id);
            Ok(tables.users.len() < before)
        }
    }

    impl ArticleRepository for MemoryBlog {
        async fn list_articles(&self, owner: Option<UserId>) -> BlogResult<Vec<Article>> {
            Ok(self
                .tables
                .lock()
                .unwrap()
                .articles
                .iter()
                .filter(|a| owner.is_none_or(|owner| a.user_id == owner))
                .cloned()
                .collect())
        }

        async fn find_article(&self, id: ArticleId) -> BlogResult<Option<Article>> {
            Ok(self.article(id))
        }

        async fn create_article(&self, article: NewArticle) -> BlogResult<Article> {
            let mut tables = self.tables.lock().unwrap();
            tables.next_article += 1;
            let now = Utc::now();
            let article = Article {
                id: ArticleId::new(tables.next_article),
                user_id: article.user_id,
                title: article.title,
                slug: article.slug,
                content: article.content,
                created_at: now,
                updated_at: now,
            };
            tables.articles.push(article.clone());
            Ok(article)
        }

        async fn update_article(&self, article: &Article) -> BlogResult<Article> {
            let mut tables = self.tables.lock().unwrap();
            let stored = tables
                .articles
                .iter_mut()
                .find(|a| a.id == article.id)
                .ok_or(BlogError::ArticleNotFound(article.id))?;
            *stored = Article {
                updated_at: Utc::now(),
                ..article.clone()
            };
            Ok(stored.clone())
        }

        async fn delete_article(&self, id: ArticleId) -> BlogResult<bool> {
            let mut tables = self.tables.lock().unwrap();
            let before = tables.articles.len();
            tables.articles.retain(|a| a.id != id);
            Ok(tables.articles.len() < before)
        }
    }

    impl UserDirectory for MemoryBlog {
        async fn find_by_id(&self, id: UserId) -> AuthResult<Option<DirectoryUser>> {
            Ok(self
                .tables
                .lock()
                .unwrap()
                .users
                .iter()
                .find(|u| u.id == id)
                .map(Self::directory_user))
        }

        async fn find_by_login(&self, login: &str) -> AuthResult<Option<DirectoryUser>> {
            Ok(self
                .tables
                .lock()
                .unwrap()
                .users
                .iter()
                .find(|u| u.login == login)
                .map(Self::directory_user))
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use auth::Principal;
    use kernel::id::UserId;

    use super::support::MemoryBlog;
    use crate::application::{ArticleUseCase, CreateArticleInput, CreateUserInput, UserUseCase};
    use crate::domain::entity::article::ArticleChanges;
    use crate::error::BlogError;

    fn create_input(login: &str, password: &str) -> CreateUserInput {
        CreateUserInput {
            name: "Bob Builder".to_string(),
            slug: String::new(),
            login: login.to_string(),
            email: String::new(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_defaults_and_encoding() {
        let repo = Arc::new(MemoryBlog::default());
        let users = UserUseCase::new(repo.clone(), MemoryBlog::codec());

        let user = users.create(create_input("bob", "hunter2")).await.unwrap();
        assert_eq!(user.slug, "Bob Builder");
        assert!(platform::password::is_encoded(user.password.as_str()));

        // A pre-encoded password is stored as given
        let encoded = user.password.as_str().to_string();
        let copy = users
            .create(create_input("bob2", &encoded))
            .await
            .unwrap();
        assert_eq!(copy.password.as_str(), encoded);
    }

    #[tokio::test]
    async fn test_create_user_requires_login_and_password() {
        let users = UserUseCase::new(Arc::new(MemoryBlog::default()), MemoryBlog::codec());

        for (login, password) in [("", "hunter2"), ("bob", "")] {
            let err = users
                .create(create_input(login, password))
                .await
                .unwrap_err();
            assert!(matches!(err, BlogError::IncompleteData("User")));
        }
    }

    #[tokio::test]
    async fn test_duplicate_login_conflicts() {
        let repo = Arc::new(MemoryBlog::default());
        repo.seed_user("Alice", "alice", "hunter2");
        let users = UserUseCase::new(repo, MemoryBlog::codec());

        let err = users.create(create_input("alice", "x")).await.unwrap_err();
        assert!(matches!(err, BlogError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_resolves_authors() {
        let repo = Arc::new(MemoryBlog::default());
        let alice = repo.seed_user("Alice", "alice", "hunter2");
        repo.seed_article(alice.get(), "First");
        repo.seed_article(alice.get(), "Second");
        repo.seed_article(42, "Orphan");

        let listed = ArticleUseCase::new(repo).list(None).await.unwrap();

        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].author.as_ref().map(|u| u.id), Some(alice));
        assert_eq!(listed[1].author.as_ref().map(|u| u.id), Some(alice));
        assert!(listed[2].author.is_none());
    }

    #[tokio::test]
    async fn test_update_merges_non_empty_fields() {
        let repo = Arc::new(MemoryBlog::default());
        let alice = repo.seed_user("Alice", "alice", "hunter2");
        let id = repo.seed_article(alice.get(), "First");
        let editor = Principal::new(alice, "alice");

        let updated = ArticleUseCase::new(repo)
            .update(
                &editor,
                id,
                ArticleChanges {
                    content: "rewritten".to_string(),
                    ..ArticleChanges::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "First");
        assert_eq!(updated.content, "rewritten");
        assert_eq!(updated.user_id, alice);
    }

    #[tokio::test]
    async fn test_owner_checks() {
        let repo = Arc::new(MemoryBlog::default());
        let alice = repo.seed_user("Alice", "alice", "hunter2");
        let id = repo.seed_article(alice.get(), "First");
        let editor = Principal::new(alice, "alice");
        let articles = ArticleUseCase::new(repo.clone());

        let err = articles
            .create(
                &editor,
                CreateArticleInput {
                    user_id: Some(UserId::new(99)),
                    title: "Ghost".to_string(),
                    slug: String::new(),
                    content: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::OwnerNotFound(_)));

        let err = articles
            .update(
                &editor,
                id,
                ArticleChanges {
                    user_id: Some(UserId::new(99)),
                    ..ArticleChanges::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::UnknownOwner(_)));
        assert_eq!(repo.article(id).unwrap().user_id, alice);
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use auth::error::TOKEN_INVALID;
    use auth::{AuthConfig, Principal, TokenService};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::Utc;
    use kernel::id::{ArticleId, UserId};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::MemoryBlog;
    use crate::application::config::BlogConfig;
    use crate::presentation::router::blog_router_generic;

    struct Harness {
        repo: MemoryBlog,
        alice: UserId,
        token: String,
    }

    impl Harness {
        fn new() -> Self {
            let repo = MemoryBlog::default();
            let alice = repo.seed_user("Alice", "alice", "hunter2");
            let token = TokenService::new(Arc::new(repo.clone()), Arc::new(AuthConfig::default()))
                .issue(&Principal::new(alice, "alice"), Utc::now())
                .unwrap()
                .token;

            Self { repo, alice, token }
        }

        fn app(&self) -> Router {
            blog_router_generic(
                self.repo.clone(),
                self.repo.clone(),
                Arc::new(BlogConfig::default()),
                Arc::new(AuthConfig::default()),
            )
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.app().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        fn get(&self, uri: &str) -> Request<Body> {
            Request::builder().uri(uri).body(Body::empty()).unwrap()
        }

        fn authed(&self, method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
            let builder = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.token));

            match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            }
        }
    }

    #[tokio::test]
    async fn test_home() {
        let harness = Harness::new();
        let (status, body) = harness.send(harness.get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Gin Blog API - Home");
        assert_eq!(body["page"], "home");
        assert_eq!(body["message"], "OK");
    }

    #[tokio::test]
    async fn test_article_reads_are_public() {
        let harness = Harness::new();
        harness.repo.seed_article(harness.alice.get(), "First");
        harness.repo.seed_article(42, "Orphan");

        let (status, body) = harness.send(harness.get("/articles")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["author"], "Alice");
        assert_eq!(body[0]["author_slug"], "alice");
        assert_eq!(body[1]["author"], "Unknown");
        assert_eq!(body[1]["author_slug"], "");

        let (status, body) = harness.send(harness.get("/articles/2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Orphan");
        assert_eq!(body["author"], "Unknown");
    }

    #[tokio::test]
    async fn test_article_owner_filter() {
        let harness = Harness::new();
        harness.repo.seed_article(harness.alice.get(), "First");
        harness.repo.seed_article(42, "Orphan");

        let (_, body) = harness.send(harness.get("/articles?user_id=42")).await;
        let titles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Orphan"]);

        let (status, body) = harness.send(harness.get("/articles?user_id=x")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["page"], "articles");
    }

    #[tokio::test]
    async fn test_users_require_token() {
        let harness = Harness::new();
        let (status, body) = harness.send(harness.get("/users")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["title"], "Gin Blog API - Error");
        assert_eq!(body["page"], "users");
        assert_eq!(body["error_description"], TOKEN_INVALID);
    }

    #[tokio::test]
    async fn test_article_mutations_require_token() {
        let harness = Harness::new();
        let id = harness.repo.seed_article(harness.alice.get(), "First");

        let request = Request::builder()
            .method("DELETE")
            .uri("/articles/1")
            .body(Body::empty())
            .unwrap();
        let (status, body) = harness.send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["page"], "articles");
        assert!(harness.repo.article(id).is_some());
    }

    #[tokio::test]
    async fn test_token_of_deleted_user_is_rejected() {
        let harness = Harness::new();
        let (status, _) = harness
            .send(harness.authed("DELETE", "/users/1", None))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = harness.send(harness.authed("GET", "/users", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_user_crud() {
        let harness = Harness::new();

        let (status, created) = harness
            .send(harness.authed(
                "POST",
                "/users",
                Some(json!({"name": "Bob", "login": "bob", "password": "hunter2"})),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["slug"], "Bob");
        assert!(created.get("password").is_none());

        let bob = UserId::new(created["id"].as_u64().unwrap());
        let codec = MemoryBlog::codec();
        let stored = harness.repo.stored_password(bob).unwrap();
        assert_eq!(
            stored,
            codec
                .encode(&platform::password::ClearTextPassword::new("hunter2"))
                .as_str()
        );

        let (status, updated) = harness
            .send(harness.authed(
                "PUT",
                &format!("/users/{}", bob),
                Some(json!({"email": "bob@example.com"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["email"], "bob@example.com");
        assert_eq!(updated["login"], "bob");
        assert_eq!(harness.repo.stored_password(bob).unwrap(), stored);

        let (status, listed) = harness.send(harness.authed("GET", "/users", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 2);
        assert!(listed[0].get("password").is_none());
    }

    #[tokio::test]
    async fn test_user_id_errors() {
        let harness = Harness::new();

        let (status, body) = harness
            .send(harness.authed("GET", "/users/abc", None))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["error_description"],
            "User ID: ID is invalid! Message: invalid digit found in string"
        );

        let (status, body) = harness.send(harness.authed("GET", "/users/99", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_description"], "User (ID: '99'): User does not exist");
    }

    #[tokio::test]
    async fn test_user_delete_outcomes() {
        let harness = Harness::new();
        harness.repo.seed_user("Bob", "bob", "hunter2");

        let (status, body) = harness
            .send(harness.authed("DELETE", "/users/2", None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Gin Blog API - Delete Success");
        assert_eq!(body["page"], "users");
        assert_eq!(body["description"], "User (ID: '2'): User was deleted");

        let (_, body) = harness
            .send(harness.authed("DELETE", "/users/2", None))
            .await;
        assert_eq!(body["description"], "User (ID: '2'): User does not exist");
    }

    #[tokio::test]
    async fn test_article_crud() {
        let harness = Harness::new();

        let (status, created) = harness
            .send(harness.authed(
                "POST",
                "/articles",
                Some(json!({"title": "Hello", "content": "World"})),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["user_id"], harness.alice.get());
        assert_eq!(created["slug"], "Hello");

        let id = created["id"].as_u64().unwrap();

        let (status, body) = harness
            .send(harness.authed(
                "PUT",
                &format!("/articles/{}", id),
                Some(json!({"user_id": 99})),
            ))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_description"], "User ID: User does not exist!");

        let (status, body) = harness
            .send(harness.authed(
                "PUT",
                &format!("/articles/{}", id),
                Some(json!({"title": "Hello again"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Hello again");
        assert_eq!(body["content"], "World");

        let (status, body) = harness
            .send(harness.authed("DELETE", &format!("/articles/{}", id), None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "articles");
        assert_eq!(
            body["description"],
            format!("Article (ID: '{}'): Article was deleted", id)
        );
        assert!(harness.repo.article(ArticleId::new(id)).is_none());
    }

    #[tokio::test]
    async fn test_article_for_missing_owner() {
        let harness = Harness::new();

        let (status, body) = harness
            .send(harness.authed(
                "POST",
                "/articles",
                Some(json!({"user_id": 99, "title": "Ghost"})),
            ))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["page"], "articles");
    }

    #[tokio::test]
    async fn test_zero_owner_means_unset() {
        let harness = Harness::new();

        let (status, created) = harness
            .send(harness.authed(
                "POST",
                "/articles",
                Some(json!({"user_id": 0, "title": "Zero"})),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["user_id"], harness.alice.get());

        let id = created["id"].as_u64().unwrap();
        let (status, updated) = harness
            .send(harness.authed(
                "PUT",
                &format!("/articles/{}", id),
                Some(json!({"user_id": 0, "title": "Still mine"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["user_id"], harness.alice.get());
        assert_eq!(updated["title"], "Still mine");
    }

    #[tokio::test]
    async fn test_unreadable_body() {
        let harness = Harness::new();

        let request = Request::builder()
            .method("POST")
            .uri("/articles")
            .header(header::AUTHORIZATION, format!("Bearer {}", harness.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = harness.send(request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            body["error_description"]
                .as_str()
                .unwrap()
                .starts_with("Article: Data is invalid!")
        );
    }
}
