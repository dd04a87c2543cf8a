//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, Path, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::AuthConfig;
use auth::middleware::AuthUser;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{ArticleId, UserId};

use crate::application::config::BlogConfig;
use crate::application::{ArticleUseCase, CreateArticleInput, CreateUserInput, UserUseCase};
use crate::domain::entity::article::ArticleChanges;
use crate::domain::entity::user::UserChanges;
use crate::domain::repository::{ArticleRepository, UserRepository};
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{
    ArticleQuery, ArticleRequest, ArticleResponse, DeleteSuccess, DisplayedArticle, HomeSuccess,
    UserRequest, UserResponse,
};

pub const HOME_PAGE: &str = "home";
pub const USERS_PAGE: &str = "users";
pub const ARTICLES_PAGE: &str = "articles";

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogAppState<R>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<BlogConfig>,
    pub auth: Arc<AuthConfig>,
}

impl<R> BlogAppState<R>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    fn users(&self) -> UserUseCase<R> {
        UserUseCase::new(self.repo.clone(), self.auth.password_codec())
    }

    fn articles(&self) -> ArticleUseCase<R> {
        ArticleUseCase::new(self.repo.clone())
    }

    fn fail(&self, page: &'static str) -> impl FnOnce(BlogError) -> AppError + '_ {
        move |e| e.into_app_error(&self.config, page)
    }

    fn deleted(&self, page: &'static str, description: String) -> Json<DeleteSuccess> {
        Json(DeleteSuccess {
            title: format!("{} - Delete Success", self.config.project),
            status_code: StatusCode::OK.as_u16(),
            page: page.to_string(),
            message: "OK".to_string(),
            description,
        })
    }
}

/// Lets [`AuthUser`] render its rejection with the configured project
impl<R> FromRef<BlogAppState<R>> for Arc<AuthConfig>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &BlogAppState<R>) -> Self {
        state.auth.clone()
    }
}

fn parse_user_id(raw: &str) -> BlogResult<UserId> {
    raw.parse().map_err(|source| BlogError::InvalidId {
        context: "User ID",
        source,
    })
}

fn parse_article_id(raw: &str) -> BlogResult<ArticleId> {
    raw.parse().map_err(|source| BlogError::InvalidId {
        context: "Article ID",
        source,
    })
}

/// Owner named in an article body; `0` means none was given
fn owner_id(raw: Option<u64>) -> Option<UserId> {
    raw.filter(|id| *id != 0).map(UserId::new)
}

fn read_body<T>(payload: Result<Json<T>, JsonRejection>, context: &'static str) -> BlogResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| BlogError::InvalidPayload {
            context,
            message: rejection.body_text(),
        })
}

// ============================================================================
// Home
// ============================================================================

/// GET /
pub async fn home<R>(State(state): State<BlogAppState<R>>) -> Json<HomeSuccess>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    Json(HomeSuccess {
        title: format!("{} - Home", state.config.project),
        status_code: StatusCode::OK.as_u16(),
        page: HOME_PAGE.to_string(),
        message: "OK".to_string(),
        description: state.config.description.clone(),
    })
}

// ============================================================================
// Users
// ============================================================================

/// GET /users
pub async fn list_users<R>(
    State(state): State<BlogAppState<R>>,
) -> AppResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    let users = state.users().list().await.map_err(state.fail(USERS_PAGE))?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
pub async fn get_user<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    let id = parse_user_id(&id).map_err(state.fail(USERS_PAGE))?;
    let user = state.users().get(id).await.map_err(state.fail(USERS_PAGE))?;

    Ok(Json(user.into()))
}

/// POST /users
pub async fn create_user<R>(
    State(state): State<BlogAppState<R>>,
    AuthUser(editor): AuthUser,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    let body = read_body(payload, "User").map_err(state.fail(USERS_PAGE))?;

    let input = CreateUserInput {
        name: body.name,
        slug: body.slug,
        login: body.login,
        email: body.email,
        password: body.password,
    };

    let user = state
        .users()
        .create(input)
        .await
        .map_err(state.fail(USERS_PAGE))?;

    tracing::debug!(user_id = %user.id, editor = %editor.id, "User create request served");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /users/{id}
pub async fn update_user<R>(
    State(state): State<BlogAppState<R>>,
    AuthUser(editor): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> AppResult<Json<UserResponse>>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    let id = parse_user_id(&id).map_err(state.fail(USERS_PAGE))?;
    let body = read_body(payload, "User").map_err(state.fail(USERS_PAGE))?;

    let changes = UserChanges {
        name: body.name,
        slug: body.slug,
        login: body.login,
        email: body.email,
        password: body.password,
    };

    let user = state
        .users()
        .update(id, changes)
        .await
        .map_err(state.fail(USERS_PAGE))?;

    tracing::debug!(user_id = %user.id, editor = %editor.id, "User update request served");

    Ok(Json(user.into()))
}

/// DELETE /users/{id}
pub async fn delete_user<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteSuccess>>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    let id = parse_user_id(&id).map_err(state.fail(USERS_PAGE))?;
    let deleted = state
        .users()
        .delete(id)
        .await
        .map_err(state.fail(USERS_PAGE))?;

    let outcome = if deleted {
        "User was deleted"
    } else {
        "User does not exist"
    };

    Ok(state.deleted(USERS_PAGE, format!("User (ID: '{}'): {}", id, outcome)))
}

// ============================================================================
// Articles
// ============================================================================

/// GET /articles
pub async fn list_articles<R>(
    State(state): State<BlogAppState<R>>,
    Query(query): Query<ArticleQuery>,
) -> AppResult<Json<Vec<DisplayedArticle>>>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    let owner = query
        .user_id
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .map(parse_user_id)
        .transpose()
        .map_err(state.fail(ARTICLES_PAGE))?;

    let articles = state
        .articles()
        .list(owner)
        .await
        .map_err(state.fail(ARTICLES_PAGE))?;

    Ok(Json(articles.into_iter().map(DisplayedArticle::from).collect()))
}

/// GET /articles/{id}
pub async fn get_article<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> AppResult<Json<DisplayedArticle>>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    let id = parse_article_id(&id).map_err(state.fail(ARTICLES_PAGE))?;
    let article = state
        .articles()
        .get(id)
        .await
        .map_err(state.fail(ARTICLES_PAGE))?;

    Ok(Json(article.into()))
}

/// POST /articles
pub async fn create_article<R>(
    State(state): State<BlogAppState<R>>,
    AuthUser(editor): AuthUser,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ArticleResponse>)>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    let body = read_body(payload, "Article").map_err(state.fail(ARTICLES_PAGE))?;

    let input = CreateArticleInput {
        user_id: owner_id(body.user_id),
        title: body.title,
        slug: body.slug,
        content: body.content,
    };

    let article = state
        .articles()
        .create(&editor, input)
        .await
        .map_err(state.fail(ARTICLES_PAGE))?;

    Ok((StatusCode::CREATED, Json(article.into())))
}

/// PUT /articles/{id}
pub async fn update_article<R>(
    State(state): State<BlogAppState<R>>,
    AuthUser(editor): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> AppResult<Json<ArticleResponse>>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    let id = parse_article_id(&id).map_err(state.fail(ARTICLES_PAGE))?;
    let body = read_body(payload, "Article").map_err(state.fail(ARTICLES_PAGE))?;

    let changes = ArticleChanges {
        user_id: owner_id(body.user_id),
        title: body.title,
        slug: body.slug,
        content: body.content,
    };

    let article = state
        .articles()
        .update(&editor, id, changes)
        .await
        .map_err(state.fail(ARTICLES_PAGE))?;

    Ok(Json(article.into()))
}

/// DELETE /articles/{id}
pub async fn delete_article<R>(
    State(state): State<BlogAppState<R>>,
    AuthUser(editor): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteSuccess>>
where
    R: UserRepository + ArticleRepository + Clone + Send + Sync + 'static,
{
    let id = parse_article_id(&id).map_err(state.fail(ARTICLES_PAGE))?;
    let deleted = state
        .articles()
        .delete(&editor, id)
        .await
        .map_err(state.fail(ARTICLES_PAGE))?;

    let outcome = if deleted {
        "Article was deleted"
    } else {
        "Article does not exist"
    };

    Ok(state.deleted(ARTICLES_PAGE, format!("Article (ID: '{}'): {}", id, outcome)))
}
