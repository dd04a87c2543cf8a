//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// プロジェクト全体で使用する標準エラー型です。
/// ビルダーパターンを使用してエラーを構築できます。
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `message` - ユーザー向けのエラーメッセージ（エンベロープの `error_description`）
/// * `title` - エンベロープの `title`（例: `"Gin Blog API - Error"`）
/// * `page` - エラーが発生したリソース名（例: `"users"`）
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "User (ID: '3'): User does not exist")
///     .with_title("Blog - Error")
///     .with_page("users");
/// assert_eq!(err.page(), Some("users"));
/// ```
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// ユーザー向けメッセージ
    message: Cow<'static, str>,
    /// エンベロープのタイトル
    title: Option<Cow<'static, str>>,
    /// リソース名
    page: Option<Cow<'static, str>>,
    /// 元のエラー（デバッグ用）
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型エイリアス
///
/// `Result<T, AppError>` の省略形です。
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            title: None,
            page: None,
            source: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// エンベロープのタイトルを設定
    #[inline]
    pub fn with_title(mut self, title: impl Into<Cow<'static, str>>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// リソース名を設定
    #[inline]
    pub fn with_page(mut self, page: impl Into<Cow<'static, str>>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// 元のエラーを設定（デバッグ用）
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::app_error::{AppError, AppResult};
    /// use kernel::error::kind::ErrorKind;
    ///
    /// fn parse_id(raw: &str) -> AppResult<u64> {
    ///     raw.parse::<u64>()
    ///         .map_err(|e| AppError::new(ErrorKind::UnprocessableEntity, "ID is invalid").with_source(e))
    /// }
    /// assert!(parse_id("abc").is_err());
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// タイトルを取得（未設定ならステータスの理由フレーズ）
    #[inline]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.kind.as_str())
    }

    /// リソース名を取得
    #[inline]
    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    /// JSON エラーエンベロープを構築
    ///
    /// `{title, status_code, page, error_message, error_description}` の形式です。
    pub fn envelope(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title(),
            "status_code": self.status_code(),
            "page": self.page().unwrap_or_default(),
            "error_message": self.kind.as_str(),
            "error_description": self.message(),
        })
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(page) = &self.page {
            builder.field("page", page);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}
