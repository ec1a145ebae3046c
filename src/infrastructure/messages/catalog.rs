use std::collections::HashMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::info;

use crate::application::message::format_template;
use crate::application::ports::{MessageError, MessageSource};
use crate::domain::value_objects::Locale;

/// Key of the root bundle, consulted after every locale-specific bundle
pub const ROOT_BUNDLE: &str = "default";

const BUNDLED_TOML: &str = include_str!("../../../resources/messages.toml");

static BUNDLED: Lazy<MessageCatalog> = Lazy::new(|| {
    MessageCatalog::from_toml_str(BUNDLED_TOML).expect("Invalid bundled message catalog")
});

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read message catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid message catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid locale table [{0}]")]
    InvalidLocale(String),
}

/// Immutable in-memory template store, grouped by locale bundle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageCatalog {
    bundles: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Templates shipped with the crate (Korean, with an English root bundle)
    pub fn bundled() -> Self {
        BUNDLED.clone()
    }

    /// Parse a TOML document whose tables are locale bundles:
    ///
    /// ```toml
    /// [default]
    /// NOT_FOUND = "Not found"
    ///
    /// [ko]
    /// NOT_FOUND = "요청하신 리소스를 찾을 수 없습니다."
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, HashMap<String, String>> = toml::from_str(source)?;

        let mut bundles = HashMap::with_capacity(raw.len());
        for (key, templates) in raw {
            let bundle = Self::bundle_key(&key)?;
            bundles
                .entry(bundle)
                .or_insert_with(HashMap::new)
                .extend(templates);
        }

        Ok(Self { bundles })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&source)?;

        info!(
            path = %path.display(),
            bundles = catalog.bundles.len(),
            "message_catalog_loaded"
        );
        Ok(catalog)
    }

    /// Add one template. `bundle` is a locale tag or [`ROOT_BUNDLE`].
    pub fn with_message(
        mut self,
        bundle: &str,
        code: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let bundle = Self::bundle_key(bundle)?;
        self.bundles
            .entry(bundle)
            .or_default()
            .insert(code.into(), template.into());
        Ok(self)
    }

    /// Overlay `other` on top of this catalog; its templates win
    pub fn merge(mut self, other: MessageCatalog) -> Self {
        for (bundle, templates) in other.bundles {
            self.bundles.entry(bundle).or_default().extend(templates);
        }
        self
    }

    /// Template for `code`, trying the locale, its language, then the root bundle
    pub fn template(&self, code: &str, locale: &Locale) -> Option<&str> {
        locale
            .candidates()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(ROOT_BUNDLE))
            .find_map(|bundle| self.bundles.get(bundle)?.get(code))
            .map(String::as_str)
    }

    /// Codes from `codes` with no template reachable from `locale`
    pub fn missing_codes<'a>(&self, codes: &[&'a str], locale: &Locale) -> Vec<&'a str> {
        codes
            .iter()
            .copied()
            .filter(|code| self.template(code, locale).is_none())
            .collect()
    }

    pub fn bundle_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.values().all(HashMap::is_empty)
    }

    fn bundle_key(key: &str) -> Result<String, CatalogError> {
        if key == ROOT_BUNDLE {
            return Ok(ROOT_BUNDLE.to_string());
        }
        Locale::parse(key)
            .map(|locale| locale.tag())
            .map_err(|_| CatalogError::InvalidLocale(key.to_string()))
    }
}

impl MessageSource for MessageCatalog {
    fn get_message(
        &self,
        code: &str,
        args: &[String],
        locale: &Locale,
    ) -> Result<String, MessageError> {
        let template = self
            .template(code, locale)
            .ok_or_else(|| MessageError::NotFound {
                code: code.to_string(),
                locale: locale.tag(),
            })?;

        format_template(template, args).map_err(|e| MessageError::MalformedTemplate {
            code: code.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error_code::{ErrorCode, GlobalErrorCode};
    use std::io::Write;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_bundled_catalog_covers_every_global_code() {
        let catalog = MessageCatalog::bundled();
        let codes: Vec<&str> = GlobalErrorCode::ALL.iter().map(|c| c.code()).collect();

        assert!(catalog.missing_codes(&codes, &Locale::korean()).is_empty());
        assert!(catalog.missing_codes(&codes, &Locale::english()).is_empty());
    }

    #[test]
    fn test_bundled_korean_messages() {
        let catalog = MessageCatalog::bundled();

        assert_eq!(
            catalog
                .get_message("NOT_FOUND", &[], &Locale::korean())
                .unwrap(),
            "요청하신 리소스를 찾을 수 없습니다."
        );
        assert_eq!(
            catalog
                .get_message("METHOD_NOT_ALLOWED", &args(&["POST"]), &Locale::korean())
                .unwrap(),
            "지원되지 않는 메서드입니다. 허용: POST"
        );
        assert_eq!(
            catalog
                .get_message("TYPE_MISMATCH", &args(&["id", "abc"]), &Locale::korean())
                .unwrap(),
            "파라미터 id의 값 abc는 올바르지 않습니다."
        );
    }

    #[test]
    fn test_locale_fallback_chain() {
        let catalog = MessageCatalog::new()
            .with_message(ROOT_BUNDLE, "GREETING", "hello")
            .unwrap()
            .with_message("ko", "GREETING", "안녕하세요")
            .unwrap()
            .with_message("ko-KR", "FAREWELL", "안녕히 가세요")
            .unwrap();

        let ko_kr = Locale::parse("ko-KR").unwrap();
        assert_eq!(catalog.template("FAREWELL", &ko_kr), Some("안녕히 가세요"));
        assert_eq!(catalog.template("GREETING", &ko_kr), Some("안녕하세요"));
        assert_eq!(catalog.template("GREETING", &Locale::english()), Some("hello"));
        assert_eq!(catalog.template("FAREWELL", &Locale::korean()), None);
    }

    #[test]
    fn test_missing_template_is_not_found() {
        let catalog = MessageCatalog::bundled();
        let err = catalog
            .get_message("NO_SUCH_CODE", &[], &Locale::korean())
            .unwrap_err();

        assert_eq!(
            err,
            MessageError::NotFound {
                code: "NO_SUCH_CODE".to_string(),
                locale: "ko".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_template_is_reported() {
        let catalog = MessageCatalog::new()
            .with_message("ko", "BROKEN", "값 {0")
            .unwrap();
        let err = catalog
            .get_message("BROKEN", &args(&["x"]), &Locale::korean())
            .unwrap_err();

        assert!(matches!(err, MessageError::MalformedTemplate { .. }));
    }

    #[test]
    fn test_from_toml_normalizes_locale_tables() {
        let catalog = MessageCatalog::from_toml_str(
            r#"
            [ko_KR]
            NOT_FOUND = "없음"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.bundle_names(), ["ko-KR"]);
    }

    #[test]
    fn test_from_toml_rejects_invalid_locale_table() {
        let result = MessageCatalog::from_toml_str("[not-a-locale]\nA = \"b\"\n");
        assert!(matches!(result, Err(CatalogError::InvalidLocale(_))));
    }

    #[test]
    fn test_from_toml_rejects_non_string_templates() {
        let result = MessageCatalog::from_toml_str("[ko]\nA = 1\n");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_merge_overrides() {
        let overrides = MessageCatalog::new()
            .with_message("ko", "NOT_FOUND", "찾을 수 없음")
            .unwrap();
        let catalog = MessageCatalog::bundled().merge(overrides);

        assert_eq!(
            catalog.template("NOT_FOUND", &Locale::korean()),
            Some("찾을 수 없음")
        );
        assert_eq!(
            catalog.template("FORBIDDEN", &Locale::korean()),
            Some("접근 권한이 없습니다.")
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[en]\nNOT_FOUND = \"Nothing here\"").unwrap();

        let catalog = MessageCatalog::from_file(file.path()).unwrap();
        assert_eq!(
            catalog.template("NOT_FOUND", &Locale::english()),
            Some("Nothing here")
        );
    }

    #[test]
    fn test_from_missing_file() {
        let result = MessageCatalog::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
