#[cfg(test)]
use mockall::automock;

/// Port used by the dispatcher to turn a code into user-facing text
///
/// `resolve` is total: when no message can be produced it returns `code`
/// unchanged.
#[cfg_attr(test, automock)]
pub trait MessageResolver: Send + Sync {
    fn resolve(&self, code: &str, args: &[String]) -> String;
}
