/// Diagnostic log port. Business code never talks to a logging backend
/// directly; adapters live in the `logger` crate.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}
