// ABOUTME: Platform-neutral clipboard accessor contract used by the change poller
// ABOUTME: change_count is an opaque generation token; equality means no new read is needed

/// System clipboard accessor. The generation token returned by
/// `change_count` changes if and only if the clipboard contents changed
/// since the last query.
pub trait Clipboard {
    /// Opaque, monotonically increasing generation token.
    fn change_count(&self) -> i64;

    /// Current clipboard contents as text, or `None` when the clipboard
    /// holds non-text data or a transient read failure occurred.
    fn read_text(&self) -> Option<String>;

    /// Replaces the clipboard contents with the given text. Bumps the
    /// generation token.
    fn write_text(&self, text: &str);
}

impl<T: Clipboard + ?Sized> Clipboard for Box<T> {
    fn change_count(&self) -> i64 {
        (**self).change_count()
    }

    fn read_text(&self) -> Option<String> {
        (**self).read_text()
    }

    fn write_text(&self, text: &str) {
        (**self).write_text(text)
    }
}
