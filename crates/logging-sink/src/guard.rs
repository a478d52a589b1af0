use crate::line_mode::LineMode;
use crate::writer::WriterChannel;

/// RAII guard that temporarily overrides a [`WriterChannel`]'s [`LineMode`].
///
/// Created by [`WriterChannel::scoped_line_mode`]. Dropping the guard
/// reinstates the mode that was active before. The channel stays usable by
/// other handlers and threads while the guard is alive; they observe the
/// scoped mode too.
#[must_use = "dropping the guard immediately restores the previous line mode"]
pub struct LineModeGuard<'a, W> {
    channel: Option<&'a WriterChannel<W>>,
    previous: LineMode,
}

impl<'a, W> LineModeGuard<'a, W> {
    pub(crate) const fn new(channel: &'a WriterChannel<W>, previous: LineMode) -> Self {
        Self {
            channel: Some(channel),
            previous,
        }
    }

    /// Returns the [`LineMode`] restored on drop.
    #[must_use]
    pub const fn previous_line_mode(&self) -> LineMode {
        self.previous
    }

    /// Consumes the guard, keeping the scoped mode as the new baseline.
    pub fn persist(mut self) -> Option<&'a WriterChannel<W>> {
        self.channel.take()
    }
}

impl<W> Drop for LineModeGuard<'_, W> {
    fn drop(&mut self) {
        if let Some(channel) = self.channel.take() {
            channel.set_line_mode(self.previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_restores_previous_line_mode() {
        let channel = WriterChannel::with_line_mode(Vec::<u8>::new(), LineMode::WithNewline);
        {
            let _guard = channel.scoped_line_mode(LineMode::WithoutNewline);
            assert_eq!(channel.line_mode(), LineMode::WithoutNewline);
        }
        assert_eq!(channel.line_mode(), LineMode::WithNewline);
    }

    #[test]
    fn persist_skips_restoration() {
        let channel = WriterChannel::new(Vec::<u8>::new());
        let kept = channel.scoped_line_mode(LineMode::WithNewline).persist();
        assert!(kept.is_some());
        assert_eq!(channel.line_mode(), LineMode::WithNewline);
    }
}
