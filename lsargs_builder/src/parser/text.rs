use std::fmt;

use crate::allocator::{AllocError, Allocator};

/// A growable text buffer whose every growth goes through an [`Allocator`].
#[derive(Debug, Default)]
pub(crate) struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Ensure capacity for at least `n` bytes, preserving the current contents.
    pub(crate) fn reserve(&mut self, allocator: &dyn Allocator, n: usize) -> Result<(), AllocError> {
        if self.text.capacity() >= n {
            return Ok(());
        }

        // Grow geometrically so a long render does not re-allocate on every append.
        let capacity = std::cmp::max(n, self.text.capacity().saturating_mul(2));
        if capacity > isize::MAX as usize {
            return Err(AllocError::CapacityOverflow);
        }

        allocator.grant(capacity)?;
        self.text
            .try_reserve_exact(capacity - self.text.len())
            .map_err(|_| AllocError::Exhausted(capacity))
    }

    pub(crate) fn append(&mut self, allocator: &dyn Allocator, s: &str) -> Result<(), AllocError> {
        let n = self
            .text
            .len()
            .checked_add(s.len())
            .ok_or(AllocError::CapacityOverflow)?;
        self.reserve(allocator, n)?;
        self.text.push_str(s);
        Ok(())
    }

    /// Append the formatted `arguments`.
    pub(crate) fn render(
        &mut self,
        allocator: &dyn Allocator,
        arguments: fmt::Arguments<'_>,
    ) -> Result<(), AllocError> {
        let mut writer = Writer {
            buffer: self,
            allocator,
            error: None,
        };

        match fmt::write(&mut writer, arguments) {
            Ok(()) => Ok(()),
            // Only the writer can fail the formatting.
            Err(_) => Err(writer.error.unwrap_or(AllocError::CapacityOverflow)),
        }
    }

    /// Empty the contents, keeping the storage for re-use.
    pub(crate) fn clear(&mut self) {
        self.text.clear();
    }

    /// Empty the contents and give the storage back.
    pub(crate) fn release(&mut self) {
        self.text = String::new();
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.text.capacity()
    }
}

struct Writer<'b> {
    buffer: &'b mut TextBuffer,
    allocator: &'b dyn Allocator,
    error: Option<AllocError>,
}

impl fmt::Write for Writer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.append(self.allocator, s).map_err(|error| {
            self.error.replace(error);
            fmt::Error
        })
    }
}
