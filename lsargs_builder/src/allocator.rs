use thiserror::Error;

#[cfg(feature = "unit_test")]
use std::cell::Cell;

/// The heap could not (or would not) provide the requested storage.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AllocError {
    /// The requested capacity does not fit the index arithmetic.
    #[error("capacity overflow.")]
    CapacityOverflow,

    /// The allocator refused a request for this many bytes.
    #[error("failed to allocate {0} bytes.")]
    Exhausted(usize),
}

/// The allocation capability consumed by a [`Session`](crate::Session).
///
/// Every growth of the registry or of a text buffer first asks `grant` for the total number of bytes the grown storage will occupy.
/// Refusing a request surfaces as an [`AllocError`] from the operation that needed the storage, never as a panic or abort.
///
/// ### Example
/// ```
/// # use lsargs_builder as lsargs;
/// use lsargs::{AllocError, Allocator, Mode, Session};
/// use std::cell::Cell;
///
/// struct Refuse;
///
/// impl Allocator for Refuse {
///     fn grant(&self, bytes: usize) -> Result<(), AllocError> {
///         Err(AllocError::Exhausted(bytes))
///     }
/// }
///
/// let help = Cell::new(false);
/// let mut session = Session::new().allocator(Refuse);
///
/// assert!(session.register_flag(&help, Some('h'), Some("help"), None, Mode::Optional).is_err());
/// assert_eq!(session.last_error(), "Allocation failure.");
/// ```
pub trait Allocator {
    /// Permit (or refuse) holding `bytes` bytes of heap storage.
    fn grant(&self, bytes: usize) -> Result<(), AllocError>;
}

/// Grants every request, deferring to the global allocator (via `try_reserve`) for actual exhaustion.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    fn grant(&self, _bytes: usize) -> Result<(), AllocError> {
        Ok(())
    }
}

/// *Available using 'unit_test' crate feature only.*</br></br>
/// An allocator that grants a fixed number of requests, and refuses every request thereafter.
#[cfg(feature = "unit_test")]
#[derive(Debug)]
pub struct ExhaustAfter {
    remaining: Cell<usize>,
}

#[cfg(feature = "unit_test")]
impl ExhaustAfter {
    /// Create an allocator that grants precisely `grants` requests.
    pub fn new(grants: usize) -> Self {
        Self {
            remaining: Cell::new(grants),
        }
    }
}

#[cfg(feature = "unit_test")]
impl Allocator for ExhaustAfter {
    fn grant(&self, bytes: usize) -> Result<(), AllocError> {
        match self.remaining.get() {
            0 => Err(AllocError::Exhausted(bytes)),
            n => {
                self.remaining.set(n - 1);
                Ok(())
            }
        }
    }
}

// The registry grows by half again, plus a small floor so the first few registrations share one allocation.
const GROWTH_FLOOR: usize = 8;

/// Compute the next registry capacity after `current`.
///
/// Returns `None` when either the element count or its size in bytes would overflow.
pub(crate) fn grow_capacity(current: usize, element_size: usize) -> Option<usize> {
    let grown = current.checked_add(current / 2)?.checked_add(GROWTH_FLOOR)?;
    let bytes = grown.checked_mul(element_size.max(1))?;

    if bytes > isize::MAX as usize {
        None
    } else {
        Some(grown)
    }
}

/// Grow `items` so it holds at least one more element, going through the `allocator`.
pub(crate) fn reserve_one<T>(
    allocator: &dyn Allocator,
    items: &mut Vec<T>,
) -> Result<(), AllocError> {
    if items.len() < items.capacity() {
        return Ok(());
    }

    let element_size = std::mem::size_of::<T>();
    let capacity =
        grow_capacity(items.capacity(), element_size).ok_or(AllocError::CapacityOverflow)?;
    let bytes = capacity * element_size.max(1);
    allocator.grant(bytes)?;
    items
        .try_reserve_exact(capacity - items.len())
        .map_err(|_| AllocError::Exhausted(bytes))
}
