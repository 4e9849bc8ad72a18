/// The last-error text of a session without any failure.
pub(crate) const SUCCESS: &str = "Success";
pub(crate) const ALLOCATION_FAILURE: &str = "Allocation failure.";
pub(crate) const HELP_UNAVAILABLE: &str = "Help unavailable: allocation failure.";

pub(crate) const USAGE_PREFIX: &str = "Usage:";
pub(crate) const OPTION_MARKER: &str = "[OPTION]";
pub(crate) const OPTIONS_HEADER: &str = "Options:";
pub(crate) const VALUE_MARKER: &str = "[VALUE]";

pub(crate) const MAIN_INDENT: usize = 2;
pub(crate) const PADDING_WIDTH: usize = 2;
// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_DESCRIPTION_WIDTH: usize = 17;
