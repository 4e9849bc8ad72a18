mod base;
mod interface;
mod printer;
mod text;

pub use base::ParseError;
pub(crate) use base::consume;
pub(crate) use interface::terminal_width;
pub(crate) use printer::Printer;
pub(crate) use text::TextBuffer;
